//! Link registry behavior: creation preconditions, defaults, ownership,
//! update semantics, and deletion.

mod support;

use std::collections::HashSet;

use chrono::{Duration, Utc};

use privycode_core::error::ErrorKind;
use privycode_core::types::PageRequest;
use privycode_database::{UserStore, ViewerLinkStore};
use privycode_service::link::{CreateLinkRequest, UpdateLinkRequest};
use privycode_service::RequestContext;

fn create_request(repo: &str) -> CreateLinkRequest {
    CreateLinkRequest {
        repo_name: repo.to_string(),
        expires_in_days: None,
        max_views: None,
    }
}

#[tokio::test]
async fn test_create_applies_defaults() {
    let h = support::harness().await;

    let issued = h
        .links
        .create_link(&h.ctx, create_request("demo"))
        .await
        .expect("create");

    let expected_expiry = Utc::now() + Duration::days(3);
    let delta = (issued.link.expires_at - expected_expiry).num_seconds().abs();
    assert!(delta < 5, "default TTL should be 3 days");
    assert_eq!(issued.link.max_views, 0);
    assert_eq!(issued.link.view_count, 0);
    assert_eq!(
        issued.viewer_url,
        format!("http://localhost:8080/api/view/{}", issued.link.token)
    );
}

#[tokio::test]
async fn test_create_rejects_non_positive_overrides() {
    let h = support::harness().await;

    let issued = h
        .links
        .create_link(
            &h.ctx,
            CreateLinkRequest {
                repo_name: "demo".to_string(),
                expires_in_days: Some(-7),
                max_views: Some(-1),
            },
        )
        .await
        .expect("create");

    let delta = (issued.link.expires_at - (Utc::now() + Duration::days(3)))
        .num_seconds()
        .abs();
    assert!(delta < 5, "non-positive TTL falls back to the default");
    assert_eq!(issued.link.max_views, 0);
}

#[tokio::test]
async fn test_create_rejects_empty_repo_name() {
    let h = support::harness().await;

    let err = h
        .links
        .create_link(&h.ctx, create_request("   "))
        .await
        .expect_err("empty repo must be rejected");
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_create_fails_closed_on_unreachable_repo() {
    let h = support::harness_with(support::StubContentHost::unreachable()).await;

    let err = h
        .links
        .create_link(&h.ctx, create_request("ghost"))
        .await
        .expect_err("unreachable repo must be rejected");
    assert_eq!(err.kind, ErrorKind::RepositoryUnreachable);

    // Fail closed: nothing was persisted.
    assert_eq!(h.store.live_link_count().await, 0);
}

#[tokio::test]
async fn test_tokens_are_unique_across_many_links() {
    let h = support::harness().await;

    let mut tokens = HashSet::new();
    for _ in 0..10_000 {
        let issued = h
            .links
            .create_link(&h.ctx, create_request("demo"))
            .await
            .expect("create");
        tokens.insert(issued.link.token);
    }
    assert_eq!(tokens.len(), 10_000);
}

#[tokio::test]
async fn test_update_replaces_cap_but_keeps_count() {
    let h = support::harness().await;
    let issued = h
        .links
        .create_link(
            &h.ctx,
            CreateLinkRequest {
                repo_name: "demo".to_string(),
                expires_in_days: Some(1),
                max_views: Some(2),
            },
        )
        .await
        .expect("create");

    // Consume both views.
    let now = Utc::now();
    h.gate.evaluate(&issued.link.token, now).await.expect("first view");
    h.gate.evaluate(&issued.link.token, now).await.expect("second view");
    let err = h
        .gate
        .evaluate(&issued.link.token, now)
        .await
        .expect_err("cap reached");
    assert_eq!(err.kind, ErrorKind::ViewLimitExceeded);

    // Raise the cap; the consumed count must survive.
    let updated = h
        .links
        .update_link(
            &h.ctx,
            issued.link.id,
            UpdateLinkRequest {
                expires_in_days: None,
                max_views: Some(5),
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.view_count, 2);
    assert_eq!(updated.max_views, 5);

    let grant = h
        .gate
        .evaluate(&issued.link.token, now)
        .await
        .expect("raised cap grants again");
    assert_eq!(grant.link.view_count, 3);
}

#[tokio::test]
async fn test_update_ttl_is_a_fresh_window() {
    let h = support::harness().await;
    let issued = h
        .links
        .create_link(
            &h.ctx,
            CreateLinkRequest {
                repo_name: "demo".to_string(),
                expires_in_days: Some(1),
                max_views: None,
            },
        )
        .await
        .expect("create");

    let updated = h
        .links
        .update_link(
            &h.ctx,
            issued.link.id,
            UpdateLinkRequest {
                expires_in_days: Some(7),
                max_views: None,
            },
        )
        .await
        .expect("update");

    // Fresh window from now, not old expiry + 7 days.
    let delta = (updated.expires_at - (Utc::now() + Duration::days(7)))
        .num_seconds()
        .abs();
    assert!(delta < 5);
}

#[tokio::test]
async fn test_update_requires_ownership() {
    let h = support::harness().await;
    let issued = h
        .links
        .create_link(&h.ctx, create_request("demo"))
        .await
        .expect("create");

    let stranger = support::create_owner(&h.store, "stranger").await;
    let err = h
        .links
        .update_link(
            &RequestContext::new(stranger),
            issued.link.id,
            UpdateLinkRequest {
                expires_in_days: Some(1),
                max_views: None,
            },
        )
        .await
        .expect_err("strangers cannot update");
    assert_eq!(err.kind, ErrorKind::Authorization);
}

#[tokio::test]
async fn test_delete_hides_link_and_leaves_siblings() {
    let h = support::harness().await;
    let first = h
        .links
        .create_link(&h.ctx, create_request("demo"))
        .await
        .expect("create");
    let second = h
        .links
        .create_link(&h.ctx, create_request("demo"))
        .await
        .expect("create");

    h.links
        .delete_link(&h.ctx, first.link.id)
        .await
        .expect("delete");

    // The deleted link is gone for every path.
    let err = h
        .gate
        .evaluate(&first.link.token, Utc::now())
        .await
        .expect_err("deleted link denies");
    assert_eq!(err.kind, ErrorKind::NotFound);
    let err = h
        .links
        .delete_link(&h.ctx, first.link.id)
        .await
        .expect_err("double delete");
    assert_eq!(err.kind, ErrorKind::NotFound);

    // Sibling and owner are untouched.
    h.gate
        .evaluate(&second.link.token, Utc::now())
        .await
        .expect("sibling link still grants");
    let page = h
        .links
        .list_links(&h.ctx, &PageRequest::default())
        .await
        .expect("list");
    assert_eq!(page.total_items, 1);
}

#[tokio::test]
async fn test_deleting_owner_cascades_to_links() {
    let h = support::harness().await;
    let issued = h
        .links
        .create_link(&h.ctx, create_request("demo"))
        .await
        .expect("create");

    let other = support::create_owner(&h.store, "other").await;

    assert!(h.store.delete(h.ctx.user_id).await.expect("delete owner"));

    let gone = ViewerLinkStore::find_by_token(&h.store, &issued.link.token)
        .await
        .expect("lookup");
    assert!(gone.is_none(), "owner deletion cascades to links");

    // The unrelated owner survives.
    assert!(UserStore::find_by_id(&h.store, other.id)
        .await
        .expect("lookup")
        .is_some());
}

#[tokio::test]
async fn test_list_is_owner_scoped() {
    let h = support::harness().await;
    h.links
        .create_link(&h.ctx, create_request("demo"))
        .await
        .expect("create");

    let stranger = support::create_owner(&h.store, "stranger").await;
    let page = h
        .links
        .list_links(&RequestContext::new(stranger), &PageRequest::default())
        .await
        .expect("list");
    assert_eq!(page.total_items, 0);
}
