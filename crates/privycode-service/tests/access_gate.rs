//! Access gate behavior: the deny ladder, quota consumption, expiry
//! boundaries, and fail-forward counting.

mod support;

use chrono::{Duration, Utc};

use privycode_core::error::ErrorKind;
use privycode_core::traits::ContentHost;
use privycode_service::link::CreateLinkRequest;

fn request(repo: &str, ttl_days: Option<i64>, max_views: Option<i32>) -> CreateLinkRequest {
    CreateLinkRequest {
        repo_name: repo.to_string(),
        expires_in_days: ttl_days,
        max_views,
    }
}

#[tokio::test]
async fn test_unknown_token_is_not_found() {
    let h = support::harness().await;
    let err = h
        .gate
        .evaluate("deadbeefdeadbeefdeadbeefdeadbeef", Utc::now())
        .await
        .expect_err("unknown token");
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_quota_sequence_allows_then_denies() {
    let h = support::harness().await;
    let issued = h
        .links
        .create_link(&h.ctx, request("demo", Some(1), Some(2)))
        .await
        .expect("create");
    let now = Utc::now();

    let first = h.gate.evaluate(&issued.link.token, now).await.expect("first");
    assert_eq!(first.link.view_count, 1);

    let second = h
        .gate
        .evaluate(&issued.link.token, now)
        .await
        .expect("second");
    assert_eq!(second.link.view_count, 2);

    let err = h
        .gate
        .evaluate(&issued.link.token, now)
        .await
        .expect_err("third view denied");
    assert_eq!(err.kind, ErrorKind::ViewLimitExceeded);

    // The denied attempt did not bump the count.
    let link = h
        .links
        .get_link(&h.ctx, issued.link.id)
        .await
        .expect("get");
    assert_eq!(link.view_count, 2);
}

#[tokio::test]
async fn test_unlimited_link_grants_until_expiry() {
    let h = support::harness().await;
    let issued = h
        .links
        .create_link(&h.ctx, request("demo", Some(1), None))
        .await
        .expect("create");
    let now = Utc::now();

    for expected in 1..=100 {
        let grant = h.gate.evaluate(&issued.link.token, now).await.expect("grant");
        assert_eq!(grant.link.view_count, expected);
    }
}

#[tokio::test]
async fn test_expiry_boundary_is_inclusive_on_the_deny_side() {
    let h = support::harness().await;
    let issued = h
        .links
        .create_link(&h.ctx, request("demo", Some(3), None))
        .await
        .expect("create");
    let expires_at = issued.link.expires_at;

    h.gate
        .evaluate(&issued.link.token, expires_at - Duration::seconds(1))
        .await
        .expect("still live just before expiry");

    let err = h
        .gate
        .evaluate(&issued.link.token, expires_at)
        .await
        .expect_err("denied at the boundary instant");
    assert_eq!(err.kind, ErrorKind::LinkExpired);

    let err = h
        .gate
        .evaluate(&issued.link.token, expires_at + Duration::hours(22))
        .await
        .expect_err("denied after expiry");
    assert_eq!(err.kind, ErrorKind::LinkExpired);
}

#[tokio::test]
async fn test_one_day_link_denies_25_hours_later() {
    let h = support::harness().await;
    let issued = h
        .links
        .create_link(&h.ctx, request("demo", Some(1), None))
        .await
        .expect("create");

    let err = h
        .gate
        .evaluate(&issued.link.token, Utc::now() + Duration::hours(25))
        .await
        .expect_err("expired a day later");
    assert_eq!(err.kind, ErrorKind::LinkExpired);
}

#[tokio::test]
async fn test_grant_survives_fetch_failure() {
    // Fail-forward counting: the view is consumed at grant time, so a
    // failing upstream fetch afterwards does not refund it.
    let h = support::harness().await;
    let issued = h
        .links
        .create_link(&h.ctx, request("demo", Some(1), Some(1)))
        .await
        .expect("create");

    let grant = h
        .gate
        .evaluate(&issued.link.token, Utc::now())
        .await
        .expect("grant");

    let failing = support::StubContentHost::unreachable();
    let fetch = failing
        .read_file(&grant.credential, &grant.github_username, &grant.repo_name, "README.md")
        .await;
    assert!(fetch.is_err(), "fetch fails after the grant");

    let link = h
        .links
        .get_link(&h.ctx, issued.link.id)
        .await
        .expect("get");
    assert_eq!(link.view_count, 1, "consumed view is not refunded");
}

#[tokio::test]
async fn test_grant_carries_current_owner_credential() {
    let h = support::harness().await;
    let issued = h
        .links
        .create_link(&h.ctx, request("demo", Some(1), None))
        .await
        .expect("create");

    // Re-authentication overwrites the credential; the next grant proxies
    // with the fresh one.
    use privycode_database::UserStore;
    h.store
        .update_token(h.ctx.user_id, "gho_rotated")
        .await
        .expect("rotate");

    let grant = h
        .gate
        .evaluate(&issued.link.token, Utc::now())
        .await
        .expect("grant");
    assert_eq!(grant.credential, "gho_rotated");
    assert_eq!(grant.github_username, "octocat");
    assert_eq!(grant.repo_name, "demo");
}

#[tokio::test]
async fn test_concurrent_grants_never_exceed_cap() {
    let h = support::harness().await;
    let issued = h
        .links
        .create_link(&h.ctx, request("demo", Some(1), Some(5)))
        .await
        .expect("create");
    let now = Utc::now();

    let mut tasks = Vec::new();
    for _ in 0..20 {
        let gate = h.gate.clone();
        let token = issued.link.token.clone();
        tasks.push(tokio::spawn(async move { gate.evaluate(&token, now).await }));
    }

    let mut granted = 0;
    for task in tasks {
        if task.await.expect("join").is_ok() {
            granted += 1;
        }
    }
    assert_eq!(granted, 5, "atomic increment keeps the cap hard");

    let link = h
        .links
        .get_link(&h.ctx, issued.link.id)
        .await
        .expect("get");
    assert_eq!(link.view_count, 5);
}
