//! # privycode-service
//!
//! Business logic for PrivyCode. The [`link::LinkService`] owns the viewer
//! link lifecycle, the [`link::AccessGate`] decides whether a token grants
//! access, and the [`user::UserService`] maintains owner records across
//! OAuth logins.

pub mod context;
pub mod link;
pub mod user;

pub use context::RequestContext;
