//! # privycode-github
//!
//! GitHub collaborators for PrivyCode: the OAuth handshake that
//! authenticates repository owners, and the content client that proxies
//! repository data with an owner's credential.

pub mod client;
pub mod oauth;
pub mod types;

pub use client::GitHubContentClient;
pub use oauth::GitHubOAuth;
