//! # privycode-entity
//!
//! Domain entity models for PrivyCode: repository owners and the viewer
//! links they issue.

pub mod link;
pub mod user;

pub use link::{CreateViewerLink, LinkToken, UpdateViewerLink, ViewerLink};
pub use user::User;
