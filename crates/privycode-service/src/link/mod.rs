//! Viewer link lifecycle and access control.

pub mod access;
pub mod service;

pub use access::{AccessGate, Grant};
pub use service::{CreateLinkRequest, IssuedLink, LinkService, UpdateLinkRequest};
