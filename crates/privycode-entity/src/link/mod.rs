//! Viewer link entity.

pub mod model;
pub mod token;

pub use model::{CreateViewerLink, UpdateViewerLink, ViewerLink};
pub use token::LinkToken;
