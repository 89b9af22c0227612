//! Concrete PostgreSQL repositories.

pub mod user;
pub mod viewer_link;

pub use user::UserRepository;
pub use viewer_link::ViewerLinkRepository;
