//! User (repository owner) entity.

pub mod model;

pub use model::{CreateUser, User};
