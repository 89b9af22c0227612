//! # privycode-api
//!
//! HTTP API layer for PrivyCode: the Axum router, handlers, middleware,
//! extractors, DTOs, and the error-to-response mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use state::AppState;
