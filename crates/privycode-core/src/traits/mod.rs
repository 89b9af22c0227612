//! Core traits defined in `privycode-core` and implemented by other crates.

pub mod content_host;

pub use content_host::{ContentEntry, ContentHost, EntryKind, RepoSummary};
