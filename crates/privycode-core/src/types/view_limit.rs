//! View quota resolution types.

use serde::{Deserialize, Serialize};

/// Resolved view quota for a viewer link.
///
/// Stored as a plain integer on the link row (`0` = unlimited, matching the
/// wire contract), but resolved into this type wherever quota decisions are
/// made so the unlimited case cannot be confused with a zero-view cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewLimit {
    /// A fixed maximum number of grants.
    Capped(i32),
    /// No cap; the link is bounded only by its expiry time.
    Unlimited,
}

impl ViewLimit {
    /// Check whether a given view count exhausts this limit.
    pub fn is_exhausted_by(&self, view_count: i32) -> bool {
        match self {
            Self::Capped(max) => view_count >= *max,
            Self::Unlimited => false,
        }
    }

    /// Return the numeric cap, or `None` for unlimited.
    pub fn as_max(&self) -> Option<i32> {
        match self {
            Self::Capped(max) => Some(*max),
            Self::Unlimited => None,
        }
    }
}

impl From<i32> for ViewLimit {
    /// Convert a raw `max_views` column value. `<= 0` means unlimited.
    fn from(value: i32) -> Self {
        if value <= 0 {
            Self::Unlimited
        } else {
            Self::Capped(value)
        }
    }
}
