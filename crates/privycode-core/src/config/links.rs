//! Viewer link issuance configuration.

use serde::{Deserialize, Serialize};

/// Viewer link settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Expiry applied when a create request omits a TTL, in days.
    #[serde(default = "default_ttl_days")]
    pub default_ttl_days: i64,
    /// How many fresh tokens to try when creation hits a unique-token
    /// collision before giving up.
    #[serde(default = "default_token_attempts")]
    pub token_create_attempts: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            default_ttl_days: default_ttl_days(),
            token_create_attempts: default_token_attempts(),
        }
    }
}

fn default_ttl_days() -> i64 {
    3
}

fn default_token_attempts() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = LinkConfig::default();
        assert_eq!(cfg.default_ttl_days, 3);
        assert_eq!(cfg.token_create_attempts, 3);
    }
}
