//! Viewer link token generation.

use rand::Rng;

/// Number of random bytes per token (128 bits).
const TOKEN_BYTES: usize = 16;

/// An opaque viewer link token.
///
/// Tokens are 16 bytes from the thread-local CSPRNG, hex-encoded to a
/// 32-character string. Uniqueness is additionally enforced by the store's
/// unique index; generation is collision-resistant, not collision-proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkToken(String);

impl LinkToken {
    /// Generate a fresh random token.
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// The token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<LinkToken> for String {
    fn from(token: LinkToken) -> Self {
        token.0
    }
}

impl std::fmt::Display for LinkToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
