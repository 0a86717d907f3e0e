//! Opaque API tokens.
//!
//! Tokens are random alphanumeric strings handed to the client exactly once;
//! only their SHA-256 hash is stored so a database leak does not expose
//! usable credentials.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of a generated token (alphanumeric characters).
pub const TOKEN_LENGTH: usize = 40;

/// Generate a new token, returning `(plaintext, sha256_hex_hash)`.
pub fn generate_api_token() -> (String, String) {
    let plaintext: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect();
    let hash = hash_api_token(&plaintext);
    (plaintext, hash)
}

/// Compute the SHA-256 hex digest of a token.
pub fn hash_api_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_hash_matches() {
        let (plaintext, hash) = generate_api_token();
        assert_eq!(plaintext.len(), TOKEN_LENGTH);
        assert_eq!(hash, hash_api_token(&plaintext));
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_tokens_are_unique() {
        let (a, _) = generate_api_token();
        let (b, _) = generate_api_token();
        assert_ne!(a, b);
    }
}
