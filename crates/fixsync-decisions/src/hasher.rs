// hasher.rs — SHA-256 hashing for the decision log's hash chain.
//
// Hashes are lowercase hex strings (64 characters).

use sha2::{Digest, Sha256};

/// Hash a UTF-8 string, returning a lowercase hex-encoded SHA-256 string.
pub fn hash_str(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digest() {
        assert_eq!(
            hash_str("hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn different_inputs_differ() {
        assert_ne!(hash_str("applied"), hash_str("applied "));
    }
}
