//! One-way anonymization of client IP addresses.
//!
//! Submissions store a SHA-256 digest of the connecting address instead of
//! the address itself. The hash is unsalted on purpose: the same IP always
//! maps to the same digest, which keeps abuse correlation possible without
//! ever retaining the raw address.

use sha2::{Digest, Sha256};

/// Returns the lowercase hex SHA-256 digest of `ip`.
///
/// Deterministic and total: any input, including the empty string, hashes
/// successfully.
pub fn hash_ip(ip: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(ip.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(hash_ip("192.0.2.1"), hash_ip("192.0.2.1"));
    }

    #[test]
    fn test_distinct_ips_hash_differently() {
        assert_ne!(hash_ip("192.0.2.1"), hash_ip("192.0.2.2"));
    }

    #[test]
    fn test_digest_is_fixed_length_hex() {
        let digest = hash_ip("2001:db8::1");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_empty_input_still_hashes() {
        // SHA-256 of the empty string is a well-known constant.
        assert_eq!(
            hash_ip(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
