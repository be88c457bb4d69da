//! Content hashing for agent sources.

/// Hex-encoded BLAKE3 digest of the exact source bytes.
///
/// No normalization is applied: sources differing by a single whitespace
/// character hash differently.
pub fn compute_agent_hash(source: &str) -> String {
    hex::encode(blake3::hash(source.as_bytes()).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hash_is_64_hex_chars() {
        let hash = compute_agent_hash("Paul Smith\nPERSONA lawyer");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn whitespace_changes_the_hash() {
        assert_ne!(
            compute_agent_hash("Agent\nRULE x"),
            compute_agent_hash("Agent\nRULE x ")
        );
    }

    proptest! {
        #[test]
        fn hash_is_deterministic(source in ".*") {
            prop_assert_eq!(compute_agent_hash(&source), compute_agent_hash(&source));
        }

        #[test]
        fn distinct_sources_hash_differently(a in ".{0,64}", b in ".{0,64}") {
            prop_assume!(a != b);
            prop_assert_ne!(compute_agent_hash(&a), compute_agent_hash(&b));
        }
    }
}
