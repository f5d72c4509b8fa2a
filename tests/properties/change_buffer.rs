//! Property tests for the change buffer.

use proptest::prelude::*;

use autosync::ChangeBuffer;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A drain returns exactly the trimmed concatenation of all appends.
    #[test]
    fn property_drain_returns_trimmed_concatenation(
        chunks in proptest::collection::vec("(?s).{0,32}", 0..16)
    ) {
        let buffer = ChangeBuffer::new();
        for chunk in &chunks {
            buffer.append(chunk);
        }

        let joined: String = chunks.concat();
        let expected = joined.trim();
        match buffer.drain_if_non_empty() {
            Some(content) => prop_assert_eq!(content.as_str(), expected),
            None => prop_assert!(expected.is_empty()),
        }
    }

    /// PROPERTY: The buffer is always empty after a drain, pending or not.
    #[test]
    fn property_drain_always_resets(
        chunks in proptest::collection::vec("[ \\t\\nA-Za-z/.]{0,24}", 0..8)
    ) {
        let buffer = ChangeBuffer::new();
        for chunk in &chunks {
            buffer.append(chunk);
        }

        let _ = buffer.drain_if_non_empty();
        prop_assert!(buffer.is_empty());
        prop_assert!(!buffer.is_pending());
        prop_assert_eq!(buffer.drain_if_non_empty(), None);
    }

    /// PROPERTY: Whitespace-only content never counts as pending.
    #[test]
    fn property_whitespace_is_not_pending(
        ws in "[ \\t\\r\\n]{0,32}"
    ) {
        let buffer = ChangeBuffer::new();
        buffer.append(&ws);
        prop_assert!(!buffer.is_pending());
        prop_assert_eq!(buffer.drain_if_non_empty(), None);
    }
}
