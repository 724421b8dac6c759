//! Property tests for meminfo label normalization and value fidelity.

use proptest::prelude::*;
use sp_core::probe::parse_meminfo_content;

proptest! {
    /// Any parenthesized-alphanumeric label normalizes to a key made only
    /// of lowercase alphanumerics and underscores, and the parsed value is
    /// the exact integer from the input.
    #[test]
    fn normalized_keys_are_safe_identifiers(
        label in "[A-Za-z][A-Za-z0-9_()]{0,15}",
        value in any::<u32>(),
    ) {
        let content = format!("{label}:       {value} kB\n");
        let snap = parse_meminfo_content(&content).unwrap();

        prop_assert_eq!(snap.len(), 1);
        let (key, parsed) = snap.iter().next().unwrap();
        prop_assert_eq!(*parsed, u64::from(value));
        prop_assert!(
            key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
            "unsafe key produced: {}", key
        );
    }

    /// Parsing the same content twice yields element-wise equal snapshots.
    #[test]
    fn parse_is_deterministic(
        labels in prop::collection::vec("[A-Za-z][A-Za-z0-9_]{0,11}", 1..8),
        values in prop::collection::vec(any::<u32>(), 8),
    ) {
        let content: String = labels
            .iter()
            .zip(values.iter())
            .map(|(label, value)| format!("{label}: {value} kB\n"))
            .collect();

        let first = parse_meminfo_content(&content).unwrap();
        let second = parse_meminfo_content(&content).unwrap();
        prop_assert_eq!(first, second);
    }

    /// A unit token other than kB always fails the parse and names the
    /// offending raw label.
    #[test]
    fn non_kilobyte_unit_always_fails(
        label in "[A-Za-z][A-Za-z0-9_]{0,11}",
        unit in "[A-Za-z]{2,4}",
    ) {
        prop_assume!(!unit.eq_ignore_ascii_case("kb"));

        let content = format!("{label}: 42 {unit}\n");
        let err = parse_meminfo_content(&content).unwrap_err();
        prop_assert!(err.to_string().contains(&label));
    }
}
