//! Typeahead option resolution.
//!
//! Typing a key into a typeahead populates a list of candidate options. The
//! resolver picks which candidate the key refers to: an exact match wins,
//! then a prefix match, then any option containing the key. Comparison is
//! case-insensitive and ignores surrounding whitespace.

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// All candidates matching `key`, best matches first
#[must_use]
pub fn matching<'a>(key: &str, candidates: &'a [String]) -> Vec<&'a str> {
    let key = normalize(key);
    if key.is_empty() {
        return Vec::new();
    }
    let mut ranked: Vec<(u8, usize, &str)> = candidates
        .iter()
        .enumerate()
        .filter_map(|(i, candidate)| {
            let norm = normalize(candidate);
            let rank = if norm == key {
                0
            } else if norm.starts_with(&key) {
                1
            } else if norm.contains(&key) {
                2
            } else {
                return None;
            };
            Some((rank, i, candidate.as_str()))
        })
        .collect();
    ranked.sort_by_key(|(rank, i, _)| (*rank, *i));
    ranked.into_iter().map(|(_, _, c)| c).collect()
}

/// The candidate `key` refers to, if any
#[must_use]
pub fn resolve<'a>(key: &str, candidates: &'a [String]) -> Option<&'a str> {
    matching(key, candidates).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_exact_beats_contains() {
        let options = list(&["Paracetamol Syrup", "Paracetamol"]);
        assert_eq!(resolve("paracetamol", &options), Some("Paracetamol"));
    }

    #[test]
    fn test_prefix_beats_contains() {
        let options = list(&["Acme Ltd Kampala", "The Acme Group", "Acme Ltd"]);
        assert_eq!(
            matching("acme", &options),
            vec!["Acme Ltd Kampala", "Acme Ltd", "The Acme Group"]
        );
    }

    #[test]
    fn test_no_match() {
        let options = list(&["B100", "B200"]);
        assert_eq!(resolve("B300", &options), None);
        assert_eq!(resolve("B100", &[]), None);
    }

    #[test]
    fn test_blank_key_matches_nothing() {
        assert!(matching("  ", &list(&["B100"])).is_empty());
    }

    proptest! {
        #[test]
        fn prop_exact_candidate_always_resolves(
            names in proptest::collection::vec("[A-Za-z0-9 ]{1,12}", 1..8),
            pick in 0usize..8,
        ) {
            let idx = pick % names.len();
            prop_assume!(!names[idx].trim().is_empty());
            let resolved = resolve(&names[idx], &names).unwrap();
            prop_assert_eq!(normalize(resolved), normalize(&names[idx]));
        }

        #[test]
        fn prop_resolved_contains_key(
            names in proptest::collection::vec("[a-z]{1,10}", 0..8),
            key in "[a-z]{1,3}",
        ) {
            if let Some(found) = resolve(&key, &names) {
                prop_assert!(found.contains(key.as_str()));
            }
        }
    }
}
