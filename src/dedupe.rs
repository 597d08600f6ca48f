use std::collections::HashSet;

/// Collapse (raw, normalized) pairs whose normalized form is case-insensitively
/// identical, keeping the first occurrence in its original position. With the
/// flag off the list passes through untouched.
pub fn dedupe(pairs: Vec<(String, String)>, enabled: bool) -> Vec<(String, String)> {
    if !enabled {
        return pairs;
    }

    let mut seen = HashSet::new();
    pairs
        .into_iter()
        .filter(|(_, normalized)| seen.insert(normalized.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(raw: &str, normalized: &str) -> (String, String) {
        (raw.to_string(), normalized.to_string())
    }

    #[test]
    fn test_disabled_passes_through() {
        let pairs = vec![pair("a", "https://a.com"), pair("A", "https://A.com")];
        assert_eq!(dedupe(pairs.clone(), false), pairs);
    }

    #[test]
    fn test_case_insensitive_keeps_first() {
        let pairs = vec![
            pair("Example.com", "https://Example.com"),
            pair("example.com", "https://example.com"),
            pair("other.com", "https://other.com"),
        ];
        let deduped = dedupe(pairs, true);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].0, "Example.com");
        assert_eq!(deduped[1].0, "other.com");
    }
}
