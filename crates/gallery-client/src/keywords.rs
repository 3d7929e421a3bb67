//! Keyword extraction from image descriptions.
//!
//! Used to build a short tag line under the detail view. Tokens are
//! lowercased whitespace splits; short tokens and anything containing a stop
//! fragment are dropped, and at most [`MAX_KEYWORDS`] survive.

/// Fragments that disqualify a token wherever they appear inside it.
const STOP_FRAGMENTS: [&str; 3] = ["very", "with", "through"];

/// Minimum token length, exclusive, in Unicode scalar values.
const MIN_TOKEN_LEN: usize = 3;

/// Upper bound on extracted keywords.
pub const MAX_KEYWORDS: usize = 5;

/// Extract display keywords from a free-text description.
pub fn extract_keywords(description: &str) -> Vec<String> {
    let lowered = description.to_lowercase();
    lowered
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_LEN)
        .filter(|token| !STOP_FRAGMENTS.iter().any(|stop| token.contains(stop)))
        .take(MAX_KEYWORDS)
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn lowercases_and_drops_short_and_stop_tokens() {
        let keywords = extract_keywords("A Very Long Description With Through Lines");
        // "a" is too short; "very", "with", "through" carry stop fragments.
        assert_eq!(keywords, vec!["long", "description", "lines"]);
    }

    #[test]
    fn stop_fragments_match_inside_longer_tokens() {
        // "everything" hides "very" and "breakthrough" hides "through".
        let keywords = extract_keywords("everything breakthrough waterside vista");
        assert_eq!(keywords, vec!["waterside", "vista"]);
    }

    #[test]
    fn caps_the_keyword_count() {
        let keywords = extract_keywords("alpha bravo charlie delta echo foxtrot golf");
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert_eq!(keywords[0], "alpha");
        assert_eq!(keywords[4], "echo");
    }

    #[rstest]
    #[case("")]
    #[case("a an it to")]
    #[case("very with through")]
    fn degenerate_descriptions_yield_nothing(#[case] description: &str) {
        assert!(extract_keywords(description).is_empty());
    }
}
