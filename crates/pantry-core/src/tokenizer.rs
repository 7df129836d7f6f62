//! Name tokenization.
//!
//! Display names are split into lowercase word tokens before indexing and
//! before matching search queries. A token is a maximal run of ASCII
//! letters or digits; everything else is a separator.

/// Splits a name into normalized word tokens.
///
/// Lowercases the input, splits on any run of non-alphanumeric characters,
/// and drops empty fragments. Output order follows the input; duplicates
/// are kept (callers dedupe when indexing).
pub fn tokenize(name: &str) -> Vec<String> {
    name.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        assert_eq!(tokenize("Whole Milk"), vec!["whole", "milk"]);
    }

    #[test]
    fn test_tokenize_splits_on_punctuation_runs() {
        assert_eq!(
            tokenize("Ben & Jerry's Ice-Cream"),
            vec!["ben", "jerry", "s", "ice", "cream"]
        );
    }

    #[test]
    fn test_tokenize_keeps_digits() {
        assert_eq!(tokenize("2% Milk 1L"), vec!["2", "milk", "1l"]);
    }

    #[test]
    fn test_tokenize_empty_and_whitespace() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t ").is_empty());
        assert!(tokenize("--- !!").is_empty());
    }

    #[test]
    fn test_tokenize_preserves_order_and_duplicates() {
        assert_eq!(tokenize("milk milk shake"), vec!["milk", "milk", "shake"]);
    }
}
