//! Edit-distance string similarity.
//!
//! Search tolerates misspelled queries by scoring every indexed word
//! against each query word. The score is normalized Levenshtein distance,
//! with a substring-containment fast path that skips the DP entirely.

/// Computes the Levenshtein edit distance between two strings.
///
/// Classic single-character insert/delete/substitute distance, computed
/// over two rolling rows instead of the full table.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Scores how alike two strings are, in `[0, 1]`.
///
/// Defined as `1 - levenshtein(a, b) / max(len(a), len(b))` over the
/// lowercased inputs. Identical strings score 1.0; two empty strings are
/// identical by definition.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    1.0 - levenshtein(&a, &b) as f64 / max_len as f64
}

/// Matches `term` against `candidate`, returning a score when they are
/// close enough.
///
/// Substring containment in either direction is an immediate 1.0, checked
/// before any edit-distance work. Otherwise the similarity score is
/// returned iff it reaches `threshold`. `None` means "no match" and is a
/// distinct signal from a low score: a 0.0 similarity was still compared.
pub fn is_similar(term: &str, candidate: &str, threshold: f64) -> Option<f64> {
    let term = term.to_lowercase();
    let candidate = candidate.to_lowercase();

    if candidate.contains(&term) || term.contains(&candidate) {
        return Some(1.0);
    }

    let score = similarity(&term, &candidate);
    (score >= threshold).then_some(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("milk", ""), 4);
        assert_eq!(levenshtein("", "milk"), 4);
        assert_eq!(levenshtein("milk", "milk"), 0);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn test_levenshtein_transposed_pair_costs_two() {
        // Plain edit distance has no transposition operation.
        assert_eq!(levenshtein("mlik", "milk"), 2);
    }

    #[test]
    fn test_similarity_identity() {
        assert_eq!(similarity("milk", "milk"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn test_similarity_symmetry() {
        for (a, b) in [("milk", "mlik"), ("bread", "board"), ("", "eggs")] {
            assert_eq!(similarity(a, b), similarity(b, a));
        }
    }

    #[test]
    fn test_similarity_is_case_insensitive() {
        assert_eq!(similarity("MILK", "milk"), 1.0);
    }

    #[test]
    fn test_similarity_typo_scores_half() {
        // levenshtein("mlik", "milk") = 2 over max length 4
        assert_eq!(similarity("mlik", "milk"), 0.5);
    }

    #[test]
    fn test_is_similar_substring_fast_path() {
        // Containment wins regardless of how strict the threshold is.
        assert_eq!(is_similar("milk", "buttermilk", 1.0), Some(1.0));
        assert_eq!(is_similar("buttermilk", "milk", 1.0), Some(1.0));
    }

    #[test]
    fn test_is_similar_threshold_cutoff() {
        assert_eq!(is_similar("mlik", "milk", 0.3), Some(0.5));
        assert_eq!(is_similar("mlik", "milk", 0.6), None);
    }

    #[test]
    fn test_is_similar_unrelated_words() {
        // similarity("milk", "zzzzz") = 1 - 5/5 = 0.0, below threshold
        assert_eq!(is_similar("milk", "zzzzz", 0.3), None);
    }
}
