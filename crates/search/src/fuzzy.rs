//! Subsequence matching.

/// Count how many characters of `query` are consumed, in order, by a greedy
/// left-to-right walk over `text`.
///
/// Each text character is compared against the next unconsumed query
/// character; on equality both advance, otherwise only the text does.
pub fn subsequence_len(text: &str, query: &str) -> usize {
    let mut pending = query.chars().peekable();
    let mut matched = 0;

    for c in text.chars() {
        match pending.peek() {
            Some(&q) if q == c => {
                pending.next();
                matched += 1;
            }
            Some(_) => {}
            None => break,
        }
    }

    matched
}

/// Check if text contains all characters of query in order.
pub fn fuzzy_match(text: &str, query: &str) -> bool {
    subsequence_len(text, query) == query.chars().count()
}

/// Fallback score for a subsequence match, out of 50.
///
/// Returns `None` when the query is empty or not fully consumed.
#[allow(clippy::cast_precision_loss)]
pub fn subsequence_score(text: &str, query: &str) -> Option<f64> {
    let query_len = query.chars().count();
    if query_len == 0 {
        return None;
    }

    let matched = subsequence_len(text, query);
    (matched == query_len).then(|| matched as f64 / query_len as f64 * 50.0)
}
