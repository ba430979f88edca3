//! Fuzzy string similarity on a 0..=100 scale

use strsim::normalized_levenshtein;

/// Lowercase, replace punctuation with spaces and collapse whitespace.
pub fn normalize(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .flat_map(char::to_lowercase)
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn to_score(similarity: f64) -> u8 {
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Edit-distance similarity of two strings
pub fn ratio(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    to_score(normalized_levenshtein(a, b))
}

/// Best similarity of the shorter string against every same-length window
/// of the longer one
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    if shorter.is_empty() {
        return 0;
    }

    let longer: Vec<char> = longer.chars().collect();
    let width = shorter.chars().count();

    let mut best = 0;
    for window in longer.windows(width) {
        let candidate: String = window.iter().collect();
        best = best.max(ratio(shorter, &candidate));
        if best == 100 {
            break;
        }
    }
    best
}

/// Similarity after sorting the words of both strings
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Weighted similarity between a query and a candidate name.
///
/// Takes the best of the plain, partial and token-sorted ratios. Partial and
/// token-sorted matches count for less when the two lengths differ a lot.
pub fn weighted_ratio(query: &str, choice: &str) -> u8 {
    let query = normalize(query);
    let choice = normalize(choice);
    if query.is_empty() || choice.is_empty() {
        return 0;
    }

    let base = f64::from(ratio(&query, &choice));
    let token_sort = f64::from(token_sort_ratio(&query, &choice));

    let (q_len, c_len) = (query.chars().count(), choice.chars().count());
    let length_ratio = q_len.max(c_len) as f64 / q_len.min(c_len) as f64;

    let best = if length_ratio < 1.5 {
        base.max(token_sort * 0.95)
    } else {
        let partial_scale = if length_ratio < 8.0 { 0.9 } else { 0.6 };
        let partial = f64::from(partial_ratio(&query, &choice)) * partial_scale;
        base.max(partial).max(token_sort * 0.95 * partial_scale)
    };

    best.round().clamp(0.0, 100.0) as u8
}
