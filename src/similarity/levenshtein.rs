//! Levenshtein edit distance and the normalized similarity built on it.
//!
//! Both functions count Unicode scalar values, not bytes, so `"中文"` has
//! length 2. The DP keeps a single row over the shorter input and carries the
//! diagonal in a scalar, giving O(m*n) time and O(min(m, n)) space.

/// Compute the Levenshtein edit distance between two strings.
///
/// Returns the minimum number of single-character edits (insertions,
/// deletions, substitutions) required to transform `a` into `b`.
pub fn distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    distance_chars(&a_chars, &b_chars)
}

/// Edit distance over pre-decoded character slices.
pub fn distance_chars(a: &[char], b: &[char]) -> usize {
    // Distance is symmetric, so sweep the longer input and keep the row
    // sized to the shorter one.
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let n = short.len();

    if n == 0 {
        return long.len();
    }

    let mut row: Vec<usize> = (0..=n).collect();

    for (i, &lc) in long.iter().enumerate() {
        // `prev` holds dp[i-1][j-1] as the row is overwritten left to right.
        let mut prev = row[0];
        row[0] = i + 1;

        for (j, &sc) in short.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if lc == sc {
                prev
            } else {
                1 + prev.min(above).min(row[j])
            };
            prev = above;
        }
    }

    row[n]
}

/// Compute the similarity ratio between two strings (0.0 = completely
/// different, 1.0 = identical).
///
/// Defined as `1 - distance / max(len(a), len(b))`; two empty strings are
/// identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let max_len = a_chars.len().max(b_chars.len());
    if max_len == 0 {
        return 1.0;
    }

    let dist = distance_chars(&a_chars, &b_chars);
    1.0 - (dist as f64 / max_len as f64)
}
