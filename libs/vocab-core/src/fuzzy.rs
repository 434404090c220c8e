//! Edit-distance similarity between answer strings.

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Use two rows instead of full matrix for memory efficiency
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Normalized similarity in `[0, 1]`: `1 - distance / max_len`.
///
/// Lengths are counted in chars so umlauts weigh the same as ASCII letters.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    let max_len = a.chars().count().max(b.chars().count());
    let distance = levenshtein_distance(a, b);
    1.0 - (distance as f64 / max_len as f64)
}
