//! Similarity primitives shared by the clusterer.

use shingle::TokenSet;

/// Jaccard similarity `|A ∩ B| / |A ∪ B|`; `0.0` when either set is empty.
pub fn jaccard(a: &TokenSet, b: &TokenSet) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let inter = a.intersection_len(b);
    let union = a.len() + b.len() - inter;
    inter as f64 / union as f64
}

/// `(max - min) / max` over two character lengths; `0.0` when both are zero.
pub fn length_ratio_diff(a: usize, b: usize) -> f64 {
    let (min, max) = if a <= b { (a, b) } else { (b, a) };
    if max == 0 {
        return 0.0;
    }
    (max - min) as f64 / max as f64
}

/// Cheap pre-filter: lengths differing by more than `tolerance` can never
/// be near-duplicates worth a token comparison.
pub fn within_length_tolerance(a: usize, b: usize, tolerance: f64) -> bool {
    length_ratio_diff(a, b) <= tolerance
}
