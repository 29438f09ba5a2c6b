//! Score Normalization
//!
//! The food catalog carries its scores in two legacy shapes: a 0-10 scale and
//! an older 0-100 scale, spread across differently named fields. Everything
//! downstream of catalog loading works on a single 0-10 scale produced here.

/// Upper bound of the canonical score scale.
pub const SCORE_MAX: f64 = 10.0;

/// Normalize a raw catalog score to the 0-10 scale.
///
/// Values above 10 are read as 0-100 scale values and divided by 10.
/// Non-finite and negative values collapse to 0.
pub fn normalize_score(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }

    let scaled = if raw > SCORE_MAX { raw / 10.0 } else { raw };
    scaled.min(SCORE_MAX)
}

/// Pick the first present raw score and normalize it.
///
/// Mirrors the catalog's field precedence: the current field wins over the
/// legacy one, and a food with neither scores 0.
pub fn normalize_first(candidates: &[Option<f64>]) -> f64 {
    candidates
        .iter()
        .flatten()
        .next()
        .copied()
        .map(normalize_score)
        .unwrap_or(0.0)
}

/// Mean of already-normalized scores, 0 for an empty input.
pub fn mean_score<I>(scores: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = scores
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), s| (sum + s, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
