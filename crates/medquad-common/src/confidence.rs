//! Confidence algebra shared by the argumentation engine and its callers.
//!
//! Upstream producers report *uncertainty* per statement, the engine works
//! on *strength*, and the presentation layer shows uncertainty again. The
//! conversions between the two live here so every crate agrees on them.

/// Aggregate same-polarity influences using the noisy-OR model:
/// p = 1 - Π(1 - p_i)
///
/// An empty input yields 0.0 (no influence). The result never exceeds 1.0
/// for inputs in [0, 1] and is non-decreasing in every input.
pub fn aggregate_confidence<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let product: f64 = values.into_iter().map(|p| 1.0 - p).product();
    1.0 - product
}

/// Convert an upstream uncertainty score into an intrinsic base score.
pub fn base_score_from_uncertainty(uncertainty: f64) -> f64 {
    1.0 - uncertainty
}

/// Convert a final argument strength into the uncertainty shown to users.
pub fn uncertainty_from_strength(strength: f64) -> f64 {
    1.0 - strength
}

/// True when `value` is a finite number inside the closed unit interval.
pub fn is_unit_interval(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}
