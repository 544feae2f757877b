//! DF-QuAD aggregation and combination functions.

pub use medquad_common::confidence::aggregate_confidence as aggregate;

/// Combine an intrinsic score with aggregated attack and support.
///
/// Net attack scales the score down towards 0 in proportion to its current
/// value; net support scales it up towards 1 in proportion to the remaining
/// headroom. Equal attack and support leave the base score untouched.
pub fn combine(base: f64, attack: f64, support: f64) -> f64 {
    if attack == support {
        base
    } else if attack > support {
        base - base * (support - attack).abs()
    } else {
        base + (1.0 - base) * (support - attack).abs()
    }
}
