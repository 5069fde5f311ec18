//! Presentation rounding.
//!
//! List endpoints report scores as fractions rounded to 2 decimals; the
//! single-job endpoint reports percentages rounded to 1 decimal.

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `fraction` in [0, 1] as a percentage with one decimal.
pub fn percent1(fraction: f64) -> f64 {
    (fraction * 1000.0).round() / 10.0
}
