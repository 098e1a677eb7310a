use openscale_types::{DerivedMetrics, RawReading, UserProfile};

/// A vendor's body-composition formulas bound to one user.
pub trait BodyComposition {
    fn new(profile: &UserProfile) -> Self
    where
        Self: Sized;

    /// Derives every metric the vendor supports from `raw`. Metrics that need
    /// an impedance stay at zero when the reading has none, and a
    /// non-positive weight yields all zeros.
    fn compute(&self, raw: &RawReading) -> DerivedMetrics;
}

pub(crate) fn sex_factor(is_male: bool) -> f32 {
    if is_male { 1.0 } else { 0.0 }
}
