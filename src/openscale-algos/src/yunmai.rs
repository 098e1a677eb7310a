use openscale_types::{ActivityLevel, DerivedMetrics, RawExtras, RawReading, UserProfile};

use crate::composition::BodyComposition;

/// Yunmai formulas. Everything but body fat derives from a body fat
/// percentage, which newer firmware reports directly.
pub struct YunmaiCalculator {
    is_male: bool,
    age: u16,
    height_cm: f32,
    /// Heavy or extreme activity switches to the "fitness" coefficients.
    fitness: bool,
}

/// Rounds to `scale` decimal places the way the vendor app does, without
/// flooring the shifted value.
fn half_up(value: f32, scale: f32) -> f32 {
    ((value * scale) + 0.5) / scale
}

impl YunmaiCalculator {
    pub fn water(&self, body_fat: f32) -> f32 {
        half_up((100.0 - body_fat) * 0.726, 100.0)
    }

    /// Body fat from the raw resistance; 0 when the estimate leaves [5, 75].
    pub fn fat(&self, weight: f32, resistance: i32) -> f32 {
        let mut r = (resistance - 100) as f32 / 100.0;
        let h = self.height_cm / 100.0;

        if r >= 1.0 {
            r = f64::from(r).sqrt() as f32;
        }

        let mut fat = (weight * 1.5 / h / h) + (f32::from(self.age) * 0.08);
        if self.is_male {
            fat -= 10.8;
        }
        fat = (fat - 7.4) + r;

        if !(5.0..=75.0).contains(&fat) {
            0.0
        } else {
            fat
        }
    }

    pub fn muscle(&self, body_fat: f32) -> f32 {
        let factor = if self.fitness { 0.7 } else { 0.67 };
        half_up((100.0 - body_fat) * factor, 100.0)
    }

    pub fn skeletal_muscle(&self, body_fat: f32) -> f32 {
        let factor = if self.fitness { 0.6 } else { 0.53 };
        half_up((100.0 - body_fat) * factor, 100.0)
    }

    /// Bone mass in kg from the muscle percentage.
    pub fn bone(&self, muscle: f32, weight: f32) -> f32 {
        let h = self.height_cm - 170.0;
        let (a, b) = if self.is_male { (0.22, 0.6) } else { (0.34, 0.45) };
        let bone = ((weight * (muscle / 100.0) * 4.0) / 7.0 * a * b) + (h / 100.0);
        half_up(bone, 10.0)
    }

    pub fn lbm(&self, weight: f32, body_fat: f32) -> f32 {
        weight * (100.0 - body_fat) / 100.0
    }

    pub fn visceral_fat(&self, body_fat: f32) -> f32 {
        if self.fitness {
            let vf = if body_fat > 15.0 {
                (body_fat - 15.0) / 1.1 + 12.0
            } else {
                -1.0 * (15.0 - body_fat) / 1.4 + 12.0
            };
            return vf.clamp(1.0, 9.0);
        }

        let age = if self.age < 18 || self.age > 120 {
            18
        } else {
            self.age
        };

        let offset = match (self.is_male, age) {
            (true, ..=39) => 21.0,
            (true, ..=59) => 22.0,
            (true, _) => 24.0,
            (false, ..=39) => 34.0,
            (false, ..=59) => 35.0,
            (false, _) => 36.0,
        };

        let f = body_fat - offset;
        let d = match (f > 0.0, self.is_male) {
            (true, _) => 1.1,
            (false, true) => 1.4,
            (false, false) => 1.8,
        };

        (f / d + 9.5).clamp(1.0, 30.0)
    }
}

impl BodyComposition for YunmaiCalculator {
    fn new(profile: &UserProfile) -> Self {
        Self {
            is_male: profile.sex.is_male(),
            age: profile.age,
            height_cm: profile.height_cm,
            fitness: matches!(
                profile.activity,
                ActivityLevel::Heavy | ActivityLevel::Extreme
            ),
        }
    }

    fn compute(&self, raw: &RawReading) -> DerivedMetrics {
        let weight = raw.weight_kg;
        if weight <= 0.0 {
            return DerivedMetrics::default();
        }

        let mut metrics = DerivedMetrics {
            bmi: weight * 1e4 / (self.height_cm * self.height_cm),
            ..Default::default()
        };

        let embedded_fat = match raw.extras {
            RawExtras::Yunmai { embedded_fat, .. } => embedded_fat,
            _ => None,
        };
        let fat = match embedded_fat {
            Some(fat) => fat,
            None => {
                let resistance = raw.impedance.map_or(0, |imp| imp.round() as i32);
                self.fat(weight, resistance)
            }
        };

        if fat > 0.0 && fat.is_finite() {
            let muscle = self.muscle(fat);
            metrics.fat = fat;
            metrics.muscle = muscle;
            metrics.skeletal_muscle = self.skeletal_muscle(fat);
            metrics.water = self.water(fat);
            metrics.bone = self.bone(muscle, weight);
            metrics.lbm = self.lbm(weight, fat);
            metrics.visceral_fat = self.visceral_fat(fat);
        }

        metrics
    }
}
