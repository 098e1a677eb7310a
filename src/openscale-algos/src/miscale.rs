use openscale_types::{DerivedMetrics, RawReading, UserProfile};

use crate::composition::{BodyComposition, sex_factor};

/// Xiaomi body composition formulas, built around the lean body mass
/// coefficient. Muscle uses the Janssen BIA equation.
pub struct MiScaleCalculator {
    is_male: bool,
    age: f32,
    height_cm: f32,
}

impl MiScaleCalculator {
    fn lbm_coefficient(&self, weight: f32, impedance: f32) -> f32 {
        let mut lbm = (self.height_cm * 9.058 / 100.0) * (self.height_cm / 100.0);
        lbm += weight * 0.32 + 12.226;
        lbm -= impedance * 0.0068;
        lbm -= self.age * 0.0542;
        lbm
    }

    pub fn bmi(&self, weight: f32) -> f32 {
        weight / (((self.height_cm * self.height_cm) / 100.0) / 100.0)
    }

    pub fn lbm(&self, weight: f32, impedance: f32) -> f32 {
        let lbm =
            weight - ((self.body_fat(weight, impedance) * 0.01) * weight) - self.bone(weight, impedance);

        if (!self.is_male && lbm >= 84.0) || (self.is_male && lbm >= 93.5) {
            120.0
        } else {
            lbm
        }
    }

    /// Skeletal muscle in percent of body weight, clamped to [10, 60]. Falls
    /// back to a share of the LBM without impedance.
    pub fn muscle(&self, weight: f32, impedance: f32) -> f32 {
        if weight <= 0.0 {
            return 0.0;
        }

        let smm = if impedance > 0.0 {
            let h2_over_r = (self.height_cm * self.height_cm) / impedance;
            0.401 * h2_over_r + 3.825 * sex_factor(self.is_male) - 0.071 * self.age + 5.102
        } else {
            let ratio = if self.is_male { 0.52 } else { 0.46 };
            self.lbm(weight, impedance) * ratio
        };

        ((smm / weight) * 100.0).clamp(10.0, 60.0)
    }

    pub fn water(&self, weight: f32, impedance: f32) -> f32 {
        let water = (100.0 - self.body_fat(weight, impedance)) * 0.7;
        let coeff = if water < 50.0 { 1.02 } else { 0.98 };
        coeff * water
    }

    pub fn bone(&self, weight: f32, impedance: f32) -> f32 {
        let base = if self.is_male {
            0.18016894
        } else {
            0.245691014
        };
        let mut bone = (base - (self.lbm_coefficient(weight, impedance) * 0.05158)) * -1.0;

        bone = if bone > 2.2 { bone + 0.1 } else { bone - 0.1 };

        if (!self.is_male && bone > 5.1) || (self.is_male && bone > 5.2) {
            8.0
        } else {
            bone
        }
    }

    pub fn visceral_fat(&self, weight: f32) -> f32 {
        let height = self.height_cm;
        let age = self.age;

        if !self.is_male {
            if weight > (13.0 - (height * 0.5)) * -1.0 {
                let subsubcalc = ((height * 1.45) + (height * 0.1158) * height) - 120.0;
                let subcalc = weight * 500.0 / subsubcalc;
                (subcalc - 6.0) + (age * 0.07)
            } else {
                let subcalc = 0.691 + (height * -0.0024) + (height * -0.0024);
                (((height * 0.027) - (subcalc * weight)) * -1.0) + (age * 0.07) - age
            }
        } else if height < weight * 1.6 {
            let subcalc = ((height * 0.4) - (height * (height * 0.0826))) * -1.0;
            ((weight * 305.0) / (subcalc + 48.0)) - 2.9 + (age * 0.15)
        } else {
            let subcalc = 0.765 + height * -0.0015;
            (((height * 0.143) - (weight * subcalc)) * -1.0) + (age * 0.15) - 5.0
        }
    }

    pub fn body_fat(&self, weight: f32, impedance: f32) -> f32 {
        let lbm_sub = match (self.is_male, self.age <= 49.0) {
            (false, true) => 9.25,
            (false, false) => 7.25,
            (true, _) => 0.8,
        };

        let lbm_coeff = self.lbm_coefficient(weight, impedance);
        let mut coeff = 1.0;
        if self.is_male && weight < 61.0 {
            coeff = 0.98;
        } else if !self.is_male && weight > 60.0 {
            coeff = 0.96;
            if self.height_cm > 160.0 {
                coeff *= 1.03;
            }
        } else if !self.is_male && weight < 50.0 {
            coeff = 1.02;
            if self.height_cm > 160.0 {
                coeff *= 1.03;
            }
        }

        let body_fat = (1.0 - (((lbm_coeff - lbm_sub) * coeff) / weight)) * 100.0;
        if body_fat > 63.0 { 75.0 } else { body_fat }
    }
}

impl BodyComposition for MiScaleCalculator {
    fn new(profile: &UserProfile) -> Self {
        Self {
            is_male: profile.sex.is_male(),
            age: f32::from(profile.age),
            height_cm: profile.height_cm,
        }
    }

    fn compute(&self, raw: &RawReading) -> DerivedMetrics {
        let weight = raw.weight_kg;
        if weight <= 0.0 {
            return DerivedMetrics::default();
        }

        let bmi = self.bmi(weight);
        let Some(impedance) = raw.impedance.filter(|imp| *imp > 0.0) else {
            return DerivedMetrics {
                bmi,
                ..Default::default()
            };
        };

        DerivedMetrics {
            fat: self.body_fat(weight, impedance),
            water: self.water(weight, impedance),
            muscle: self.muscle(weight, impedance),
            bone: self.bone(weight, impedance),
            visceral_fat: self.visceral_fat(weight),
            lbm: self.lbm(weight, impedance),
            bmi,
            ..Default::default()
        }
    }
}
