use openscale_types::{DerivedMetrics, RawReading, UserProfile};

use crate::composition::BodyComposition;

/// Formulas of the newer 1byone app. Every reported metric is bounded after
/// it is computed.
///
/// Several terms are evaluated in double precision and narrowed again, which
/// the regression values depend on.
pub struct OneByoneNewCalculator {
    is_male: bool,
    age: u16,
    height_cm: f32,
}

impl OneByoneNewCalculator {
    pub const BMI_BOUNDS: (f32, f32) = (10.0, 90.0);
    pub const BMR_BOUNDS: (f32, f32) = (500.0, 1000.0);
    pub const BONE_BOUNDS: (f32, f32) = (0.5, 8.0);
    pub const MUSCLE_MASS_BOUNDS: (f32, f32) = (10.0, 120.0);
    pub const VISCERAL_FAT_BOUNDS: (f32, f32) = (1.0, 50.0);
    pub const WATER_BOUNDS: (f32, f32) = (35.0, 75.0);

    fn bounded(value: f32, (lower, upper): (f32, f32)) -> f32 {
        if value < lower {
            lower
        } else if value > upper {
            upper
        } else {
            value
        }
    }

    fn age_f32(&self) -> f32 {
        f32::from(self.age)
    }

    pub fn bmi(&self, weight: f32) -> f32 {
        let bmi = weight / (((self.height_cm * self.height_cm) / 100.0) / 100.0);
        Self::bounded(bmi, Self::BMI_BOUNDS)
    }

    /// Lean body mass coefficient in kg; not bounded.
    pub fn lbm(&self, weight: f32, impedance: i32) -> f32 {
        let mut lbm = self.height_cm / 100.0 * self.height_cm / 100.0 * 9.058;
        lbm += 12.226;
        lbm += (f64::from(weight) * 0.32) as f32;
        lbm -= (f64::from(impedance) * 0.0068) as f32;
        lbm -= (f64::from(self.age) * 0.0542) as f32;
        lbm
    }

    pub fn bmr_coefficient(&self) -> f32 {
        let age = self.age;
        let coeff = if self.is_male {
            match age {
                0..13 => 36,
                13..16 => 30,
                16..18 => 26,
                18..30 => 23,
                50.. => 20,
                _ => 21,
            }
        } else {
            match age {
                0..13 => 34,
                13..16 => 29,
                16..18 => 24,
                18..30 => 22,
                50.. => 19,
                _ => 20,
            }
        };
        coeff as f32
    }

    pub fn bmr(&self, weight: f32) -> f32 {
        let bmr = if self.is_male {
            (weight * 14.916 + 877.8) - self.height_cm * 0.726 - (f64::from(self.age) * 8.976) as f32
        } else {
            (weight * 10.2036 + 864.6) - self.height_cm * 0.39336
                - (f64::from(self.age) * 6.204) as f32
        };
        Self::bounded(bmr, Self::BMR_BOUNDS)
    }

    pub fn body_fat(&self, weight: f32, impedance: i32) -> f32 {
        let mut body_fat = self.lbm(weight, impedance);

        let body_fat_const = match (self.is_male, self.age < 50) {
            (true, _) => 0.8,
            (false, true) => 9.25,
            (false, false) => 7.25,
        };
        body_fat -= body_fat_const;

        if self.is_male {
            if weight < 61.0 {
                body_fat *= 0.98;
            }
        } else {
            if weight < 50.0 {
                body_fat *= 1.02;
            } else if weight > 60.0 {
                body_fat *= 0.96;
            }

            if self.height_cm > 160.0 {
                body_fat *= 1.03;
            }
        }

        100.0 * (1.0 - body_fat / weight)
    }

    pub fn bone(&self, weight: f32, impedance: i32) -> f32 {
        let base = if self.is_male {
            0.18016894
        } else {
            0.245691014
        };
        let bone = self.lbm(weight, impedance) * 0.05158 - base;
        let bone = if f64::from(bone) <= 2.2 {
            bone - 0.1
        } else {
            bone + 0.1
        };
        Self::bounded(bone, Self::BONE_BOUNDS)
    }

    /// Muscle mass in kg.
    pub fn muscle_mass(&self, weight: f32, impedance: i32) -> f32 {
        let mut muscle = weight - self.body_fat(weight, impedance) * 0.01 * weight;
        muscle -= self.bone(weight, impedance);
        Self::bounded(muscle, Self::MUSCLE_MASS_BOUNDS)
    }

    pub fn skeletal_muscle(&self, weight: f32, impedance: i32) -> f32 {
        let mut muscle = self.water(weight, impedance);
        muscle *= weight;
        muscle *= 0.8422 * 0.01;
        muscle -= 2.9903;
        muscle /= weight;
        muscle * 100.0
    }

    pub fn visceral_fat(&self, weight: f32) -> f32 {
        let height = self.height_cm;
        let age = self.age_f32();
        let (weight_d, height_d) = (f64::from(weight), f64::from(height));

        let visceral_fat = if self.is_male {
            if height_d < weight_d * 1.6 + 63.0 {
                age * 0.15
                    + ((weight * 305.0) / ((height * 0.0826 * height - height * 0.4) + 48.0) - 2.9)
            } else {
                age * 0.15 + (weight * (height * -0.0015 + 0.765) - height * 0.143) - 5.0
            }
        } else if weight_d <= height_d * 0.5 - 13.0 {
            age * 0.07 + (weight * (height * -0.0024 + 0.691) - height * 0.027) - 10.5
        } else {
            age * 0.07
                + ((weight * 500.0) / ((height * 1.45 + height * 0.1158 * height) - 120.0) - 6.0)
        };

        Self::bounded(visceral_fat, Self::VISCERAL_FAT_BOUNDS)
    }

    pub fn water(&self, weight: f32, impedance: i32) -> f32 {
        let mut water = (100.0 - self.body_fat(weight, impedance)) * 0.7;
        if water > 50.0 {
            water *= 0.98;
        } else {
            water *= 1.02;
        }
        Self::bounded(water, Self::WATER_BOUNDS)
    }

    pub fn protein(&self, weight: f32, impedance: i32) -> f32 {
        ((100.0 - self.body_fat(weight, impedance)) - self.water(weight, impedance) * 1.08)
            - (self.bone(weight, impedance) / weight) * 100.0
    }
}

impl BodyComposition for OneByoneNewCalculator {
    fn new(profile: &UserProfile) -> Self {
        Self {
            is_male: profile.sex.is_male(),
            age: profile.age,
            height_cm: profile.height_cm,
        }
    }

    fn compute(&self, raw: &RawReading) -> DerivedMetrics {
        let weight = raw.weight_kg;
        if weight <= 0.0 {
            return DerivedMetrics::default();
        }

        let bmi = self.bmi(weight);
        let bmr = self.bmr(weight);
        let Some(impedance) = raw.impedance.filter(|imp| *imp > 0.0) else {
            return DerivedMetrics {
                bmi,
                bmr,
                ..Default::default()
            };
        };

        let impedance = impedance.round() as i32;
        let skeletal_muscle = self.skeletal_muscle(weight, impedance);
        DerivedMetrics {
            fat: self.body_fat(weight, impedance),
            water: self.water(weight, impedance),
            muscle: skeletal_muscle,
            bone: self.bone(weight, impedance),
            visceral_fat: self.visceral_fat(weight),
            bmi,
            lbm: self.lbm(weight, impedance),
            bmr,
            skeletal_muscle,
            protein: self.protein(weight, impedance),
        }
    }
}
