use openscale_types::{ActivityLevel, DerivedMetrics, RawReading, UserProfile};

use crate::composition::{BodyComposition, sex_factor};

/// Activity class used by the 1byone (Holtek) formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeopleType {
    Low,
    Medium,
    High,
}

impl PeopleType {
    pub fn from_activity(activity: ActivityLevel) -> Self {
        match activity {
            ActivityLevel::Sedentary | ActivityLevel::Mild => Self::Low,
            ActivityLevel::Moderate => Self::Medium,
            ActivityLevel::Heavy | ActivityLevel::Extreme => Self::High,
        }
    }

    fn coefficient(self) -> f32 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 1.0427,
            Self::High => 1.0958,
        }
    }
}

pub struct OneByoneCalculator {
    is_male: bool,
    age: f32,
    height_cm: f32,
    people_type: PeopleType,
}

impl OneByoneCalculator {
    pub fn bmi(&self, weight: f32) -> f32 {
        weight / (((self.height_cm * self.height_cm) / 100.0) / 100.0)
    }

    pub fn lbm(&self, weight: f32, body_fat: f32) -> f32 {
        weight - (body_fat / 100.0 * weight)
    }

    /// Muscle in percent of body weight; the inner sum runs in double
    /// precision like the vendor library.
    pub fn muscle(&self, weight: f32, impedance: f32) -> f32 {
        let h2_over_r = f64::from(self.height_cm * self.height_cm / impedance);
        let muscle = h2_over_r * 0.401 + f64::from(sex_factor(self.is_male)) * 3.825
            - f64::from(self.age) * 0.071
            + 5.102;
        muscle as f32 / weight * 100.0
    }

    pub fn water(&self, body_fat: f32) -> f32 {
        let water = (100.0 - body_fat) * 0.7;
        let coeff = if water < 50.0 { 1.02 } else { 0.98 };
        coeff * water
    }

    /// Bone mass in kg, clamped to [0.5, 8].
    pub fn bone(&self, weight: f32, impedance: f32) -> f32 {
        let height = self.height_cm;
        let mut bone = (9.058 * (height / 100.0) * (height / 100.0) + 12.226 + (0.32 * weight))
            - (0.0068 * impedance);

        let sex_const = if self.is_male { 3.49305 } else { 4.76325 };
        bone = bone - sex_const - (self.age * 0.0542) * self.people_type.coefficient();

        bone = if bone <= 2.2 { bone - 0.1 } else { bone + 0.1 };
        (bone * 0.05158).clamp(0.5, 8.0)
    }

    pub fn visceral_fat(&self, weight: f32) -> f32 {
        let height = self.height_cm;
        let age = self.age;

        let visceral_fat = if self.is_male {
            if height < (1.6 * weight) + 63.0 {
                (((weight * 305.0) / (0.0826 * height * height - (0.4 * height) + 48.0)) - 2.9)
                    + (age * 0.15)
            } else {
                ((age * 0.15) + ((weight * (-0.0015 * height + 0.765)) - height * 0.143)) - 5.0
            }
        } else if ((0.5 * height) - 13.0) > weight {
            ((age * 0.07) + ((weight * (-0.0024 * height + 0.691)) - (height * 0.027))) - 10.5
        } else {
            (weight * 500.0) / (((1.45 * height) + 0.1158 * height * height) - 120.0) - 6.0
                + (age * 0.07)
        };

        match self.people_type {
            PeopleType::Low => visceral_fat,
            _ => self.adjust_visceral_fat(visceral_fat),
        }
    }

    fn adjust_visceral_fat(&self, visceral_fat: f32) -> f32 {
        if self.people_type != PeopleType::Low {
            if 10.0 <= visceral_fat {
                Self::scale_visceral_fat(visceral_fat)
            } else {
                visceral_fat - 4.0
            }
        } else if 10.0 > visceral_fat {
            visceral_fat - 2.0
        } else {
            Self::scale_visceral_fat(visceral_fat)
        }
    }

    fn scale_visceral_fat(visceral_fat: f32) -> f32 {
        if visceral_fat < 10.0 || 20.0 < visceral_fat {
            visceral_fat * 0.85
        } else {
            visceral_fat * 0.8
        }
    }

    /// Body fat in percent, clamped to [1, 45].
    pub fn body_fat(&self, weight: f32, impedance: f32) -> f32 {
        let impedance_const = if impedance >= 1200.0 {
            8.16
        } else if impedance >= 200.0 {
            0.0068 * impedance
        } else if impedance >= 50.0 {
            1.36
        } else {
            0.0
        };

        let height = self.height_cm;
        let mut body = (9.058 * height) / 100.0;
        body *= height;
        body = body / 100.0 + 12.226;
        body += 0.32 * weight;
        body -= impedance_const;

        let age_const = match (self.is_male, self.age > 49.0) {
            (true, _) => 0.8,
            (false, true) => 7.25,
            (false, false) => 9.25,
        };

        body -= age_const;
        body -= self.age * 0.0542;
        body *= self.people_type.coefficient();

        if self.is_male {
            if 61.0 > weight {
                body *= 0.98;
            }
        } else {
            if 50.0 > weight {
                body *= 1.02;
            }
            if weight > 60.0 {
                body *= 0.96;
            }
            if height > 160.0 {
                body *= 1.03;
            }
        }

        body /= weight;
        (100.0 * (1.0 - body)).clamp(1.0, 45.0)
    }
}

impl BodyComposition for OneByoneCalculator {
    fn new(profile: &UserProfile) -> Self {
        Self {
            is_male: profile.sex.is_male(),
            age: f32::from(profile.age),
            height_cm: profile.height_cm,
            people_type: PeopleType::from_activity(profile.activity),
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

        let fat = self.body_fat(weight, impedance);
        DerivedMetrics {
            fat,
            water: self.water(fat),
            muscle: self.muscle(weight, impedance),
            bone: self.bone(weight, impedance),
            visceral_fat: self.visceral_fat(weight),
            lbm: self.lbm(weight, fat),
            bmi,
            ..Default::default()
        }
    }
}
