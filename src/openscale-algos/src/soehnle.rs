use openscale_types::{ActivityLevel, DerivedMetrics, RawExtras, RawReading, UserProfile};

use crate::{body::Anthropometrics, composition::BodyComposition};

/// Soehnle Shape formulas. Fat and water use the 50 kHz impedance, muscle
/// combines it with the 5 kHz one.
pub struct SoehnleCalculator {
    profile: UserProfile,
    /// Soehnle activity scale. 3 is never sent.
    activity: u8,
}

fn activity_scale(level: ActivityLevel) -> u8 {
    match level {
        ActivityLevel::Sedentary => 0,
        ActivityLevel::Mild => 1,
        ActivityLevel::Moderate => 2,
        ActivityLevel::Heavy => 4,
        ActivityLevel::Extreme => 5,
    }
}

impl SoehnleCalculator {
    fn is_male(&self) -> bool {
        self.profile.sex.is_male()
    }

    fn age(&self) -> f32 {
        f32::from(self.profile.age)
    }

    pub fn bmi(&self, weight: f32) -> f32 {
        let height = self.profile.height_cm;
        10000.0 * weight / (height * height)
    }

    pub fn fat(&self, weight: f32, imp50: f32) -> f32 {
        let activity_corr = match (self.activity, self.is_male()) {
            (4, true) => 2.5,
            (4, false) => 2.3,
            (5, true) => 4.3,
            (5, false) => 4.1,
            _ => 0.0,
        };

        let (sex_corr, activity_sex_div) = if self.is_male() {
            (0.250, 65.5)
        } else {
            (0.214, 55.1)
        };

        let height = self.profile.height_cm;
        1.847 * weight * 10000.0 / (height * height) + sex_corr * self.age() + 0.062 * imp50
            - (activity_sex_div - activity_corr)
    }

    pub fn water(&self, weight: f32, imp50: f32) -> f32 {
        let activity_corr = match (self.activity, self.is_male()) {
            (1..=3, true) => 2.83,
            (4, true) => 3.93,
            (4, false) => 0.4,
            (5, true) => 5.33,
            (5, false) => 1.4,
            _ => 0.0,
        };

        let height = self.profile.height_cm;
        (0.3674 * height * height / imp50 + 0.17530 * weight - 0.11 * self.age()
            + (6.53 + activity_corr))
            / weight
            * 100.0
    }

    pub fn muscle(&self, weight: f32, imp50: f32, imp5: f32) -> f32 {
        let activity_corr = match (self.activity, self.is_male()) {
            (1..=3, true) => 3.6224,
            (4, true) => 4.3904,
            (5, true) => 5.4144,
            (5, false) => 1.664,
            _ => 0.0,
        };

        let height = self.profile.height_cm;
        ((0.47027 / imp50 - 0.24196 / imp5) * height * height + 0.13796 * weight
            - 0.1152 * self.age()
            + (5.12 + activity_corr))
            / weight
            * 100.0
    }
}

impl BodyComposition for SoehnleCalculator {
    fn new(profile: &UserProfile) -> Self {
        Self {
            profile: *profile,
            activity: activity_scale(profile.activity),
        }
    }

    fn compute(&self, raw: &RawReading) -> DerivedMetrics {
        let weight = raw.weight_kg;
        if weight <= 0.0 {
            return DerivedMetrics::default();
        }

        let mut metrics = DerivedMetrics {
            bmi: self.bmi(weight),
            bmr: Anthropometrics::bmr(&self.profile, weight),
            ..Default::default()
        };

        if let Some(imp50) = raw.impedance.filter(|imp| *imp > 0.0) {
            metrics.fat = self.fat(weight, imp50);
            metrics.water = self.water(weight, imp50);
            if let RawExtras::Soehnle { imp5, .. } = raw.extras {
                if imp5 > 0.0 {
                    metrics.muscle = self.muscle(weight, imp50, imp5);
                }
            }
        }

        metrics
    }
}

#[cfg(test)]
mod tests {
    use openscale_types::Sex;

    use super::*;

    const EPS: f32 = 1e-3;

    fn calculator(sex: Sex, age: u16, height: f32, activity: u8) -> SoehnleCalculator {
        SoehnleCalculator {
            activity,
            ..SoehnleCalculator::new(&UserProfile::new(sex, age, height))
        }
    }

    #[test]
    fn regression_fixtures() {
        // (sex, age, height, weight, imp50, imp5, activity) -> (bmi, fat, water, muscle)
        let fixtures: [((Sex, u16, f32, f32, f32, f32, u8), [f32; 4]); 4] = [
            (
                (Sex::Male, 30, 180.0, 80.0, 500.0, 200.0, 3),
                [24.691359, 18.604935, 54.8644, 9.49897],
            ),
            (
                (Sex::Female, 28, 165.0, 60.0, 520.0, 210.0, 4),
                [22.038567, 26.137234, 56.005848, 5.708269],
            ),
            (
                (Sex::Male, 35, 178.0, 85.0, 480.0, 190.0, 5),
                [26.827421, 26.860249, 55.484665, 10.4964695],
            ),
            (
                (Sex::Female, 45, 160.0, 70.0, 700.0, 250.0, 1),
                [27.34375, 48.433907, 38.981922, 2.8784876],
            ),
        ];

        for ((sex, age, height, w, imp50, imp5, activity), expected) in fixtures {
            let calc = calculator(sex, age, height, activity);
            let actual = [
                calc.bmi(w),
                calc.fat(w, imp50),
                calc.water(w, imp50),
                calc.muscle(w, imp50, imp5),
            ];
            for (a, e) in actual.iter().zip(expected) {
                assert!((a - e).abs() < EPS, "{sex:?} {age}: {a} != {e}");
            }
        }
    }

    #[test]
    fn activity_scale_skips_three() {
        let profile = UserProfile::new(Sex::Male, 30, 180.0);
        let expected = [
            (ActivityLevel::Sedentary, 0),
            (ActivityLevel::Mild, 1),
            (ActivityLevel::Moderate, 2),
            (ActivityLevel::Heavy, 4),
            (ActivityLevel::Extreme, 5),
        ];
        for (level, activity) in expected {
            let calc = SoehnleCalculator::new(&profile.with_activity(level));
            assert_eq!(calc.activity, activity, "{level}");
        }
    }

    #[test]
    fn sedentary_male_has_no_correction() {
        let calc = SoehnleCalculator::new(&UserProfile::new(Sex::Male, 30, 180.0));
        assert!((calc.water(80.0, 500.0) - 51.3269).abs() < EPS);
        assert!((calc.muscle(80.0, 500.0, 200.0) - 4.9709697).abs() < EPS);

        let mild = calculator(Sex::Male, 30, 180.0, 1);
        assert!((mild.water(80.0, 500.0) - 54.8644).abs() < EPS);
    }

    #[test]
    fn activity_correction_raises_fat_and_water() {
        let idle = calculator(Sex::Male, 40, 182.0, 2);
        let active = calculator(Sex::Male, 40, 182.0, 5);
        let fat_gap = active.fat(82.0, 500.0) - idle.fat(82.0, 500.0);
        assert!((fat_gap - 4.3).abs() < EPS);
        assert!(active.water(82.0, 500.0) > idle.water(82.0, 500.0));
    }

    #[test]
    fn compute_needs_imp50() {
        let calc = calculator(Sex::Male, 30, 180.0, 3);
        let raw = RawReading::new(80.0).with_extras(RawExtras::Soehnle {
            user_index: 1,
            imp5: 200.0,
        });

        let metrics = calc.compute(&raw);
        assert_eq!(metrics.fat, 0.0);
        assert!((metrics.bmi - 24.691359).abs() < EPS);
        assert!(metrics.bmr > 0.0);

        let metrics = calc.compute(&raw.with_impedance(Some(500.0)));
        assert!((metrics.fat - 18.604935).abs() < EPS);
        assert!((metrics.water - 54.8644).abs() < EPS);
        assert!((metrics.muscle - 9.49897).abs() < EPS);
    }
}
