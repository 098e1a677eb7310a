use openscale_types::{DerivedMetrics, RawReading, UserProfile};

use crate::composition::BodyComposition;

/// BMI-linear regressions of the Trisa Body Analyze app. QN scales feed the
/// same formulas with their own impedance-like value.
pub struct TrisaCalculator {
    is_male: bool,
    age: f32,
    height_cm: f32,
}

impl TrisaCalculator {
    pub fn bmi(&self, weight_kg: f32) -> f32 {
        weight_kg * 1e4 / (self.height_cm * self.height_cm)
    }

    pub fn water(&self, weight_kg: f32, impedance: f32) -> f32 {
        let bmi = self.bmi(weight_kg);
        if self.is_male {
            87.51 + (-1.162 * bmi - 0.00813 * impedance + 0.07594 * self.age)
        } else {
            77.721 + (-1.148 * bmi - 0.00573 * impedance + 0.06448 * self.age)
        }
    }

    pub fn fat(&self, weight_kg: f32, impedance: f32) -> f32 {
        let bmi = self.bmi(weight_kg);
        if self.is_male {
            bmi * (1.479 + 4.4e-4 * impedance) + 0.1 * self.age - 21.764
        } else {
            bmi * (1.506 + 3.908e-4 * impedance) + 0.1 * self.age - 12.834
        }
    }

    pub fn muscle(&self, weight_kg: f32, impedance: f32) -> f32 {
        let bmi = self.bmi(weight_kg);
        if self.is_male {
            74.627 + (-0.811 * bmi - 0.00565 * impedance - 0.367 * self.age)
        } else {
            57.0 + (-0.694 * bmi - 0.00344 * impedance - 0.255 * self.age)
        }
    }

    pub fn bone(&self, weight_kg: f32, impedance: f32) -> f32 {
        let bmi = self.bmi(weight_kg);
        if self.is_male {
            7.829 + (-0.0855 * bmi - 5.92e-4 * impedance - 0.0389 * self.age)
        } else {
            7.98 + (-0.0973 * bmi - 4.84e-4 * impedance - 0.036 * self.age)
        }
    }
}

impl BodyComposition for TrisaCalculator {
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
        match raw.impedance {
            Some(impedance) => DerivedMetrics {
                fat: self.fat(weight, impedance),
                water: self.water(weight, impedance),
                muscle: self.muscle(weight, impedance),
                bone: self.bone(weight, impedance),
                bmi,
                ..Default::default()
            },
            None => DerivedMetrics {
                bmi,
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use openscale_types::Sex;

    use super::*;

    const EPS: f32 = 1e-3;

    fn calculator(sex: Sex, age: u16, height: f32) -> TrisaCalculator {
        TrisaCalculator::new(&UserProfile::new(sex, age, height))
    }

    #[test]
    fn recorded_frame() {
        // impedance derived from R2 = 538.6
        let calc = calculator(Sex::Male, 36, 186.0);
        let raw = RawReading::new(76.0).with_impedance(Some(0.3 * (538.6 - 400.0)));
        let metrics = calc.compute(&raw);

        assert!((metrics.fat - 14.728368).abs() < EPS);
        assert!((metrics.water - 64.37914).abs() < EPS);
        assert!((metrics.muscle - 43.36414).abs() < EPS);
        assert!((metrics.bone - 4.525733).abs() < 1e-5);
    }

    #[test]
    fn regression_male() {
        let calc = calculator(Sex::Male, 30, 180.0);
        assert!((calc.bmi(80.0) - 24.691359).abs() < EPS);
        assert!((calc.water(80.0, 500.0) - 57.031845).abs() < EPS);
        assert!((calc.fat(80.0, 500.0) - 23.186619).abs() < EPS);
        assert!((calc.muscle(80.0, 500.0) - 40.767307).abs() < EPS);
        assert!((calc.bone(80.0, 500.0) - 4.254889).abs() < EPS);
    }

    #[test]
    fn regression_female() {
        let calc = calculator(Sex::Female, 28, 165.0);
        assert!((calc.bmi(60.0) - 22.038567).abs() < EPS);
        assert!((calc.water(60.0, 520.0) - 51.246567).abs() < EPS);
        assert!((calc.fat(60.0, 520.0) - 27.63467).abs() < EPS);
        assert!((calc.muscle(60.0, 520.0) - 32.776436).abs() < EPS);
        assert!((calc.bone(60.0, 520.0) - 4.575968).abs() < EPS);
    }

    #[test]
    fn impedance_directions() {
        for calc in [
            calculator(Sex::Male, 30, 180.0),
            calculator(Sex::Female, 30, 165.0),
        ] {
            assert!(calc.water(70.0, 700.0) < calc.water(70.0, 300.0));
            assert!(calc.muscle(70.0, 700.0) < calc.muscle(70.0, 300.0));
            assert!(calc.bone(70.0, 700.0) < calc.bone(70.0, 300.0));
            assert!(calc.fat(70.0, 700.0) > calc.fat(70.0, 300.0));
        }
    }

    #[test]
    fn no_impedance_keeps_bmi_only() {
        let calc = calculator(Sex::Male, 30, 180.0);
        let metrics = calc.compute(&RawReading::new(80.0));
        assert!((metrics.bmi - 24.691359).abs() < EPS);
        assert_eq!(metrics.fat, 0.0);
        assert_eq!(metrics.water, 0.0);
    }

    #[test]
    fn zero_weight() {
        let calc = calculator(Sex::Male, 30, 180.0);
        let raw = RawReading::new(0.0).with_impedance(Some(30.0));
        assert!(calc.compute(&raw).is_empty());
    }
}
