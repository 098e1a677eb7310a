use openscale_types::UserProfile;

/// Profile-only quantities shared by several vendors.
pub struct Anthropometrics;

impl Anthropometrics {
    /// kg / m². Zero when the height is unknown.
    pub fn bmi(weight_kg: f32, height_cm: f32) -> f32 {
        if height_cm <= 0.0 {
            return 0.0;
        }
        weight_kg / (((height_cm * height_cm) / 100.0) / 100.0)
    }

    /// Revised Harris-Benedict equation (Roza & Shizgal, 1984), in kcal/day.
    pub fn bmr(profile: &UserProfile, weight_kg: f32) -> f32 {
        let weight = f64::from(weight_kg);
        let height = f64::from(profile.height_cm);
        let age = f64::from(profile.age);

        let bmr = if profile.sex.is_male() {
            88.362 + 13.397 * weight + 4.799 * height - 5.677 * age
        } else {
            447.593 + 9.247 * weight + 3.098 * height - 4.330 * age
        };
        bmr.max(0.0) as f32
    }
}
