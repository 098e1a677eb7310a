use strum::{Display, EnumIter, EnumString};

use crate::units::WeightUnit;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    /// Storage encoding, male is 0.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Male),
            1 => Some(Self::Female),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Self::Male => 0,
            Self::Female => 1,
        }
    }

    pub fn is_male(self) -> bool {
        self == Self::Male
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Mild,
    Moderate,
    Heavy,
    Extreme,
}

impl ActivityLevel {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Sedentary),
            1 => Some(Self::Mild),
            2 => Some(Self::Moderate),
            3 => Some(Self::Heavy),
            4 => Some(Self::Extreme),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Self::Sedentary => 0,
            Self::Mild => 1,
            Self::Moderate => 2,
            Self::Heavy => 3,
            Self::Extreme => 4,
        }
    }
}

/// Snapshot of the person standing on the scale, resolved by the caller at
/// measurement time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub sex: Sex,
    /// Whole years, already derived from the birthday.
    pub age: u16,
    /// Zero or negative means the height is unknown.
    pub height_cm: f32,
    pub activity: ActivityLevel,
    pub unit: WeightUnit,
}

impl UserProfile {
    pub fn new(sex: Sex, age: u16, height_cm: f32) -> Self {
        Self {
            sex,
            age,
            height_cm,
            ..Default::default()
        }
    }

    pub fn with_activity(self, activity: ActivityLevel) -> Self {
        Self { activity, ..self }
    }

    pub fn with_unit(self, unit: WeightUnit) -> Self {
        Self { unit, ..self }
    }

    /// Formulas divide by height, so profiles without one are skipped.
    pub fn is_usable(&self) -> bool {
        self.height_cm.is_finite() && self.height_cm > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn sex_storage_roundtrip() {
        for sex in Sex::iter() {
            assert_eq!(Sex::from_u8(sex.as_u8()), Some(sex));
        }
        assert_eq!(Sex::Male.as_u8(), 0);
        assert_eq!(Sex::Female.as_u8(), 1);
        assert!(Sex::from_u8(2).is_none());
    }

    #[test]
    fn activity_levels_are_ordinal() {
        let levels: Vec<u8> = ActivityLevel::iter().map(ActivityLevel::as_u8).collect();
        assert_eq!(levels, vec![0, 1, 2, 3, 4]);
        assert!(ActivityLevel::from_u8(5).is_none());
        assert!(ActivityLevel::Heavy > ActivityLevel::Moderate);
    }

    #[test]
    fn parse_from_cli_strings() {
        assert_eq!(Sex::from_str("Female").unwrap(), Sex::Female);
        assert_eq!(
            ActivityLevel::from_str("extreme").unwrap(),
            ActivityLevel::Extreme
        );
        assert!(Sex::from_str("unknown").is_err());
    }

    #[test]
    fn default_profile_is_not_usable() {
        assert!(!UserProfile::default().is_usable());
        assert!(!UserProfile::new(Sex::Male, 30, -1.0).is_usable());
        assert!(!UserProfile::new(Sex::Male, 30, f32::NAN).is_usable());
        assert!(UserProfile::new(Sex::Male, 30, 180.0).is_usable());
    }

    #[test]
    fn profile_serializes_lowercase_enums() {
        let profile = UserProfile::new(Sex::Female, 28, 165.0).with_activity(ActivityLevel::Mild);
        let json = serde_json::to_value(profile).unwrap();
        assert_eq!(json["sex"], "female");
        assert_eq!(json["activity"], "mild");
        assert_eq!(json["unit"], "kg");
    }
}
