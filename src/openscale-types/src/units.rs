use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
    St,
}

impl WeightUnit {
    /// Pounds per kilogram.
    pub const KG_LB: f32 = 2.20462;
    /// Stones per kilogram.
    pub const KG_ST: f32 = 0.157473;

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Kg),
            1 => Some(Self::Lb),
            2 => Some(Self::St),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Self::Kg => 0,
            Self::Lb => 1,
            Self::St => 2,
        }
    }

    pub fn to_kilogram(self, value: f32) -> f32 {
        match self {
            Self::Kg => value,
            Self::Lb => value / Self::KG_LB,
            Self::St => value / Self::KG_ST,
        }
    }

    pub fn from_kilogram(self, kg: f32) -> f32 {
        match self {
            Self::Kg => kg,
            Self::Lb => kg * Self::KG_LB,
            Self::St => kg * Self::KG_ST,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LengthUnit {
    #[default]
    Cm,
    Inch,
}

impl LengthUnit {
    /// Inches per centimeter.
    pub const CM_IN: f32 = 0.393701;

    pub fn to_centimeter(self, value: f32) -> f32 {
        match self {
            Self::Cm => value,
            Self::Inch => value / Self::CM_IN,
        }
    }

    pub fn from_centimeter(self, cm: f32) -> f32 {
        match self {
            Self::Cm => cm,
            Self::Inch => cm * Self::CM_IN,
        }
    }
}
