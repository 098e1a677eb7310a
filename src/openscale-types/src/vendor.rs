use strum::{Display, EnumIter, EnumString};

/// Scale protocol family. Selects both the frame layout and the formula set.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum VendorId {
    #[serde(rename = "trisa")]
    #[strum(serialize = "trisa")]
    Trisa,
    #[serde(rename = "miscale")]
    #[strum(serialize = "miscale")]
    MiScale,
    #[serde(rename = "onebyone")]
    #[strum(serialize = "onebyone")]
    OneByone,
    #[serde(rename = "onebyone-new")]
    #[strum(serialize = "onebyone-new")]
    OneByoneNew,
    #[serde(rename = "soehnle")]
    #[strum(serialize = "soehnle")]
    Soehnle,
    #[serde(rename = "yunmai")]
    #[strum(serialize = "yunmai")]
    Yunmai,
    #[serde(rename = "qn")]
    #[strum(serialize = "qn")]
    QnScale,
}
