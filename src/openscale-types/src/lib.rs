#[macro_use]
extern crate serde;

pub(crate) mod profile;
pub use profile::{ActivityLevel, Sex, UserProfile};

pub(crate) mod units;
pub use units::{LengthUnit, WeightUnit};

pub(crate) mod vendor;
pub use vendor::VendorId;

pub(crate) mod reading;
pub use reading::{RawExtras, RawReading};

pub(crate) mod measurement;
pub use measurement::{DecodedMeasurement, DerivedMetrics};
