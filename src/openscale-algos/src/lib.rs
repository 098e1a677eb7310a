pub(crate) mod composition;
pub use composition::BodyComposition;

pub(crate) mod body;
pub use body::Anthropometrics;

pub(crate) mod trisa;
pub use trisa::TrisaCalculator;

pub(crate) mod miscale;
pub use miscale::MiScaleCalculator;

pub(crate) mod onebyone;
pub use onebyone::{OneByoneCalculator, PeopleType};

pub(crate) mod onebyone_new;
pub use onebyone_new::OneByoneNewCalculator;

pub(crate) mod soehnle;
pub use soehnle::SoehnleCalculator;

pub(crate) mod yunmai;
pub use yunmai::YunmaiCalculator;
