use openscale_types::{RawReading, UserProfile, VendorId};

use crate::error::DecodeError;

mod trisa;
pub use trisa::{TrisaCommand, TrisaParser, TrisaUpload};

mod miscale;
pub use miscale::{MiScaleHistoryParser, MiScaleParser};

mod onebyone;
pub use onebyone::OneByoneParser;

mod onebyone_new;
pub use onebyone_new::{OneByoneNewFrame, OneByoneNewParser};

mod soehnle;
pub use soehnle::SoehnleParser;

mod yunmai;
pub use yunmai::YunmaiParser;

mod qn;
pub use qn::{QnFrame, QnParser};

/// Stateless decoder for one vendor's measurement notifications.
pub trait FrameParser {
    const VENDOR: VendorId;

    /// Decodes a single notification payload. `profile` is only consulted by
    /// protocols that gate raw fields on the user record.
    fn parse(frame: &[u8], profile: Option<&UserProfile>) -> Result<RawReading, DecodeError>;

    /// Splits a notification that may pack several frames. Most vendors send
    /// exactly one frame per notification.
    fn split(notification: &[u8]) -> Vec<&[u8]> {
        vec![notification]
    }
}

pub(crate) fn ensure_len(frame: &[u8], min: usize) -> Result<(), DecodeError> {
    if frame.len() < min {
        return Err(DecodeError::FrameTooShort);
    }
    Ok(())
}

pub(crate) fn is_bit_set(value: u8, bit: u8) -> bool {
    value & (1 << bit) != 0
}
