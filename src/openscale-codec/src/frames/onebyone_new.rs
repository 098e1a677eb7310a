use chrono::{DateTime, Utc};
use openscale_types::{RawReading, UserProfile, VendorId};

use crate::{
    converters::{u8_at, u16_be, u24_be, u32_be},
    error::DecodeError,
    frames::{FrameParser, ensure_len},
};

/// Frames sent by 1byone "new" scales on characteristic `FFB2`.
///
/// All frames are 20 bytes long, start with `AB 2A` and carry the message
/// type at offset 2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OneByoneNewFrame {
    /// Settled weight; the impedance follows in a separate frame.
    FinalWeight { weight_kg: f32 },
    /// Impedance for the pending final weight.
    Impedance(u16),
    /// Stored measurement with its own clock.
    History {
        timestamp: DateTime<Utc>,
        weight_kg: f32,
        impedance: u16,
    },
    /// Streaming weight while the user is still stepping on.
    RealTime,
}

impl OneByoneNewFrame {
    pub const LENGTH: usize = 20;
    const HEADER: [u8; 2] = [0xAB, 0x2A];
    const WEIGHT_MASK: u32 = 0x03_FFFF;
    const HISTORY_MARKER: u8 = 0x80;

    fn weight(raw: u32) -> f32 {
        (raw & Self::WEIGHT_MASK) as f32 / 1000.0
    }

    pub fn from_data(data: &[u8]) -> Result<Self, DecodeError> {
        ensure_len(data, Self::LENGTH)?;
        if data[..2] != Self::HEADER {
            return Err(DecodeError::InvalidFrame);
        }

        match u8_at(data, 2)? {
            0x80 => Ok(Self::FinalWeight {
                weight_kg: Self::weight(u24_be(data, 3)?),
            }),
            0x01 => Ok(Self::Impedance(u16_be(data, 4)?)),
            0x00 if u8_at(data, 7)? == Self::HISTORY_MARKER => {
                let epoch_seconds = u32_be(data, 3)?;
                let timestamp = DateTime::from_timestamp(i64::from(epoch_seconds), 0)
                    .ok_or(DecodeError::InvalidDate)?;
                Ok(Self::History {
                    timestamp,
                    weight_kg: Self::weight(u24_be(data, 8)?),
                    impedance: u16_be(data, 15)?,
                })
            }
            0x00 => Ok(Self::RealTime),
            _ => Err(DecodeError::InvalidFrame),
        }
    }
}

/// Final-weight frames yield a weight-only reading; the caller attaches the
/// impedance from the following [`OneByoneNewFrame::Impedance`] frame.
pub struct OneByoneNewParser;

impl FrameParser for OneByoneNewParser {
    const VENDOR: VendorId = VendorId::OneByoneNew;

    fn parse(frame: &[u8], _profile: Option<&UserProfile>) -> Result<RawReading, DecodeError> {
        match OneByoneNewFrame::from_data(frame)? {
            OneByoneNewFrame::FinalWeight { weight_kg } => Ok(RawReading::new(weight_kg)),
            OneByoneNewFrame::History {
                timestamp,
                weight_kg,
                impedance,
            } => Ok(RawReading::new(weight_kg)
                .with_impedance(Some(f32::from(impedance)).filter(|imp| *imp > 0.0))
                .with_device_timestamp(Some(timestamp.timestamp()))
                .with_timestamp(Some(timestamp))),
            OneByoneNewFrame::Impedance(_) | OneByoneNewFrame::RealTime => {
                debug!("onebyone new: frame carries no final weight");
                Err(DecodeError::Unstable)
            }
        }
    }
}
