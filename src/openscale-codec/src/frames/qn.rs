use chrono::{DateTime, Utc};
use openscale_types::{RawExtras, RawReading, UserProfile, VendorId, WeightUnit};

use crate::{
    converters::{DeviceEpoch, u8_at, u16_be},
    error::DecodeError,
    frames::{FrameParser, TrisaParser, ensure_len},
};

/// Notifications of QN / FITINDEX scales on `FFE1` or `FFF1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QnFrame {
    /// Opcode `10`: weight plus two resistances.
    Live {
        weight_kg: f32,
        stable: bool,
        r1: u16,
        r2: u16,
    },
    /// Opcode `12`: announces the weight divider used by `Live` frames.
    Info { weight_divider: f32 },
}

impl QnFrame {
    const LIVE: u8 = 0x10;
    const INFO: u8 = 0x12;
    const LIVE_LENGTH: usize = 10;
    const INFO_LENGTH: usize = 11;

    pub const DEFAULT_DIVIDER: f32 = 100.0;

    /// Readings outside this window were sent with a divider of ten.
    fn plausible(weight: f32) -> bool {
        weight > 5.0 && weight < 250.0
    }

    pub fn from_data(data: &[u8], weight_divider: f32) -> Result<Self, DecodeError> {
        match u8_at(data, 0).map_err(|_| DecodeError::FrameTooShort)? {
            Self::LIVE => {
                ensure_len(data, Self::LIVE_LENGTH)?;
                let raw = f32::from(u16_be(data, 3)?);
                let mut weight_kg = raw / weight_divider;
                if !Self::plausible(weight_kg) {
                    weight_kg = raw / 10.0;
                }
                Ok(Self::Live {
                    weight_kg,
                    stable: u8_at(data, 5)? == 1,
                    r1: u16_be(data, 6)?,
                    r2: u16_be(data, 8)?,
                })
            }
            Self::INFO => {
                ensure_len(data, Self::INFO_LENGTH)?;
                let weight_divider = if u8_at(data, 10)? == 1 { 100.0 } else { 10.0 };
                Ok(Self::Info { weight_divider })
            }
            _ => Err(DecodeError::InvalidFrame),
        }
    }
}

pub struct QnParser;

impl QnParser {
    /// Decodes a live frame with the divider learned from a prior
    /// [`QnFrame::Info`].
    pub fn parse_with_divider(
        frame: &[u8],
        weight_divider: f32,
    ) -> Result<RawReading, DecodeError> {
        let QnFrame::Live {
            weight_kg,
            stable,
            r1,
            r2,
        } = QnFrame::from_data(frame, weight_divider)?
        else {
            debug!("qn: info frame carries no weight");
            return Err(DecodeError::Unstable);
        };

        if !stable {
            return Err(DecodeError::Unstable);
        }
        if weight_kg <= 0.0 {
            return Err(DecodeError::InvalidFrame);
        }

        let r1 = f32::from(r1);
        Ok(RawReading::new(weight_kg)
            .with_impedance(Some(TrisaParser::impedance_from_resistance(r1)))
            .with_extras(RawExtras::Qn {
                r1,
                r2: f32::from(r2),
                weight_divider,
            }))
    }

    /// `02` followed by seconds since 2000-01-01 (i32 LE).
    pub fn time_command(now: DateTime<Utc>) -> Result<[u8; 5], DecodeError> {
        let seconds = DeviceEpoch::QN.from_epoch_ms(now.timestamp_millis());
        let seconds = i32::try_from(seconds).map_err(|_| DecodeError::OutOfRange)?;
        let mut payload = [0x02, 0, 0, 0, 0];
        payload[1..].copy_from_slice(&seconds.to_le_bytes());
        Ok(payload)
    }

    /// `13 09 <type> <unit> 10 00 00 00 <sum>`. Stones are shown as pounds.
    pub fn unit_command(protocol_type: u8, unit: WeightUnit) -> [u8; 9] {
        let unit = match unit {
            WeightUnit::Kg => 0x01,
            WeightUnit::Lb | WeightUnit::St => 0x02,
        };
        let mut payload = [0x13, 0x09, protocol_type, unit, 0x10, 0, 0, 0, 0];
        payload[8] = payload[..8].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
        payload
    }
}

impl FrameParser for QnParser {
    const VENDOR: VendorId = VendorId::QnScale;

    fn parse(frame: &[u8], _profile: Option<&UserProfile>) -> Result<RawReading, DecodeError> {
        Self::parse_with_divider(frame, QnFrame::DEFAULT_DIVIDER)
    }
}
