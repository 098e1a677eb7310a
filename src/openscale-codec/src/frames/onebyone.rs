use chrono::{DateTime, Datelike, Timelike, Utc};
use openscale_types::{RawReading, UserProfile, VendorId, WeightUnit};

use crate::{
    converters::{u8_at, u16_le},
    error::DecodeError,
    frames::{FrameParser, ensure_len},
    helpers::{ByteReader, YearOrder, datetime_from_bytes},
};

/// 1byone (classic) `CF` frame.
///
/// Layout: marker, impedance (u16 LE, 0.1 ohm), weight (u16 LE, 0.01 kg),
/// ..., impedance-absent flag at 9, then an optional timestamp (year BE,
/// month, day, hour, minute, second) from offset 11.
pub struct OneByoneParser;

impl OneByoneParser {
    const MARKER: u8 = 0xCF;
    const MIN_LENGTH: usize = 11;
    const TIMESTAMP_LENGTH: usize = 18;
    const NO_IMPEDANCE: u8 = 1;

    fn timestamp(frame: &[u8]) -> Result<DateTime<Utc>, DecodeError> {
        let mut fields: [u8; 7] = frame.read_at(11)?;
        // month and day are coerced into range like the vendor app does
        fields[2] = fields[2].clamp(1, 12);
        fields[3] = fields[3].max(1);
        datetime_from_bytes(&fields, 0, YearOrder::Be)
    }

    /// `FD 37 <unit> <group> 00.. <xor>`: selects the display unit.
    pub fn unit_command(unit: WeightUnit) -> Vec<u8> {
        let mut payload = vec![0xFD, 0x37, unit.as_u8(), 0x01, 0, 0, 0, 0, 0, 0];
        payload.push(payload.iter().fold(0, |acc, b| acc ^ b));
        payload
    }

    /// `F1 <year BE> <month> <day> <hour> <minute> <second>`.
    pub fn clock_command(now: DateTime<Utc>) -> Vec<u8> {
        let year = u16::try_from(now.year()).unwrap_or_default();
        let mut payload = vec![0xF1];
        payload.extend_from_slice(&year.to_be_bytes());
        payload.extend_from_slice(&[
            now.month() as u8,
            now.day() as u8,
            now.hour() as u8,
            now.minute() as u8,
            now.second() as u8,
        ]);
        payload
    }
}

impl FrameParser for OneByoneParser {
    const VENDOR: VendorId = VendorId::OneByone;

    fn parse(frame: &[u8], _profile: Option<&UserProfile>) -> Result<RawReading, DecodeError> {
        ensure_len(frame, Self::MIN_LENGTH)?;
        if u8_at(frame, 0)? != Self::MARKER {
            return Err(DecodeError::InvalidFrame);
        }

        let weight = f32::from(u16_le(frame, 3)?) / 100.0;
        let impedance = f32::from(u16_le(frame, 1)?) * 0.1;
        let impedance = (u8_at(frame, 9)? != Self::NO_IMPEDANCE && impedance != 0.0)
            .then_some(impedance);

        let timestamp = if frame.len() >= Self::TIMESTAMP_LENGTH {
            Some(Self::timestamp(frame)?)
        } else {
            None
        };

        trace!("onebyone: frame {}", hex::encode(frame));

        Ok(RawReading::new(weight)
            .with_impedance(impedance)
            .with_timestamp(timestamp))
    }
}
