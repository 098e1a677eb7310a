use openscale_types::{RawExtras, RawReading, UserProfile, VendorId};

use crate::{
    converters::{u8_at, u16_be},
    error::DecodeError,
    frames::{FrameParser, ensure_len},
    helpers::{YearOrder, datetime_from_bytes},
};

/// Soehnle Shape measurement record.
///
/// Layout: `09`, user index, date (year BE, month, day, hour, minute,
/// second), weight (u16 BE, 0.1 kg), impedance at 5 kHz and at 50 kHz
/// (u16 BE each).
pub struct SoehnleParser;

impl SoehnleParser {
    const LENGTH: usize = 15;
    const MARKER: u8 = 0x09;

    /// `09 <user>`: requests the stored records of one scale user.
    pub fn history_request(user_index: u8) -> [u8; 2] {
        [Self::MARKER, user_index]
    }
}

impl FrameParser for SoehnleParser {
    const VENDOR: VendorId = VendorId::Soehnle;

    fn parse(frame: &[u8], _profile: Option<&UserProfile>) -> Result<RawReading, DecodeError> {
        ensure_len(frame, Self::LENGTH)?;
        if u8_at(frame, 0)? != Self::MARKER {
            return Err(DecodeError::InvalidFrame);
        }

        let user_index = u8_at(frame, 1)?;
        let timestamp = datetime_from_bytes(frame, 2, YearOrder::Be)?;
        let weight = f32::from(u16_be(frame, 9)?) / 10.0;
        let imp5 = f32::from(u16_be(frame, 11)?);
        let imp50 = f32::from(u16_be(frame, 13)?);

        Ok(RawReading::new(weight)
            .with_impedance(Some(imp50).filter(|imp| *imp > 0.0))
            .with_timestamp(Some(timestamp))
            .with_extras(RawExtras::Soehnle { user_index, imp5 }))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    // user 1, 2024-03-15 07:30:12, 80.0 kg, imp5 450, imp50 500
    const RECORD: [u8; 15] = [
        0x09, 0x01, 0x07, 0xE8, 0x03, 0x0F, 0x07, 0x1E, 0x0C, 0x03, 0x20, 0x01, 0xC2, 0x01, 0xF4,
    ];

    #[test]
    fn record() {
        let raw = SoehnleParser::parse(&RECORD, None).unwrap();
        assert_eq!(raw.weight_kg, 80.0);
        assert_eq!(raw.impedance, Some(500.0));
        assert_eq!(
            raw.timestamp,
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 7, 30, 12).unwrap())
        );
        assert_eq!(
            raw.extras,
            RawExtras::Soehnle {
                user_index: 1,
                imp5: 450.0
            }
        );
    }

    #[test]
    fn weight_only_record() {
        let mut data = RECORD;
        data[13] = 0;
        data[14] = 0;
        let raw = SoehnleParser::parse(&data, None).unwrap();
        assert!(raw.impedance.is_none());
        assert_eq!(raw.weight_kg, 80.0);
    }

    #[test]
    fn rejects_other_frames() {
        let mut data = RECORD;
        data[0] = 0x0A;
        assert_eq!(
            SoehnleParser::parse(&data, None),
            Err(DecodeError::InvalidFrame)
        );
        assert_eq!(
            SoehnleParser::parse(&RECORD[..14], None),
            Err(DecodeError::FrameTooShort)
        );
    }

    #[test]
    fn invalid_date() {
        let mut data = RECORD;
        data[5] = 32;
        assert_eq!(
            SoehnleParser::parse(&data, None),
            Err(DecodeError::InvalidDate)
        );
    }

    #[test]
    fn request() {
        assert_eq!(SoehnleParser::history_request(3), [0x09, 0x03]);
    }
}
