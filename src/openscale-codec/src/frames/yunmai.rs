use chrono::DateTime;
use openscale_types::{RawExtras, RawReading, UserProfile, VendorId};

use crate::{
    converters::{u8_at, u16_be, u32_be},
    error::DecodeError,
    frames::{FrameParser, ensure_len},
};

/// Yunmai SE / Mini measurement notification.
///
/// Layout: header, protocol version, length, state (`02` once settled),
/// ..., UNIX time (u32 BE) at 5, weight (u16 BE, 0.01 kg) at 13, resistance
/// (u16 BE) at 15 and, from protocol `1E`, the scale's own body fat (u16 BE,
/// 0.01 %) at 17.
pub struct YunmaiParser;

impl YunmaiParser {
    const MIN_LENGTH: usize = 17;
    const FAT_LENGTH: usize = 19;
    const FINAL: u8 = 0x02;
    const EMBEDDED_FAT_VERSION: u8 = 0x1E;

    /// Scales without a set clock report times near zero.
    const MIN_TIMESTAMP: i64 = 315_532_800;
}

impl FrameParser for YunmaiParser {
    const VENDOR: VendorId = VendorId::Yunmai;

    fn parse(frame: &[u8], _profile: Option<&UserProfile>) -> Result<RawReading, DecodeError> {
        ensure_len(frame, 4)?;
        if u8_at(frame, 3)? != Self::FINAL {
            debug!("yunmai: weighing in progress");
            return Err(DecodeError::Unstable);
        }

        let protocol_version = u8_at(frame, 1)?;
        let has_fat = protocol_version >= Self::EMBEDDED_FAT_VERSION;
        ensure_len(
            frame,
            if has_fat {
                Self::FAT_LENGTH
            } else {
                Self::MIN_LENGTH
            },
        )?;

        let seconds = i64::from(u32_be(frame, 5)?);
        let timestamp = if seconds < Self::MIN_TIMESTAMP {
            debug!("yunmai: scale clock not set ({seconds})");
            None
        } else {
            DateTime::from_timestamp(seconds, 0)
        };

        let weight = f32::from(u16_be(frame, 13)?) / 100.0;
        if weight <= 0.0 {
            return Err(DecodeError::InvalidFrame);
        }

        let resistance = f32::from(u16_be(frame, 15)?);
        let embedded_fat = if has_fat {
            Some(f32::from(u16_be(frame, 17)?) / 100.0).filter(|fat| *fat > 0.0)
        } else {
            None
        };

        trace!("yunmai: frame {}", hex::encode(frame));

        Ok(RawReading::new(weight)
            .with_impedance(Some(resistance).filter(|r| *r > 0.0))
            .with_device_timestamp(Some(seconds))
            .with_timestamp(timestamp)
            .with_extras(RawExtras::Yunmai {
                protocol_version,
                embedded_fat,
            }))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    // protocol 1E, 2024-03-15T07:30:12Z, 80.00 kg, 500 ohm, 22.50 % fat
    const FINAL: [u8; 20] = [
        0x0D, 0x1E, 0x14, 0x02, 0x00, 0x65, 0xF3, 0xF9, 0x04, 0x00, 0x00, 0x00, 0x00, 0x1F, 0x40,
        0x01, 0xF4, 0x08, 0xCA, 0x00,
    ];

    #[test]
    fn final_frame_with_embedded_fat() {
        let raw = YunmaiParser::parse(&FINAL, None).unwrap();
        assert_eq!(raw.weight_kg, 80.0);
        assert_eq!(raw.impedance, Some(500.0));
        assert_eq!(
            raw.timestamp,
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 7, 30, 12).unwrap())
        );
        assert_eq!(
            raw.extras,
            RawExtras::Yunmai {
                protocol_version: 0x1E,
                embedded_fat: Some(22.5)
            }
        );
    }

    #[test]
    fn older_protocol_has_no_fat() {
        let mut data = FINAL;
        data[1] = 0x1D;
        let raw = YunmaiParser::parse(&data[..17], None).unwrap();
        assert!(matches!(
            raw.extras,
            RawExtras::Yunmai {
                embedded_fat: None,
                ..
            }
        ));
        assert_eq!(
            YunmaiParser::parse(&FINAL[..17], None),
            Err(DecodeError::FrameTooShort)
        );
    }

    #[test]
    fn unset_clock() {
        let mut data = FINAL;
        data[5..9].copy_from_slice(&[0, 0, 0x10, 0]);
        let raw = YunmaiParser::parse(&data, None).unwrap();
        assert!(raw.timestamp.is_none());
        assert_eq!(raw.device_timestamp, Some(0x1000));
    }

    #[test]
    fn in_progress_is_unstable() {
        let mut data = FINAL;
        data[3] = 0x01;
        assert_eq!(YunmaiParser::parse(&data, None), Err(DecodeError::Unstable));
    }

    #[test]
    fn zero_weight() {
        let mut data = FINAL;
        data[13] = 0;
        data[14] = 0;
        assert_eq!(
            YunmaiParser::parse(&data, None),
            Err(DecodeError::InvalidFrame)
        );
    }
}
