use std::fmt;

use openscale_types::{RawExtras, RawReading, UserProfile, VendorId};

use crate::{
    converters::{DeviceEpoch, base10_float, i32_le, u8_at},
    error::DecodeError,
    frames::{FrameParser, ensure_len, is_bit_set},
};

/// Trisa Body Analyze 4.0 measurement characteristic.
///
/// Layout: info byte, weight (base-10 float), device timestamp (i32 LE), then
/// up to two base-10 resistances announced by the info byte.
pub struct TrisaParser;

impl TrisaParser {
    const MIN_LENGTH: usize = 9;
    const WEIGHT_OFFSET: usize = 1;
    const TIMESTAMP_OFFSET: usize = 5;
    const RESISTANCE_OFFSET: usize = 9;

    const HAS_TIMESTAMP: u8 = 0;
    const HAS_R1: u8 = 1;
    const HAS_R2: u8 = 2;

    /// Resistances below this map to a fixed impedance.
    const R2_FLOOR: f32 = 410.0;

    /// Impedance-like value used by the Trisa formulas, also shared by QN scales.
    pub fn impedance_from_resistance(resistance: f32) -> f32 {
        if resistance < Self::R2_FLOOR {
            3.0
        } else {
            0.3 * (resistance - 400.0)
        }
    }

    fn profile_is_valid(profile: Option<&UserProfile>) -> bool {
        profile.is_some_and(|p| p.age > 0 && p.is_usable())
    }
}

impl FrameParser for TrisaParser {
    const VENDOR: VendorId = VendorId::Trisa;

    fn parse(frame: &[u8], profile: Option<&UserProfile>) -> Result<RawReading, DecodeError> {
        ensure_len(frame, Self::MIN_LENGTH)?;

        let info = u8_at(frame, 0)?;
        if !is_bit_set(info, Self::HAS_TIMESTAMP) {
            return Err(DecodeError::InvalidFrame);
        }

        let weight = base10_float(frame, Self::WEIGHT_OFFSET)?;
        let device_seconds = i64::from(i32_le(frame, Self::TIMESTAMP_OFFSET)?);

        let has_r1 = is_bit_set(info, Self::HAS_R1);
        let r1 = if has_r1 {
            base10_float(frame, Self::RESISTANCE_OFFSET).ok()
        } else {
            None
        };

        let r2_offset = Self::RESISTANCE_OFFSET + if has_r1 { 4 } else { 0 };
        let r2 = if is_bit_set(info, Self::HAS_R2) {
            base10_float(frame, r2_offset).ok()
        } else {
            None
        };

        let impedance = r2
            .filter(|_| Self::profile_is_valid(profile))
            .map(Self::impedance_from_resistance);

        Ok(RawReading::new(weight)
            .with_impedance(impedance)
            .with_device_timestamp(Some(device_seconds))
            .with_timestamp(DeviceEpoch::TRISA.to_datetime(device_seconds))
            .with_extras(RawExtras::Trisa { r1, r2 }))
    }
}

/// Message written by the scale to the upload characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrisaUpload {
    Password(i32),
    Challenge(i32),
}

impl TrisaUpload {
    const PASSWORD: u8 = 0xA0;
    const CHALLENGE: u8 = 0xA1;

    pub fn from_data(data: &[u8]) -> Result<Self, DecodeError> {
        ensure_len(data, 5)?;

        let argument = i32_le(data, 1)?;
        match u8_at(data, 0)? {
            Self::PASSWORD => Ok(Self::Password(argument)),
            Self::CHALLENGE => Ok(Self::Challenge(argument)),
            _ => Err(DecodeError::InvalidFrame),
        }
    }
}

/// Command written by the host to the download characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrisaCommand {
    /// Current time in device seconds.
    SetTime(i32),
    /// Challenge XOR password.
    ChallengeResult(i32),
    BroadcastId(i32),
    EnableDisconnect,
}

impl TrisaCommand {
    /// Sent after pairing; the scale includes it in its Bluetooth alias.
    pub const BROADCAST_ID: i32 = 0;

    pub fn set_time(epoch_ms: i64) -> Result<Self, DecodeError> {
        let device_seconds = DeviceEpoch::TRISA.from_epoch_ms(epoch_ms);
        i32::try_from(device_seconds)
            .map(Self::SetTime)
            .map_err(|_| DecodeError::OutOfRange)
    }

    pub fn answer_challenge(challenge: i32, password: i32) -> Self {
        Self::ChallengeResult(challenge ^ password)
    }

    pub fn opcode(&self) -> u8 {
        match self {
            Self::SetTime(_) => 0x02,
            Self::ChallengeResult(_) => 0x20,
            Self::BroadcastId(_) => 0x21,
            Self::EnableDisconnect => 0x22,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![self.opcode()];
        match self {
            Self::SetTime(arg) | Self::ChallengeResult(arg) | Self::BroadcastId(arg) => {
                bytes.extend_from_slice(&arg.to_le_bytes())
            }
            Self::EnableDisconnect => {}
        }
        bytes
    }
}

impl fmt::Display for TrisaCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} [{}]", self, hex::encode(self.to_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use openscale_types::Sex;

    use super::*;

    fn frame(hex_str: &str) -> Vec<u8> {
        hex::decode(hex_str.replace(':', "")).unwrap()
    }

    #[test]
    fn parses_weight_timestamp_and_resistances() {
        let data = frame("9f:b0:1d:00:fe:dc:2f:81:10:00:00:00:ff:0a:15:00:ff:00:09:00");
        let profile = UserProfile::new(Sex::Male, 36, 186.0);
        let raw = TrisaParser::parse(&data, Some(&profile)).unwrap();

        assert_eq!(raw.weight_kg, 76.0);
        assert_eq!(raw.device_timestamp, Some(276901852));
        assert_eq!(raw.timestamp.unwrap().timestamp(), 1539205852);
        assert_eq!(
            raw.extras,
            RawExtras::Trisa {
                r1: Some(0.0),
                r2: Some(538.6)
            }
        );
        assert!((raw.impedance.unwrap() - 41.58).abs() < 1e-3);
    }

    #[test]
    fn no_profile_keeps_weight_and_time() {
        let data = frame("9f:ba:1d:00:fe:32:2b:71:10:00:00:00:ff:8d:14:00:ff:00:09:00");
        let raw = TrisaParser::parse(&data, None).unwrap();
        assert_eq!(raw.weight_kg, 76.1);
        assert_eq!(raw.timestamp.unwrap().timestamp(), 1538156082);
        assert!(raw.impedance.is_none());

        let raw = TrisaParser::parse(&data, Some(&UserProfile::default())).unwrap();
        assert_eq!(raw.weight_kg, 76.1);
        assert!(raw.impedance.is_none());
    }

    #[test]
    fn low_resistance_maps_to_floor() {
        assert_eq!(TrisaParser::impedance_from_resistance(0.0), 3.0);
        assert_eq!(TrisaParser::impedance_from_resistance(409.9), 3.0);
        assert!((TrisaParser::impedance_from_resistance(500.0) - 30.0).abs() < 1e-4);
    }

    #[test]
    fn r2_without_r1_sits_at_offset_nine() {
        // info: timestamp + r2, weight 76.0, r2 = 500.0
        let data = frame("05:b0:1d:00:fe:dc:2f:81:10:88:13:00:ff");
        let profile = UserProfile::new(Sex::Female, 30, 170.0);
        let raw = TrisaParser::parse(&data, Some(&profile)).unwrap();
        assert_eq!(
            raw.extras,
            RawExtras::Trisa {
                r1: None,
                r2: Some(500.0)
            }
        );
        assert!((raw.impedance.unwrap() - 30.0).abs() < 1e-4);
    }

    #[test]
    fn truncated_r2_is_ignored() {
        let data = frame("05:b0:1d:00:fe:dc:2f:81:10:88:13");
        let profile = UserProfile::new(Sex::Female, 30, 170.0);
        let raw = TrisaParser::parse(&data, Some(&profile)).unwrap();
        assert!(raw.impedance.is_none());
        assert_eq!(raw.weight_kg, 76.0);
    }

    #[test]
    fn too_short() {
        let data = frame("9f:b0:1d:00:fe:dc:2f:81");
        assert!(matches!(
            TrisaParser::parse(&data, None),
            Err(DecodeError::FrameTooShort)
        ));
    }

    #[test]
    fn missing_timestamp_flag() {
        let data = frame("9e:b0:1d:00:fe:dc:2f:81:10");
        assert!(matches!(
            TrisaParser::parse(&data, None),
            Err(DecodeError::InvalidFrame)
        ));
    }

    #[test]
    fn upload_messages() {
        assert_eq!(
            TrisaUpload::from_data(&[0xA0, 0x78, 0x56, 0x34, 0x12]).unwrap(),
            TrisaUpload::Password(0x12345678)
        );
        assert_eq!(
            TrisaUpload::from_data(&[0xA1, 0xFF, 0xFF, 0xFF, 0xFF]).unwrap(),
            TrisaUpload::Challenge(-1)
        );
        assert_eq!(
            TrisaUpload::from_data(&[0xA1, 0x00]),
            Err(DecodeError::FrameTooShort)
        );
        assert_eq!(
            TrisaUpload::from_data(&[0xA7, 0, 0, 0, 0]),
            Err(DecodeError::InvalidFrame)
        );
    }

    #[test]
    fn command_encoding() {
        let cmd = TrisaCommand::set_time(1538156082500).unwrap();
        assert_eq!(cmd, TrisaCommand::SetTime(275852083));
        assert_eq!(cmd.to_bytes(), vec![0x02, 0x33, 0x2B, 0x71, 0x10]);

        let cmd = TrisaCommand::answer_challenge(0x0F0F0F0F, 0x00FF00FF);
        assert_eq!(cmd, TrisaCommand::ChallengeResult(0x0FF00FF0));
        assert_eq!(cmd.to_bytes()[0], 0x20);

        assert_eq!(TrisaCommand::EnableDisconnect.to_bytes(), vec![0x22]);
        assert_eq!(
            TrisaCommand::BroadcastId(TrisaCommand::BROADCAST_ID).to_bytes(),
            vec![0x21, 0, 0, 0, 0]
        );
    }

    #[test]
    fn command_display_includes_hex() {
        let display = format!("{}", TrisaCommand::EnableDisconnect);
        assert!(display.contains("EnableDisconnect"));
        assert!(display.contains("22"));
    }

    #[test]
    fn set_time_out_of_device_range() {
        assert_eq!(
            TrisaCommand::set_time(i64::MAX / 4),
            Err(DecodeError::OutOfRange)
        );
    }
}
