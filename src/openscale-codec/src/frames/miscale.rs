use openscale_types::{RawExtras, RawReading, UserProfile, VendorId, WeightUnit};

use crate::{
    converters::{u8_at, u16_le},
    error::DecodeError,
    frames::{FrameParser, ensure_len, is_bit_set},
    helpers::{YearOrder, datetime_from_bytes},
};

/// Raw weight counts in 1/200 kg, or 1/100 of the display unit when the
/// scale is set to pounds or catty.
fn weight_from_raw(raw: u16, pounds: bool, catty: bool) -> f32 {
    let value = if pounds || catty {
        f32::from(raw) / 100.0
    } else {
        f32::from(raw) / 200.0
    };

    if pounds {
        WeightUnit::Lb.to_kilogram(value)
    } else if catty {
        // 1 jin = 0.5 kg
        value / 2.0
    } else {
        value
    }
}

/// Xiaomi Mi Body Composition Scale (v2) live frame.
///
/// Layout: two control bytes, date (year LE, month, day, hour, minute,
/// second), impedance (u16 LE), weight (u16 LE).
pub struct MiScaleParser;

impl MiScaleParser {
    const FRAME_LENGTH: usize = 13;

    const C0_POUNDS: u8 = 0;
    const C1_IMPEDANCE: u8 = 1;
    const C1_STABILIZED: u8 = 5;
    const C1_CATTY: u8 = 6;
    const C1_REMOVED: u8 = 7;
}

impl FrameParser for MiScaleParser {
    const VENDOR: VendorId = VendorId::MiScale;

    fn parse(frame: &[u8], _profile: Option<&UserProfile>) -> Result<RawReading, DecodeError> {
        ensure_len(frame, Self::FRAME_LENGTH)?;

        let c0 = u8_at(frame, 0)?;
        let c1 = u8_at(frame, 1)?;
        let pounds = is_bit_set(c0, Self::C0_POUNDS);
        let catty = is_bit_set(c1, Self::C1_CATTY);

        if !is_bit_set(c1, Self::C1_STABILIZED) || is_bit_set(c1, Self::C1_REMOVED) {
            debug!("mi scale: live frame ignored (unstable or removed)");
            return Err(DecodeError::Unstable);
        }

        let timestamp = datetime_from_bytes(frame, 2, YearOrder::Le)?;

        let impedance = if is_bit_set(c1, Self::C1_IMPEDANCE) {
            Some(f32::from(u16_le(frame, 9)?)).filter(|imp| *imp > 0.0)
        } else {
            None
        };

        let weight = weight_from_raw(u16_le(frame, 11)?, pounds, catty);

        Ok(RawReading::new(weight)
            .with_impedance(impedance)
            .with_timestamp(Some(timestamp))
            .with_extras(RawExtras::MiScale { pounds, catty }))
    }

    /// A notification occasionally carries two live frames back to back.
    fn split(notification: &[u8]) -> Vec<&[u8]> {
        if notification.len() == 2 * Self::FRAME_LENGTH {
            notification.chunks_exact(Self::FRAME_LENGTH).collect()
        } else {
            vec![notification]
        }
    }
}

/// Stored Mi Scale history record: status, weight (u16 LE), date (year LE,
/// month, day, hour, minute, second). History carries no impedance.
pub struct MiScaleHistoryParser;

impl MiScaleHistoryParser {
    const RECORD_LENGTH: usize = 10;

    const POUNDS: u8 = 0;
    const CATTY: u8 = 4;
    const STABILIZED: u8 = 5;
    const REMOVED: u8 = 7;
}

impl FrameParser for MiScaleHistoryParser {
    const VENDOR: VendorId = VendorId::MiScale;

    fn parse(frame: &[u8], _profile: Option<&UserProfile>) -> Result<RawReading, DecodeError> {
        ensure_len(frame, Self::RECORD_LENGTH)?;

        let status = u8_at(frame, 0)?;
        if !is_bit_set(status, Self::STABILIZED) || is_bit_set(status, Self::REMOVED) {
            return Err(DecodeError::Unstable);
        }

        let pounds = is_bit_set(status, Self::POUNDS);
        let catty = is_bit_set(status, Self::CATTY);
        let weight = weight_from_raw(u16_le(frame, 1)?, pounds, catty);
        let timestamp = datetime_from_bytes(frame, 3, YearOrder::Le)?;

        Ok(RawReading::new(weight)
            .with_timestamp(Some(timestamp))
            .with_extras(RawExtras::MiScale { pounds, catty }))
    }

    /// History chunks concatenate whole records; a trailing partial record
    /// is dropped.
    fn split(notification: &[u8]) -> Vec<&[u8]> {
        notification.chunks_exact(Self::RECORD_LENGTH).collect()
    }
}
