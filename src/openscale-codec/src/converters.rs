//! Primitive decoders and encoders shared by the frame parsers.

use chrono::{DateTime, Utc};

use crate::{error::DecodeError, helpers::ByteReader};

type Result<T> = std::result::Result<T, DecodeError>;

pub fn u8_at(buf: &[u8], offset: usize) -> Result<u8> {
    Ok(buf.byte_at(offset)?)
}

pub fn i8_at(buf: &[u8], offset: usize) -> Result<i8> {
    Ok(i8::from_le_bytes(buf.read_at(offset)?))
}

pub fn u16_le(buf: &[u8], offset: usize) -> Result<u16> {
    Ok(buf.read_u16_le(offset)?)
}

pub fn u16_be(buf: &[u8], offset: usize) -> Result<u16> {
    Ok(buf.read_u16_be(offset)?)
}

pub fn u24_le(buf: &[u8], offset: usize) -> Result<u32> {
    Ok(buf.read_u24_le(offset)?)
}

pub fn u24_be(buf: &[u8], offset: usize) -> Result<u32> {
    Ok(buf.read_u24_be(offset)?)
}

pub fn u32_le(buf: &[u8], offset: usize) -> Result<u32> {
    Ok(buf.read_u32_le(offset)?)
}

pub fn u32_be(buf: &[u8], offset: usize) -> Result<u32> {
    Ok(buf.read_u32_be(offset)?)
}

pub fn i32_le(buf: &[u8], offset: usize) -> Result<i32> {
    Ok(buf.read_i32_le(offset)?)
}

pub fn encode_u16_le(value: u16) -> [u8; 2] {
    value.to_le_bytes()
}

pub fn encode_u16_be(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

pub fn encode_u32_le(value: u32) -> [u8; 4] {
    value.to_le_bytes()
}

pub fn encode_u32_be(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Decimal float: 24-bit little-endian mantissa followed by a signed
/// base-10 exponent byte.
pub fn base10_float(buf: &[u8], offset: usize) -> Result<f32> {
    let [m0, m1, m2, exponent] = buf.read_at::<4>(offset)?;
    let mantissa = f64::from(u32::from_le_bytes([m0, m1, m2, 0]));
    let exponent = i32::from(exponent as i8);

    // Dividing by an exact power of ten keeps negative exponents correctly rounded.
    let value = if exponent >= 0 {
        mantissa * 10f64.powi(exponent)
    } else {
        mantissa / 10f64.powi(-exponent)
    };
    Ok(value as f32)
}

/// Device clock counting seconds from a vendor reference epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceEpoch {
    pub offset_seconds: i64,
}

impl DeviceEpoch {
    /// 2010-01-01T00:00:00Z
    pub const TRISA: Self = Self {
        offset_seconds: 1_262_304_000,
    };
    /// 2000-01-01T05:00:00Z
    pub const QN: Self = Self {
        offset_seconds: 946_702_800,
    };

    pub fn to_epoch_ms(self, device_seconds: i64) -> i64 {
        1000 * (self.offset_seconds + device_seconds)
    }

    /// Rounds to the nearest second, half-way values round up.
    pub fn from_epoch_ms(self, epoch_ms: i64) -> i64 {
        (epoch_ms + 500).div_euclid(1000) - self.offset_seconds
    }

    pub fn to_datetime(self, device_seconds: i64) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.to_epoch_ms(device_seconds))
    }
}

pub fn device_timestamp_to_epoch_ms(device_seconds: i64) -> i64 {
    DeviceEpoch::TRISA.to_epoch_ms(device_seconds)
}

pub fn epoch_ms_to_device_timestamp(epoch_ms: i64) -> i64 {
    DeviceEpoch::TRISA.from_epoch_ms(epoch_ms)
}
