use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::DecodeError;

type Result<T> = std::result::Result<T, InvalidIndexError>;

#[derive(Debug)]
pub struct InvalidIndexError;

/// Random access reads at absolute offsets. Reads never wrap or truncate.
pub trait ByteReader {
    fn read_at<const N: usize>(&self, offset: usize) -> Result<[u8; N]>;

    fn byte_at(&self, offset: usize) -> Result<u8> {
        let [byte] = self.read_at(offset)?;
        Ok(byte)
    }

    fn read_u16_le(&self, offset: usize) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_at(offset)?))
    }

    fn read_u16_be(&self, offset: usize) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_at(offset)?))
    }

    fn read_u24_le(&self, offset: usize) -> Result<u32> {
        let [b0, b1, b2] = self.read_at(offset)?;
        Ok(u32::from_le_bytes([b0, b1, b2, 0]))
    }

    fn read_u24_be(&self, offset: usize) -> Result<u32> {
        let [b0, b1, b2] = self.read_at(offset)?;
        Ok(u32::from_be_bytes([0, b0, b1, b2]))
    }

    fn read_u32_le(&self, offset: usize) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_at(offset)?))
    }

    fn read_u32_be(&self, offset: usize) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_at(offset)?))
    }

    fn read_i32_le(&self, offset: usize) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_at(offset)?))
    }
}

impl ByteReader for [u8] {
    fn read_at<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let end = offset.checked_add(N).ok_or(InvalidIndexError)?;
        self.get(offset..end)
            .ok_or(InvalidIndexError)?
            .try_into()
            .map_err(|_| InvalidIndexError)
    }
}

impl From<InvalidIndexError> for DecodeError {
    fn from(_: InvalidIndexError) -> Self {
        Self::OutOfRange
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearOrder {
    Le,
    Be,
}

/// Reads year (2 bytes), month, day, hour, minute and second starting at
/// `offset`. Invalid calendar values fail with `InvalidDate`.
pub fn datetime_from_bytes(
    buf: &[u8],
    offset: usize,
    order: YearOrder,
) -> std::result::Result<DateTime<Utc>, DecodeError> {
    let [y0, y1, month, day, hour, minute, second] = buf.read_at::<7>(offset)?;
    let year = match order {
        YearOrder::Le => u16::from_le_bytes([y0, y1]),
        YearOrder::Be => u16::from_be_bytes([y0, y1]),
    };

    let date = NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
        .ok_or(DecodeError::InvalidDate)?;
    let time = NaiveTime::from_hms_opt(u32::from(hour), u32::from(minute), u32::from(second))
        .ok_or(DecodeError::InvalidDate)?;

    Ok(NaiveDateTime::new(date, time).and_utc())
}
