use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{self:?}")]
pub enum DecodeError {
    /// Buffer is shorter than the vendor's fixed layout.
    FrameTooShort,
    /// Marker byte, header or opcode does not match the vendor protocol.
    InvalidFrame,
    /// A primitive read past the end of the buffer.
    OutOfRange,
    UnsupportedVendor,
    /// Live or partial frame that does not carry a final reading.
    Unstable,
    InvalidDate,
    ImplausibleTimestamp,
}
