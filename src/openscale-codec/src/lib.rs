#[macro_use]
extern crate log;

mod error;
pub use error::DecodeError;

pub mod constants;

pub mod converters;

mod helpers;
pub use helpers::{ByteReader, InvalidIndexError, YearOrder, datetime_from_bytes};

mod frames;
pub use frames::*;
