#[macro_use]
extern crate log;

use chrono::{DateTime, Months, Utc};
use openscale_algos::Anthropometrics;
use openscale_codec::DecodeError;
use openscale_types::{DecodedMeasurement, DerivedMetrics, RawReading, UserProfile, VendorId};

mod registry;
pub use registry::{VendorCodec, vendor_from_name};

/// Combines a parsed reading with the vendor's formulas. Metrics stay at
/// zero unless `profile` has a usable height; weight and timestamp are
/// always filled, falling back to `received_at` when the frame has no clock.
pub fn assemble(
    raw: RawReading,
    profile: Option<&UserProfile>,
    vendor: VendorId,
    received_at: DateTime<Utc>,
) -> DecodedMeasurement {
    let metrics = match profile.filter(|p| p.is_usable()) {
        Some(profile) => {
            let mut metrics = VendorCodec::for_vendor(vendor).compute(profile, &raw);
            if metrics.bmi == 0.0 {
                metrics.bmi = Anthropometrics::bmi(raw.weight_kg, profile.height_cm);
            }
            metrics
        }
        None => {
            debug!("{vendor}: no usable profile, skipping body composition");
            DerivedMetrics::default()
        }
    };

    let timestamp = raw.timestamp.unwrap_or(received_at);
    DecodedMeasurement::from_raw(vendor, &raw, timestamp, metrics)
}

/// Mi scales keep a user-set clock; anything further than this from the
/// receive time is a reset or garbage clock.
const MI_SCALE_CLOCK_RANGE: Months = Months::new(20 * 12);

fn check_plausible(
    vendor: VendorId,
    raw: &RawReading,
    received_at: DateTime<Utc>,
) -> Result<(), DecodeError> {
    let (VendorId::MiScale, Some(timestamp)) = (vendor, raw.timestamp) else {
        return Ok(());
    };

    let earliest = received_at.checked_sub_months(MI_SCALE_CLOCK_RANGE);
    let latest = received_at.checked_add_months(MI_SCALE_CLOCK_RANGE);
    match (earliest, latest) {
        (Some(earliest), Some(latest)) if timestamp > earliest && timestamp < latest => Ok(()),
        _ => {
            debug!("{vendor}: implausible clock {timestamp}");
            Err(DecodeError::ImplausibleTimestamp)
        }
    }
}

fn decode_with(
    codec: &VendorCodec,
    frame: &[u8],
    profile: Option<&UserProfile>,
    received_at: DateTime<Utc>,
) -> Result<DecodedMeasurement, DecodeError> {
    trace!("{}: {}", codec.vendor, hex::encode(frame));
    let raw = codec.parse(frame, profile)?;
    check_plausible(codec.vendor, &raw, received_at)?;
    Ok(assemble(raw, profile, codec.vendor, received_at))
}

/// Decodes a single frame into a measurement.
pub fn decode(
    vendor: VendorId,
    frame: &[u8],
    profile: Option<&UserProfile>,
    received_at: DateTime<Utc>,
) -> Result<DecodedMeasurement, DecodeError> {
    decode_with(&VendorCodec::for_vendor(vendor), frame, profile, received_at)
}

/// Decodes every frame packed in one notification. A failing frame does not
/// stop the ones after it.
pub fn decode_notification(
    codec: &VendorCodec,
    notification: &[u8],
    profile: Option<&UserProfile>,
    received_at: DateTime<Utc>,
) -> Vec<Result<DecodedMeasurement, DecodeError>> {
    codec
        .split(notification)
        .into_iter()
        .map(|frame| decode_with(codec, frame, profile, received_at))
        .collect()
}
