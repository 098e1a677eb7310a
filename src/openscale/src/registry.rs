use std::str::FromStr;

use openscale_algos::{
    BodyComposition, MiScaleCalculator, OneByoneCalculator, OneByoneNewCalculator,
    SoehnleCalculator, TrisaCalculator, YunmaiCalculator,
};
use openscale_codec::{
    DecodeError, FrameParser, MiScaleHistoryParser, MiScaleParser, OneByoneNewParser,
    OneByoneParser, QnParser, SoehnleParser, TrisaParser, YunmaiParser, constants::*,
};
use openscale_types::{DerivedMetrics, RawReading, UserProfile, VendorId};
use uuid::Uuid;

type ParseFn = fn(&[u8], Option<&UserProfile>) -> Result<RawReading, DecodeError>;
type SplitFn = for<'a> fn(&'a [u8]) -> Vec<&'a [u8]>;
type ComputeFn = fn(&UserProfile, &RawReading) -> DerivedMetrics;

/// Parser and formula pair for one vendor, plus the GATT endpoints the BLE
/// layer subscribes to.
#[derive(Clone, Copy)]
pub struct VendorCodec {
    pub vendor: VendorId,
    pub service: Uuid,
    pub measurement: Uuid,
    parse: ParseFn,
    split: SplitFn,
    compute: ComputeFn,
}

fn compute_with<C: BodyComposition>(profile: &UserProfile, raw: &RawReading) -> DerivedMetrics {
    C::new(profile).compute(raw)
}

impl VendorCodec {
    fn new<P: FrameParser, C: BodyComposition>(service: Uuid, measurement: Uuid) -> Self {
        Self {
            vendor: P::VENDOR,
            service,
            measurement,
            parse: P::parse,
            split: P::split,
            compute: compute_with::<C>,
        }
    }

    pub fn for_vendor(vendor: VendorId) -> Self {
        match vendor {
            VendorId::Trisa => {
                Self::new::<TrisaParser, TrisaCalculator>(TRISA_SERVICE, TRISA_MEASUREMENT)
            }
            VendorId::MiScale => Self::new::<MiScaleParser, MiScaleCalculator>(
                MI_BODY_COMPOSITION_SERVICE,
                MI_BODY_COMPOSITION_MEASUREMENT,
            ),
            VendorId::OneByone => Self::new::<OneByoneParser, OneByoneCalculator>(
                ONEBYONE_SERVICE,
                ONEBYONE_MEASUREMENT,
            ),
            VendorId::OneByoneNew => Self::new::<OneByoneNewParser, OneByoneNewCalculator>(
                ONEBYONE_NEW_SERVICE,
                ONEBYONE_NEW_MEASUREMENT,
            ),
            VendorId::Soehnle => {
                Self::new::<SoehnleParser, SoehnleCalculator>(SOEHNLE_SERVICE, SOEHNLE_MEASUREMENT)
            }
            VendorId::Yunmai => Self::new::<YunmaiParser, YunmaiCalculator>(
                YUNMAI_MEASUREMENT_SERVICE,
                YUNMAI_MEASUREMENT,
            ),
            // QN scales reuse the Trisa regressions
            VendorId::QnScale => {
                Self::new::<QnParser, TrisaCalculator>(QN_TYPE1_SERVICE, QN_TYPE1_MEASUREMENT)
            }
        }
    }

    /// Stored records read back from the Mi Scale history characteristic.
    pub fn mi_scale_history() -> Self {
        Self::new::<MiScaleHistoryParser, MiScaleCalculator>(MI_CUSTOM_SERVICE, MI_HISTORY)
    }

    pub fn parse(
        &self,
        frame: &[u8],
        profile: Option<&UserProfile>,
    ) -> Result<RawReading, DecodeError> {
        (self.parse)(frame, profile)
    }

    pub fn split<'a>(&self, notification: &'a [u8]) -> Vec<&'a [u8]> {
        (self.split)(notification)
    }

    pub fn compute(&self, profile: &UserProfile, raw: &RawReading) -> DerivedMetrics {
        (self.compute)(profile, raw)
    }
}

/// Looks a vendor up by its CLI/storage name.
pub fn vendor_from_name(name: &str) -> Result<VendorId, DecodeError> {
    VendorId::from_str(name).map_err(|_| DecodeError::UnsupportedVendor)
}
