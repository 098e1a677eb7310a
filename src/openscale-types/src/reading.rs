use chrono::{DateTime, Utc};

/// Quantities pulled out of a single frame before any formula runs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawReading {
    pub weight_kg: f32,
    /// Primary impedance fed to the formulas, in ohms or the vendor's
    /// impedance-like unit.
    pub impedance: Option<f32>,
    /// Scale clock converted to UTC, `None` when the frame carries no clock or
    /// the clock is not trustworthy.
    pub timestamp: Option<DateTime<Utc>>,
    /// Raw clock value in the vendor's own epoch.
    pub device_timestamp: Option<i64>,
    pub extras: RawExtras,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawExtras {
    #[default]
    None,
    Trisa {
        r1: Option<f32>,
        r2: Option<f32>,
    },
    MiScale {
        pounds: bool,
        catty: bool,
    },
    Soehnle {
        user_index: u8,
        /// Impedance at 5 kHz; the primary impedance is the 50 kHz one.
        imp5: f32,
    },
    Yunmai {
        protocol_version: u8,
        /// Body fat computed by the scale itself on newer firmware.
        embedded_fat: Option<f32>,
    },
    Qn {
        r1: f32,
        r2: f32,
        weight_divider: f32,
    },
}

impl RawReading {
    pub fn new(weight_kg: f32) -> Self {
        Self {
            weight_kg,
            ..Default::default()
        }
    }

    pub fn with_impedance(self, impedance: Option<f32>) -> Self {
        Self { impedance, ..self }
    }

    pub fn with_timestamp(self, timestamp: Option<DateTime<Utc>>) -> Self {
        Self { timestamp, ..self }
    }

    pub fn with_device_timestamp(self, device_timestamp: Option<i64>) -> Self {
        Self {
            device_timestamp,
            ..self
        }
    }

    pub fn with_extras(self, extras: RawExtras) -> Self {
        Self { extras, ..self }
    }

    pub fn has_impedance(&self) -> bool {
        self.impedance.is_some_and(|imp| imp > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_fields() {
        let raw = RawReading::new(76.0)
            .with_impedance(Some(41.58))
            .with_device_timestamp(Some(275852082))
            .with_extras(RawExtras::Trisa {
                r1: None,
                r2: Some(538.6),
            });
        assert_eq!(raw.weight_kg, 76.0);
        assert_eq!(raw.impedance, Some(41.58));
        assert_eq!(raw.device_timestamp, Some(275852082));
        assert!(raw.timestamp.is_none());
        assert!(raw.has_impedance());
    }

    #[test]
    fn zero_impedance_is_absent() {
        assert!(!RawReading::new(70.0).has_impedance());
        assert!(!RawReading::new(70.0).with_impedance(Some(0.0)).has_impedance());
    }

    #[test]
    fn extras_are_tagged() {
        let extras = RawExtras::Soehnle {
            user_index: 1,
            imp5: 200.0,
        };
        let json = serde_json::to_value(extras).unwrap();
        assert_eq!(json["kind"], "soehnle");
        assert_eq!(json["user_index"], 1);
    }
}
