use chrono::{DateTime, Utc};

use crate::{
    reading::{RawExtras, RawReading},
    vendor::VendorId,
};

/// Body composition computed from weight, impedance and profile.
///
/// Metrics a vendor formula does not produce stay at `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Body fat in percent.
    pub fat: f32,
    /// Body water in percent.
    pub water: f32,
    /// Muscle in percent of body weight.
    pub muscle: f32,
    /// Bone mass in kg.
    pub bone: f32,
    pub visceral_fat: f32,
    pub bmi: f32,
    /// Lean body mass in kg.
    pub lbm: f32,
    /// Basal metabolic rate in kcal.
    pub bmr: f32,
    /// Skeletal muscle in percent of body weight.
    pub skeletal_muscle: f32,
    /// Protein in percent.
    pub protein: f32,
}

impl DerivedMetrics {
    /// Combines two metric sets field by field.
    pub fn zip_map(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self {
            fat: f(self.fat, other.fat),
            water: f(self.water, other.water),
            muscle: f(self.muscle, other.muscle),
            bone: f(self.bone, other.bone),
            visceral_fat: f(self.visceral_fat, other.visceral_fat),
            bmi: f(self.bmi, other.bmi),
            lbm: f(self.lbm, other.lbm),
            bmr: f(self.bmr, other.bmr),
            skeletal_muscle: f(self.skeletal_muscle, other.skeletal_muscle),
            protein: f(self.protein, other.protein),
        }
    }

    pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
        self.zip_map(Self::default(), |value, _| f(value))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Final artifact handed to persistence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecodedMeasurement {
    /// Formula set that produced the metrics.
    pub vendor: VendorId,
    pub timestamp: DateTime<Utc>,
    pub weight_kg: f32,
    pub impedance: Option<f32>,
    pub device_timestamp: Option<i64>,
    pub extras: RawExtras,
    pub metrics: DerivedMetrics,
}

fn fill(value: f32, fallback: f32) -> f32 {
    if value == 0.0 { fallback } else { value }
}

impl DecodedMeasurement {
    pub fn from_raw(
        vendor: VendorId,
        raw: &RawReading,
        timestamp: DateTime<Utc>,
        metrics: DerivedMetrics,
    ) -> Self {
        Self {
            vendor,
            timestamp,
            weight_kg: raw.weight_kg,
            impedance: raw.impedance,
            device_timestamp: raw.device_timestamp,
            extras: raw.extras,
            metrics,
        }
    }

    /// Fills every zero metric (and missing impedance) from `other`.
    /// Identity fields stay those of `self`.
    pub fn merge_missing(&self, other: &Self) -> Self {
        Self {
            weight_kg: fill(self.weight_kg, other.weight_kg),
            impedance: self.impedance.or(other.impedance),
            metrics: self.metrics.zip_map(other.metrics, fill),
            ..*self
        }
    }

    /// Mean of weight and every metric. The result carries the latest
    /// timestamp and the provenance of the first measurement.
    pub fn average(measurements: &[Self]) -> Option<Self> {
        let (first, rest) = measurements.split_first()?;
        let n = measurements.len() as f32;

        let sum = rest.iter().fold(*first, |acc, m| Self {
            weight_kg: acc.weight_kg + m.weight_kg,
            metrics: acc.metrics.zip_map(m.metrics, |a, b| a + b),
            timestamp: acc.timestamp.max(m.timestamp),
            ..acc
        });

        let impedances: Vec<f32> = measurements.iter().filter_map(|m| m.impedance).collect();
        let impedance = (!impedances.is_empty())
            .then(|| impedances.iter().sum::<f32>() / impedances.len() as f32);

        Some(Self {
            weight_kg: sum.weight_kg / n,
            impedance,
            metrics: sum.metrics.map(|value| value / n),
            ..sum
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const EPS: f32 = 1e-4;

    fn measurement(ts: i64, weight: f32, fat: f32, water: f32) -> DecodedMeasurement {
        DecodedMeasurement {
            vendor: VendorId::Trisa,
            timestamp: Utc.timestamp_opt(ts, 0).unwrap(),
            weight_kg: weight,
            impedance: None,
            device_timestamp: None,
            extras: RawExtras::None,
            metrics: DerivedMetrics {
                fat,
                water,
                ..Default::default()
            },
        }
    }

    #[test]
    fn zip_map_touches_every_field() {
        let ones = DerivedMetrics::default().map(|_| 1.0);
        let twos = ones.zip_map(ones, |a, b| a + b);
        assert_eq!(twos.fat, 2.0);
        assert_eq!(twos.protein, 2.0);
        assert_eq!(twos.skeletal_muscle, 2.0);
        assert_eq!(twos.bmr, 2.0);
        assert!(!twos.is_empty());
        assert!(DerivedMetrics::default().is_empty());
    }

    #[test]
    fn merge_fills_only_missing() {
        let a = measurement(10, 80.0, 20.0, 0.0);
        let mut b = measurement(20, 81.0, 25.0, 55.0);
        b.impedance = Some(500.0);
        b.vendor = VendorId::MiScale;

        let merged = a.merge_missing(&b);
        assert_eq!(merged.weight_kg, 80.0);
        assert_eq!(merged.metrics.fat, 20.0);
        assert_eq!(merged.metrics.water, 55.0);
        assert_eq!(merged.impedance, Some(500.0));
        assert_eq!(merged.vendor, VendorId::Trisa);
        assert_eq!(merged.timestamp, a.timestamp);
    }

    #[test]
    fn average_of_three() {
        let items = [
            measurement(30, 80.0, 20.0, 50.0),
            measurement(10, 82.0, 22.0, 52.0),
            measurement(20, 84.0, 24.0, 54.0),
        ];
        let avg = DecodedMeasurement::average(&items).unwrap();
        assert!((avg.weight_kg - 82.0).abs() < EPS);
        assert!((avg.metrics.fat - 22.0).abs() < EPS);
        assert!((avg.metrics.water - 52.0).abs() < EPS);
        assert_eq!(avg.timestamp, Utc.timestamp_opt(30, 0).unwrap());
        assert!(avg.impedance.is_none());
    }

    #[test]
    fn average_ignores_missing_impedance() {
        let mut a = measurement(1, 80.0, 0.0, 0.0);
        let b = measurement(2, 80.0, 0.0, 0.0);
        a.impedance = Some(400.0);
        let avg = DecodedMeasurement::average(&[a, b]).unwrap();
        assert_eq!(avg.impedance, Some(400.0));
    }

    #[test]
    fn average_of_nothing() {
        assert!(DecodedMeasurement::average(&[]).is_none());
    }
}
