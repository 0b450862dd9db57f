//! Composite AQI aggregation over per-pollutant sub-indices.

use std::collections::HashMap;

use crate::aqi::Pollutant;
use crate::error::{Result, ServiceError};

/// Computes the composite AQI as the maximum sub-index across all six
/// pollutants. A pollutant with no reading is treated as a concentration of
/// 0.0, so sparse readings never fail but bias the composite low. An empty
/// map yields 0.0.
pub fn composite_aqi(readings: &HashMap<Pollutant, f64>) -> f64 {
    Pollutant::ALL
        .iter()
        .map(|pollutant| {
            let concentration = readings.get(pollutant).copied().unwrap_or(0.0);
            pollutant.sub_index(concentration)
        })
        .fold(0.0, f64::max)
}

/// Minimum-data requirements a reading set must meet before its composite
/// is considered reportable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositePolicy {
    pub min_pollutants: usize,
    pub require_particulate: bool,
}

impl CompositePolicy {
    /// The CPCB reporting rule: at least three pollutants, one of which
    /// must be PM2.5 or PM10.
    pub fn cpcb_minimum() -> Self {
        Self {
            min_pollutants: 3,
            require_particulate: true,
        }
    }

    pub fn check(&self, readings: &HashMap<Pollutant, f64>) -> Result<()> {
        if readings.len() < self.min_pollutants {
            return Err(ServiceError::InsufficientReadings(format!(
                "need at least {} pollutant readings, got {}",
                self.min_pollutants,
                readings.len()
            )));
        }

        if self.require_particulate
            && !readings.contains_key(&Pollutant::Pm25)
            && !readings.contains_key(&Pollutant::Pm10)
        {
            return Err(ServiceError::InsufficientReadings(
                "need at least one particulate reading (pm25 or pm10)".to_string(),
            ));
        }

        Ok(())
    }
}

/// Like [`composite_aqi`], but rejects reading sets that do not satisfy
/// the policy instead of silently zero-filling them.
pub fn composite_aqi_checked(
    readings: &HashMap<Pollutant, f64>,
    policy: &CompositePolicy,
) -> Result<f64> {
    policy.check(readings)?;
    Ok(composite_aqi(readings))
}
