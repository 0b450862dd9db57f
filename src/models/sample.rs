use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::aqi::{composite_aqi, Pollutant};

/// One pivoted training sample: a location and timestamp with whatever
/// pollutant readings the export had for it. Pollutants the sensors did not
/// report stay `None` until training substitutes zero.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LocationSample {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,

    pub datetime: String,

    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub no2: Option<f64>,
    pub so2: Option<f64>,
    pub co: Option<f64>,
    pub o3: Option<f64>,

    /// Composite AQI label, set by [`LocationSample::label_aqi`].
    pub aqi: Option<f64>,
}

impl LocationSample {
    pub fn new(lat: f64, lon: f64, datetime: String) -> Self {
        Self {
            lat,
            lon,
            datetime,
            pm25: None,
            pm10: None,
            no2: None,
            so2: None,
            co: None,
            o3: None,
            aqi: None,
        }
    }

    pub fn get(&self, pollutant: Pollutant) -> Option<f64> {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::No2 => self.no2,
            Pollutant::So2 => self.so2,
            Pollutant::Co => self.co,
            Pollutant::O3 => self.o3,
        }
    }

    pub fn set(&mut self, pollutant: Pollutant, value: f64) {
        let slot = match pollutant {
            Pollutant::Pm25 => &mut self.pm25,
            Pollutant::Pm10 => &mut self.pm10,
            Pollutant::No2 => &mut self.no2,
            Pollutant::So2 => &mut self.so2,
            Pollutant::Co => &mut self.co,
            Pollutant::O3 => &mut self.o3,
        };
        *slot = Some(value);
    }

    /// The concentration used for training, with missing readings
    /// substituted by zero.
    pub fn concentration_or_zero(&self, pollutant: Pollutant) -> f64 {
        self.get(pollutant).unwrap_or(0.0)
    }

    pub fn aqi_or_zero(&self) -> f64 {
        self.aqi.unwrap_or(0.0)
    }

    /// Only the readings that are actually present.
    pub fn readings(&self) -> HashMap<Pollutant, f64> {
        Pollutant::ALL
            .iter()
            .filter_map(|&pollutant| self.get(pollutant).map(|value| (pollutant, value)))
            .collect()
    }

    pub fn reading_count(&self) -> usize {
        Pollutant::ALL
            .iter()
            .filter(|&&pollutant| self.get(pollutant).is_some())
            .count()
    }

    /// Labels the sample with the composite AQI of its readings.
    pub fn label_aqi(&mut self) {
        self.aqi = Some(composite_aqi(&self.readings()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delhi_sample() -> LocationSample {
        LocationSample::new(28.6139, 77.2090, "2023-07-15T10:00:00+05:30".to_string())
    }

    #[test]
    fn test_set_and_get() {
        let mut sample = delhi_sample();
        sample.set(Pollutant::Pm25, 35.0);
        sample.set(Pollutant::O3, 12.0);

        assert_eq!(sample.get(Pollutant::Pm25), Some(35.0));
        assert_eq!(sample.get(Pollutant::Pm10), None);
        assert_eq!(sample.concentration_or_zero(Pollutant::Pm10), 0.0);
        assert_eq!(sample.reading_count(), 2);
    }

    #[test]
    fn test_readings_skip_missing() {
        let mut sample = delhi_sample();
        sample.set(Pollutant::Co, 1.2);

        let readings = sample.readings();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings.get(&Pollutant::Co), Some(&1.2));
    }

    #[test]
    fn test_label_aqi_uses_composite() {
        let mut sample = delhi_sample();
        sample.set(Pollutant::Pm25, 35.0);
        sample.set(Pollutant::Pm10, 120.0);
        sample.label_aqi();

        // pm10 dominates at 113.33
        let aqi = sample.aqi.unwrap();
        assert!((aqi - 113.333333).abs() < 1e-4);
    }

    #[test]
    fn test_validation_rejects_bad_coordinates() {
        let sample = LocationSample::new(95.0, 77.2090, "2023-07-15".to_string());
        assert!(sample.validate().is_err());

        let sample = delhi_sample();
        assert!(sample.validate().is_ok());
    }
}
