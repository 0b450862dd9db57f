use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::aqi::Pollutant;

/// One row of the long-format sensor export. Columns beyond the ones named
/// here (location ids, units, ...) are ignored during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RawObservation {
    pub datetime: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,

    pub parameter: String,

    pub value: f64,
}

impl RawObservation {
    pub fn new(datetime: String, lat: f64, lon: f64, parameter: String, value: f64) -> Self {
        Self {
            datetime,
            lat,
            lon,
            parameter,
            value,
        }
    }

    /// The pollutant this row measures, if the parameter has a breakpoint
    /// table.
    pub fn pollutant(&self) -> Option<Pollutant> {
        Pollutant::from_parameter(&self.parameter)
    }

    pub fn is_usable(&self) -> bool {
        self.value.is_finite() && self.pollutant().is_some()
    }
}
