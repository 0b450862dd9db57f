pub mod knn;
pub mod registry;

pub use knn::KnnRegressor;
pub use registry::ModelRegistry;

use serde::{Deserialize, Serialize};

use crate::aqi::Pollutant;
use crate::error::ServiceError;
use crate::models::LocationSample;

/// A prediction target: one of the six pollutants, or the composite AQI
/// served by its own regression model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Target {
    Pollutant(Pollutant),
    Aqi,
}

impl Target {
    /// All targets in reporting order.
    pub const ALL: [Target; 7] = [
        Target::Pollutant(Pollutant::Pm25),
        Target::Pollutant(Pollutant::Pm10),
        Target::Pollutant(Pollutant::No2),
        Target::Pollutant(Pollutant::So2),
        Target::Pollutant(Pollutant::Co),
        Target::Pollutant(Pollutant::O3),
        Target::Aqi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Pollutant(pollutant) => pollutant.as_str(),
            Target::Aqi => "aqi",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        if name.trim().eq_ignore_ascii_case("aqi") {
            return Some(Target::Aqi);
        }
        Pollutant::from_parameter(name).map(Target::Pollutant)
    }

    /// The training value for this target, missing readings substituted
    /// by zero.
    pub fn value_of(&self, sample: &LocationSample) -> f64 {
        match self {
            Target::Pollutant(pollutant) => sample.concentration_or_zero(*pollutant),
            Target::Aqi => sample.aqi_or_zero(),
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Target> for String {
    fn from(target: Target) -> String {
        target.as_str().to_string()
    }
}

impl TryFrom<String> for Target {
    type Error = ServiceError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Target::from_name(&name)
            .ok_or_else(|| ServiceError::InvalidFormat(format!("unknown prediction target '{name}'")))
    }
}

/// The regression capability behind every target. Any model that can map a
/// coordinate to a value works here; the shipped implementation is
/// [`KnnRegressor`].
pub trait Predictor: Send + Sync {
    fn predict(&self, lat: f64, lng: f64) -> f64;

    /// Short type name reported by the model-info endpoint.
    fn model_type(&self) -> &'static str;
}
