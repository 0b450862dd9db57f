//! Health categories for a composite AQI value.

use serde::{Deserialize, Serialize};

/// The six CPCB health bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Satisfactory,
    Moderate,
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
    Severe,
}

impl AqiCategory {
    /// Classifies an AQI value. Thresholds are inclusive, so an AQI of
    /// exactly 50 is still `Good`.
    pub fn from_aqi(aqi: f64) -> Self {
        if aqi <= 50.0 {
            AqiCategory::Good
        } else if aqi <= 100.0 {
            AqiCategory::Satisfactory
        } else if aqi <= 200.0 {
            AqiCategory::Moderate
        } else if aqi <= 300.0 {
            AqiCategory::Poor
        } else if aqi <= 400.0 {
            AqiCategory::VeryPoor
        } else {
            AqiCategory::Severe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Satisfactory => "Satisfactory",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Poor => "Poor",
            AqiCategory::VeryPoor => "Very Poor",
            AqiCategory::Severe => "Severe",
        }
    }

    /// The public health advisory displayed alongside the category.
    pub fn advisory(&self) -> &'static str {
        match self {
            AqiCategory::Good => {
                "Air quality is considered satisfactory, and air pollution poses little or no risk."
            }
            AqiCategory::Satisfactory => {
                "Air quality is acceptable; however, for some pollutants there may be a moderate \
                 health concern for a very small number of people who are unusually sensitive to \
                 air pollution."
            }
            AqiCategory::Moderate => {
                "Members of sensitive groups may experience health effects. The general public is \
                 not likely to be affected."
            }
            AqiCategory::Poor => {
                "Everyone may begin to experience health effects; members of sensitive groups may \
                 experience more serious health effects."
            }
            AqiCategory::VeryPoor => {
                "Health warnings of emergency conditions. The entire population is more likely to \
                 be affected."
            }
            AqiCategory::Severe => {
                "Health alert: everyone may experience more serious health effects."
            }
        }
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_are_inclusive() {
        assert_eq!(AqiCategory::from_aqi(0.0), AqiCategory::Good);
        assert_eq!(AqiCategory::from_aqi(50.0), AqiCategory::Good);
        assert_eq!(AqiCategory::from_aqi(50.0001), AqiCategory::Satisfactory);
        assert_eq!(AqiCategory::from_aqi(100.0), AqiCategory::Satisfactory);
        assert_eq!(AqiCategory::from_aqi(113.33), AqiCategory::Moderate);
        assert_eq!(AqiCategory::from_aqi(200.0), AqiCategory::Moderate);
        assert_eq!(AqiCategory::from_aqi(300.0), AqiCategory::Poor);
        assert_eq!(AqiCategory::from_aqi(400.0), AqiCategory::VeryPoor);
        assert_eq!(AqiCategory::from_aqi(400.01), AqiCategory::Severe);
        assert_eq!(AqiCategory::from_aqi(999.0), AqiCategory::Severe);
    }

    #[test]
    fn test_display_uses_spaced_name() {
        assert_eq!(AqiCategory::VeryPoor.to_string(), "Very Poor");
        assert_eq!(
            serde_json::to_string(&AqiCategory::VeryPoor).unwrap(),
            "\"Very Poor\""
        );
    }

    #[test]
    fn test_every_category_has_an_advisory() {
        let categories = [
            AqiCategory::Good,
            AqiCategory::Satisfactory,
            AqiCategory::Moderate,
            AqiCategory::Poor,
            AqiCategory::VeryPoor,
            AqiCategory::Severe,
        ];
        for category in categories {
            assert!(!category.advisory().is_empty());
        }
        assert!(AqiCategory::Good.advisory().starts_with("Air quality is considered"));
        assert!(AqiCategory::Severe.advisory().starts_with("Health alert"));
    }
}
