//! CPCB sub-index tables for the six pollutants the service predicts.
//!
//! Each pollutant maps a raw concentration onto the 0-500 AQI scale through
//! a piecewise-linear table. Segments are matched in ascending order with an
//! inclusive upper bound, so a concentration sitting exactly on a boundary
//! resolves to the lower segment.

use serde::{Deserialize, Serialize};

/// Pollutants with a CPCB breakpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    Pm25,
    Pm10,
    No2,
    So2,
    Co,
    O3,
}

impl Pollutant {
    /// All pollutants in reporting order.
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::Co,
        Pollutant::O3,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm25",
            Pollutant::Pm10 => "pm10",
            Pollutant::No2 => "no2",
            Pollutant::So2 => "so2",
            Pollutant::Co => "co",
            Pollutant::O3 => "o3",
        }
    }

    /// Maps a dataset `parameter` column value to a pollutant. Returns `None`
    /// for parameters without a breakpoint table (temperature, humidity, ...).
    pub fn from_parameter(parameter: &str) -> Option<Self> {
        match parameter.trim().to_ascii_lowercase().as_str() {
            "pm25" | "pm2.5" => Some(Pollutant::Pm25),
            "pm10" => Some(Pollutant::Pm10),
            "no2" => Some(Pollutant::No2),
            "so2" => Some(Pollutant::So2),
            "co" => Some(Pollutant::Co),
            "o3" => Some(Pollutant::O3),
            _ => None,
        }
    }

    fn breakpoints(&self) -> &'static [Breakpoint; 6] {
        match self {
            Pollutant::Pm25 => &PM25_BREAKPOINTS,
            Pollutant::Pm10 => &PM10_BREAKPOINTS,
            Pollutant::No2 => &NO2_BREAKPOINTS,
            Pollutant::So2 => &SO2_BREAKPOINTS,
            Pollutant::Co => &CO_BREAKPOINTS,
            Pollutant::O3 => &O3_BREAKPOINTS,
        }
    }

    /// Computes the sub-index for a concentration.
    ///
    /// The function is total: negative and extreme inputs extrapolate along
    /// the first and last segments rather than erroring.
    ///
    /// # Examples
    ///
    /// ```
    /// use vayuraksha::aqi::Pollutant;
    ///
    /// let sub = Pollutant::Pm25.sub_index(35.0);
    /// assert!((sub - 58.3333).abs() < 0.001);
    /// ```
    pub fn sub_index(&self, concentration: f64) -> f64 {
        let segments = self.breakpoints();
        for segment in segments {
            if segment.contains(concentration) {
                return segment.evaluate(concentration);
            }
        }
        segments[segments.len() - 1].evaluate(concentration)
    }
}

impl std::fmt::Display for Pollutant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One linear segment of a breakpoint table.
///
/// The sub-index at concentration `x` is `index + (x - anchor) * rise / run`.
#[derive(Debug, Clone, Copy)]
pub struct Breakpoint {
    /// Inclusive upper concentration bound, `None` for the open top segment.
    pub upper: Option<f64>,
    /// Sub-index value at the anchor concentration.
    pub index: f64,
    /// Concentration the slope is measured from.
    pub anchor: f64,
    pub rise: f64,
    pub run: f64,
}

impl Breakpoint {
    const fn new(upper: Option<f64>, index: f64, anchor: f64, rise: f64, run: f64) -> Self {
        Self {
            upper,
            index,
            anchor,
            rise,
            run,
        }
    }

    fn contains(&self, concentration: f64) -> bool {
        match self.upper {
            Some(upper) => concentration <= upper,
            None => true,
        }
    }

    fn evaluate(&self, concentration: f64) -> f64 {
        self.index + (concentration - self.anchor) * self.rise / self.run
    }
}

const PM25_BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint::new(Some(30.0), 0.0, 0.0, 50.0, 30.0),
    Breakpoint::new(Some(60.0), 50.0, 30.0, 50.0, 30.0),
    Breakpoint::new(Some(90.0), 100.0, 60.0, 100.0, 30.0),
    Breakpoint::new(Some(120.0), 200.0, 90.0, 100.0, 30.0),
    Breakpoint::new(Some(250.0), 300.0, 120.0, 100.0, 130.0),
    Breakpoint::new(None, 400.0, 250.0, 100.0, 130.0),
];

const PM10_BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint::new(Some(50.0), 0.0, 0.0, 1.0, 1.0),
    Breakpoint::new(Some(100.0), 50.0, 50.0, 1.0, 1.0),
    Breakpoint::new(Some(250.0), 100.0, 100.0, 100.0, 150.0),
    Breakpoint::new(Some(350.0), 200.0, 250.0, 1.0, 1.0),
    Breakpoint::new(Some(430.0), 300.0, 350.0, 100.0, 80.0),
    Breakpoint::new(None, 400.0, 430.0, 100.0, 80.0),
];

const NO2_BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint::new(Some(40.0), 0.0, 0.0, 50.0, 40.0),
    Breakpoint::new(Some(80.0), 50.0, 40.0, 50.0, 40.0),
    Breakpoint::new(Some(180.0), 100.0, 80.0, 1.0, 1.0),
    Breakpoint::new(Some(280.0), 200.0, 180.0, 1.0, 1.0),
    Breakpoint::new(Some(400.0), 300.0, 280.0, 100.0, 120.0),
    Breakpoint::new(None, 400.0, 400.0, 100.0, 120.0),
];

const SO2_BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint::new(Some(40.0), 0.0, 0.0, 50.0, 40.0),
    Breakpoint::new(Some(80.0), 50.0, 40.0, 50.0, 40.0),
    Breakpoint::new(Some(380.0), 100.0, 80.0, 100.0, 300.0),
    Breakpoint::new(Some(800.0), 200.0, 380.0, 100.0, 420.0),
    Breakpoint::new(Some(1600.0), 300.0, 800.0, 100.0, 800.0),
    Breakpoint::new(None, 400.0, 1600.0, 100.0, 800.0),
];

const CO_BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint::new(Some(1.0), 0.0, 0.0, 50.0, 1.0),
    Breakpoint::new(Some(2.0), 50.0, 1.0, 50.0, 1.0),
    Breakpoint::new(Some(10.0), 100.0, 2.0, 100.0, 8.0),
    Breakpoint::new(Some(17.0), 200.0, 10.0, 100.0, 7.0),
    Breakpoint::new(Some(34.0), 300.0, 17.0, 100.0, 17.0),
    Breakpoint::new(None, 400.0, 34.0, 100.0, 17.0),
];

// The ozone table carries two oddities from the published scale: the fifth
// segment divides by 539 rather than the 540-wide span, and the top segment
// is anchored at concentration 400 rather than the 748 boundary. The result
// is an upward jump at 748 (400.19 just below, 464.56 just above).
const O3_BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint::new(Some(50.0), 0.0, 0.0, 1.0, 1.0),
    Breakpoint::new(Some(100.0), 50.0, 50.0, 1.0, 1.0),
    Breakpoint::new(Some(168.0), 100.0, 100.0, 100.0, 68.0),
    Breakpoint::new(Some(208.0), 200.0, 168.0, 100.0, 40.0),
    Breakpoint::new(Some(748.0), 300.0, 208.0, 100.0, 539.0),
    Breakpoint::new(None, 400.0, 400.0, 100.0, 539.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_pm25_known_values() {
        assert_close(Pollutant::Pm25.sub_index(0.0), 0.0);
        assert_close(Pollutant::Pm25.sub_index(30.0), 50.0);
        assert_close(Pollutant::Pm25.sub_index(35.0), 50.0 + 5.0 * 50.0 / 30.0);
        assert_close(Pollutant::Pm25.sub_index(120.0), 300.0);
        assert_close(Pollutant::Pm25.sub_index(250.0), 400.0);
        assert_close(Pollutant::Pm25.sub_index(380.0), 500.0);
    }

    #[test]
    fn test_pm10_identity_below_100() {
        assert_close(Pollutant::Pm10.sub_index(42.5), 42.5);
        assert_close(Pollutant::Pm10.sub_index(75.0), 75.0);
        assert_close(Pollutant::Pm10.sub_index(100.0), 100.0);
        assert_close(Pollutant::Pm10.sub_index(120.0), 100.0 + 20.0 * 100.0 / 150.0);
        assert_close(Pollutant::Pm10.sub_index(300.0), 250.0);
    }

    #[test]
    fn test_co_scale() {
        assert_close(Pollutant::Co.sub_index(0.5), 25.0);
        assert_close(Pollutant::Co.sub_index(1.0), 50.0);
        assert_close(Pollutant::Co.sub_index(1.5), 75.0);
        assert_close(Pollutant::Co.sub_index(6.0), 150.0);
        assert_close(Pollutant::Co.sub_index(50.0), 400.0 + 16.0 * 100.0 / 17.0);
    }

    #[test]
    fn test_boundary_resolves_to_lower_segment() {
        // 30 sits on the first PM2.5 boundary and must use the first segment.
        assert_close(Pollutant::Pm25.sub_index(30.0), 50.0);
        assert!(Pollutant::Pm25.sub_index(30.001) > 50.0);
        assert_close(Pollutant::So2.sub_index(80.0), 100.0);
        assert_close(Pollutant::No2.sub_index(280.0), 300.0);
    }

    #[test]
    fn test_negative_concentration_extrapolates() {
        assert_close(Pollutant::Pm25.sub_index(-5.0), -5.0 * 50.0 / 30.0);
        assert_close(Pollutant::Pm10.sub_index(-1.0), -1.0);
    }

    #[test]
    fn test_o3_fifth_segment_divisor() {
        // 300 + (x - 208) * 100 / 539, so the segment tops out above 400.
        assert_close(Pollutant::O3.sub_index(748.0), 300.0 + 540.0 * 100.0 / 539.0);
        assert!(Pollutant::O3.sub_index(748.0) > 400.18);
    }

    #[test]
    fn test_o3_jump_at_748() {
        let below = Pollutant::O3.sub_index(748.0);
        let above = Pollutant::O3.sub_index(748.0001);
        assert!(below < 400.19);
        assert!(above > 464.0);
        assert_close(Pollutant::O3.sub_index(939.0), 500.0);
    }

    #[test]
    fn test_tables_are_monotonic_non_decreasing() {
        for pollutant in Pollutant::ALL {
            let mut previous = pollutant.sub_index(0.0);
            let mut x = 0.0;
            while x <= 2000.0 {
                let current = pollutant.sub_index(x);
                assert!(
                    current >= previous,
                    "{pollutant} decreased at {x}: {previous} -> {current}"
                );
                previous = current;
                x += 0.25;
            }
        }
    }

    #[test]
    fn test_tables_are_continuous_except_o3_top() {
        for pollutant in Pollutant::ALL {
            let segments = pollutant.breakpoints();
            for pair in segments.windows(2) {
                let upper = match pair[0].upper {
                    Some(upper) => upper,
                    None => continue,
                };
                if pollutant == Pollutant::O3 && upper == 748.0 {
                    continue;
                }
                let from_below = pair[0].evaluate(upper);
                let from_above = pair[1].evaluate(upper);
                assert!(
                    (from_below - from_above).abs() < 1e-9,
                    "{pollutant} discontinuous at {upper}"
                );
            }
        }
    }

    #[test]
    fn test_table_structure() {
        for pollutant in Pollutant::ALL {
            let segments = pollutant.breakpoints();

            let mut previous_upper = f64::NEG_INFINITY;
            for segment in segments.iter().take(segments.len() - 1) {
                let upper = segment.upper.expect("only the last segment is open");
                assert!(
                    upper > previous_upper,
                    "{pollutant} uppers must strictly increase"
                );
                previous_upper = upper;
            }
            assert!(segments[segments.len() - 1].upper.is_none());

            // Each segment is anchored where the previous one ends, except
            // the O3 top segment with its 400 anchor.
            for (index, pair) in segments.windows(2).enumerate() {
                let boundary = pair[0].upper.expect("inner segments are bounded");
                if pollutant == Pollutant::O3 && index == 4 {
                    assert_eq!(pair[1].anchor, 400.0);
                    continue;
                }
                assert_eq!(
                    pair[1].anchor, boundary,
                    "{pollutant} anchor mismatch after {boundary}"
                );
            }
        }
    }

    #[test]
    fn test_from_parameter() {
        assert_eq!(Pollutant::from_parameter("pm25"), Some(Pollutant::Pm25));
        assert_eq!(Pollutant::from_parameter("PM2.5"), Some(Pollutant::Pm25));
        assert_eq!(Pollutant::from_parameter(" o3 "), Some(Pollutant::O3));
        assert_eq!(Pollutant::from_parameter("temperature"), None);
        assert_eq!(Pollutant::from_parameter(""), None);
    }

    #[test]
    fn test_serde_names_are_lowercase() {
        let json = serde_json::to_string(&Pollutant::Pm25).unwrap();
        assert_eq!(json, "\"pm25\"");
        let back: Pollutant = serde_json::from_str("\"o3\"").unwrap();
        assert_eq!(back, Pollutant::O3);
    }
}
