use std::collections::HashMap;

use tracing::warn;
use validator::Validate;

use crate::aqi::Pollutant;
use crate::error::Result;
use crate::models::{LocationSample, RawObservation};

/// Grouping key for one sample. Coordinates are keyed by their bit patterns
/// so that identical f64 values always land in the same bucket.
type SampleKey = (u64, u64, String);

/// Pivots the long-format export into one wide sample per
/// (lat, lon, datetime), mean-aggregating duplicate readings of the same
/// pollutant at the same key.
pub struct ObservationPivot;

impl ObservationPivot {
    pub fn new() -> Self {
        Self
    }

    pub fn pivot(&self, observations: &[RawObservation]) -> Result<Vec<LocationSample>> {
        let mut grouped: HashMap<SampleKey, HashMap<Pollutant, (f64, u32)>> = HashMap::new();

        for observation in observations {
            let pollutant = match observation.pollutant() {
                Some(pollutant) => pollutant,
                None => continue,
            };

            let key = (
                observation.lat.to_bits(),
                observation.lon.to_bits(),
                observation.datetime.clone(),
            );

            let entry = grouped
                .entry(key)
                .or_default()
                .entry(pollutant)
                .or_insert((0.0, 0));
            entry.0 += observation.value;
            entry.1 += 1;
        }

        let mut samples = Vec::with_capacity(grouped.len());
        let mut dropped = 0usize;

        for ((lat_bits, lon_bits, datetime), readings) in grouped {
            let mut sample =
                LocationSample::new(f64::from_bits(lat_bits), f64::from_bits(lon_bits), datetime);

            for (pollutant, (sum, count)) in readings {
                sample.set(pollutant, sum / count as f64);
            }

            if let Err(error) = sample.validate() {
                warn!(
                    lat = sample.lat,
                    lon = sample.lon,
                    %error,
                    "dropping sample with invalid coordinates"
                );
                dropped += 1;
                continue;
            }

            samples.push(sample);
        }

        if dropped > 0 {
            warn!(dropped, "samples dropped during pivot");
        }

        // Sort for a reproducible sample order regardless of map iteration.
        samples.sort_by(|a, b| {
            a.lat
                .total_cmp(&b.lat)
                .then_with(|| a.lon.total_cmp(&b.lon))
                .then_with(|| a.datetime.cmp(&b.datetime))
        });

        Ok(samples)
    }
}

impl Default for ObservationPivot {
    fn default() -> Self {
        Self::new()
    }
}
