use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};
use crate::predictor::Predictor;
use crate::utils::haversine_distance;

/// Distances at or below this are treated as an exact coordinate hit.
const ZERO_DISTANCE_KM: f64 = 1e-9;

/// One stored training point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrainingPoint {
    pub lat: f64,
    pub lon: f64,
    pub value: f64,
}

/// K-nearest-neighbour regressor over haversine distance with
/// inverse-distance weighting.
///
/// Zero-distance neighbours would dominate the weighting, so a query that
/// lands exactly on stored coordinates short-circuits to the mean of the
/// coincident values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnnRegressor {
    neighbours: usize,
    points: Vec<TrainingPoint>,
}

impl KnnRegressor {
    /// Fits a model by storing the training points.
    ///
    /// `max_points` caps memory for large exports by even-stride
    /// subsampling; 0 disables the cap.
    pub fn fit(points: Vec<TrainingPoint>, neighbours: usize, max_points: usize) -> Result<Self> {
        if points.is_empty() {
            return Err(ServiceError::MissingData(
                "cannot fit a model with zero training points".to_string(),
            ));
        }

        let points = if max_points > 0 && points.len() > max_points {
            let step = points.len().div_ceil(max_points);
            points.into_iter().step_by(step).collect()
        } else {
            points
        };

        Ok(Self {
            neighbours: neighbours.max(1),
            points,
        })
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn neighbours(&self) -> usize {
        self.neighbours
    }
}

impl Predictor for KnnRegressor {
    fn predict(&self, lat: f64, lng: f64) -> f64 {
        let mut exact_sum = 0.0;
        let mut exact_count = 0usize;
        let mut scored: Vec<(f64, f64)> = Vec::with_capacity(self.points.len());

        for point in &self.points {
            let distance = haversine_distance(lat, lng, point.lat, point.lon);
            if distance <= ZERO_DISTANCE_KM {
                exact_sum += point.value;
                exact_count += 1;
            }
            scored.push((distance, point.value));
        }

        if exact_count > 0 {
            return exact_sum / exact_count as f64;
        }
        if scored.is_empty() {
            return 0.0;
        }

        let k = self.neighbours.min(scored.len());
        if k < scored.len() {
            scored.select_nth_unstable_by(k - 1, |a, b| a.0.total_cmp(&b.0));
        }

        let mut weighted = 0.0;
        let mut weight_sum = 0.0;
        for &(distance, value) in &scored[..k] {
            let weight = 1.0 / distance;
            weighted += value * weight;
            weight_sum += weight;
        }

        weighted / weight_sum
    }

    fn model_type(&self) -> &'static str {
        "KnnRegressor"
    }
}
