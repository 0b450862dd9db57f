use std::collections::HashMap;

use crate::error::{Result, ServiceError};
use crate::predictor::{Predictor, Target};

/// Explicit target-to-model mapping handed to whoever needs predictions.
///
/// The registry is populated once at startup and shared immutably; handlers
/// never reach for global state.
#[derive(Default)]
pub struct ModelRegistry {
    models: HashMap<Target, Box<dyn Predictor>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, target: Target, predictor: Box<dyn Predictor>) {
        self.models.insert(target, predictor);
    }

    pub fn get(&self, target: Target) -> Option<&dyn Predictor> {
        self.models.get(&target).map(|boxed| boxed.as_ref())
    }

    pub fn predict(&self, target: Target, lat: f64, lng: f64) -> Result<f64> {
        let predictor = self
            .get(target)
            .ok_or_else(|| ServiceError::ModelNotFound(target.as_str().to_string()))?;
        Ok(predictor.predict(lat, lng))
    }

    /// Predictions for every loaded target, in reporting order.
    pub fn predict_all(&self, lat: f64, lng: f64) -> Vec<(Target, f64)> {
        Target::ALL
            .iter()
            .filter_map(|&target| {
                self.get(target)
                    .map(|predictor| (target, predictor.predict(lat, lng)))
            })
            .collect()
    }

    /// Loaded targets in reporting order.
    pub fn loaded_targets(&self) -> Vec<Target> {
        Target::ALL
            .iter()
            .copied()
            .filter(|&target| self.models.contains_key(&target))
            .collect()
    }

    /// Missing targets in reporting order.
    pub fn missing_targets(&self) -> Vec<Target> {
        Target::ALL
            .iter()
            .copied()
            .filter(|&target| !self.models.contains_key(&target))
            .collect()
    }

    /// The type name of the loaded models, if any are loaded.
    pub fn model_type(&self) -> Option<&'static str> {
        self.models.values().next().map(|model| model.model_type())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
