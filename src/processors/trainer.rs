use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::error::{Result, ServiceError};
use crate::models::LocationSample;
use crate::predictor::knn::TrainingPoint;
use crate::predictor::{KnnRegressor, Predictor, Target};
use crate::utils::{ProgressReporter, HOLDOUT_STRIDE};

/// Per-target holdout metrics. Metrics are `None` when the holdout is
/// empty (RMSE) or constant (R²).
#[derive(Debug, Clone)]
pub struct EvalReport {
    pub target: Target,
    pub rmse: Option<f64>,
    pub r2: Option<f64>,
    pub train_count: usize,
    pub test_count: usize,
}

/// Everything the training run produced, models in reporting order.
pub struct TrainingOutcome {
    pub models: Vec<(Target, KnnRegressor)>,
    pub reports: Vec<EvalReport>,
}

/// Labels samples with their composite AQI, splits off a deterministic
/// holdout, and fits one regressor per target in parallel.
pub struct ModelTrainer {
    neighbours: usize,
    max_points: usize,
    max_workers: usize,
}

impl ModelTrainer {
    pub fn new(neighbours: usize, max_points: usize) -> Self {
        Self::with_workers(neighbours, max_points, num_cpus::get())
    }

    pub fn with_workers(neighbours: usize, max_points: usize, max_workers: usize) -> Self {
        Self {
            neighbours,
            max_points,
            max_workers: max_workers.max(1),
        }
    }

    /// Computes the composite AQI label for every sample.
    pub fn label_samples(&self, samples: &mut [LocationSample]) {
        for sample in samples.iter_mut() {
            sample.label_aqi();
        }
    }

    /// Deterministic split: every fifth sample goes to the holdout, the
    /// rest train. Sample order is the pivot's sorted order, so repeated
    /// runs produce the same split.
    pub fn split<'a>(
        &self,
        samples: &'a [LocationSample],
    ) -> (Vec<&'a LocationSample>, Vec<&'a LocationSample>) {
        let mut train = Vec::with_capacity(samples.len());
        let mut holdout = Vec::with_capacity(samples.len() / HOLDOUT_STRIDE + 1);

        for (index, sample) in samples.iter().enumerate() {
            if index % HOLDOUT_STRIDE == HOLDOUT_STRIDE - 1 {
                holdout.push(sample);
            } else {
                train.push(sample);
            }
        }

        (train, holdout)
    }

    /// Runs the full training pass over pivoted samples.
    pub fn train(
        &self,
        mut samples: Vec<LocationSample>,
        progress: Option<&ProgressReporter>,
    ) -> Result<TrainingOutcome> {
        if samples.is_empty() {
            return Err(ServiceError::MissingData(
                "no training samples after pivoting the dataset".to_string(),
            ));
        }

        self.label_samples(&mut samples);
        let (train_set, holdout) = self.split(&samples);

        if train_set.is_empty() {
            return Err(ServiceError::MissingData(
                "training split is empty".to_string(),
            ));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| ServiceError::WorkerPool(e.to_string()))?;

        let fitted_count = AtomicUsize::new(0);

        let fitted: Result<Vec<(Target, KnnRegressor, EvalReport)>> = pool.install(|| {
            Target::ALL
                .par_iter()
                .map(|&target| {
                    let points: Vec<TrainingPoint> = train_set
                        .iter()
                        .map(|sample| TrainingPoint {
                            lat: sample.lat,
                            lon: sample.lon,
                            value: target.value_of(sample),
                        })
                        .collect();

                    let model = KnnRegressor::fit(points, self.neighbours, self.max_points)?;
                    let (rmse, r2) = evaluate(&model, &holdout, target);

                    let report = EvalReport {
                        target,
                        rmse,
                        r2,
                        train_count: train_set.len(),
                        test_count: holdout.len(),
                    };

                    let count = fitted_count.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(p) = progress {
                        p.update(count as u64);
                    }

                    Ok((target, model, report))
                })
                .collect()
        });
        let fitted = fitted?;

        let mut models = Vec::with_capacity(fitted.len());
        let mut reports = Vec::with_capacity(fitted.len());
        for (target, model, report) in fitted {
            models.push((target, model));
            reports.push(report);
        }

        if let Some(p) = progress {
            p.finish_with_message(&format!("Fitted {} models", models.len()));
        }

        Ok(TrainingOutcome { models, reports })
    }
}

fn evaluate(
    model: &KnnRegressor,
    holdout: &[&LocationSample],
    target: Target,
) -> (Option<f64>, Option<f64>) {
    if holdout.is_empty() {
        return (None, None);
    }

    let mut squared_error_sum = 0.0;
    let mut actuals = Vec::with_capacity(holdout.len());

    for sample in holdout {
        let actual = target.value_of(sample);
        let predicted = model.predict(sample.lat, sample.lon);
        squared_error_sum += (predicted - actual).powi(2);
        actuals.push(actual);
    }

    let n = holdout.len() as f64;
    let rmse = (squared_error_sum / n).sqrt();

    let mean = actuals.iter().sum::<f64>() / n;
    let ss_tot: f64 = actuals.iter().map(|actual| (actual - mean).powi(2)).sum();
    let r2 = if ss_tot > 0.0 {
        Some(1.0 - squared_error_sum / ss_tot)
    } else {
        None
    };

    (Some(rmse), r2)
}
