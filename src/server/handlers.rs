use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::aqi::{AqiCategory, Pollutant};
use crate::error::ServiceError;
use crate::predictor::{ModelRegistry, Target};
use crate::server::routes::AppState;
use crate::utils::{is_within_india, parse_coordinate, validate_india_coordinates};

const MISSING_COORDINATES: &str = "Latitude and longitude are required";
const NO_LOCATIONS: &str = "No locations provided";
const BATCH_OUT_OF_BOUNDS: &str = "Location out of bounds. Only India is supported.";

/// Error responses always carry an `error` field, with extra context for
/// out-of-bounds rejections.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: Value,
}

impl ApiError {
    pub fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "error": message }),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        let message = error.to_string();
        match error {
            ServiceError::OutOfBounds {
                latitude,
                longitude,
            } => Self {
                status: StatusCode::BAD_REQUEST,
                body: json!({
                    "error": message,
                    "latitude": latitude,
                    "longitude": longitude,
                }),
            },
            _ => Self::bad_request(&message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Coordinates as clients send them: JSON numbers or numeric strings
/// (decimal or DMS), with `lon` accepted as an alias for `lng`.
#[derive(Debug, Deserialize)]
pub struct LocationPayload {
    lat: Option<Value>,
    lng: Option<Value>,
    lon: Option<Value>,
}

impl LocationPayload {
    /// `Ok(None)` when either coordinate is absent; `Err` when one is
    /// present but unparseable.
    fn coordinates(&self) -> crate::error::Result<Option<(f64, f64)>> {
        let lat = match &self.lat {
            Some(value) => value,
            None => return Ok(None),
        };
        let lng = match self.lng.as_ref().or(self.lon.as_ref()) {
            Some(value) => value,
            None => return Ok(None),
        };

        Ok(Some((coerce_coordinate(lat)?, coerce_coordinate(lng)?)))
    }
}

fn coerce_coordinate(value: &Value) -> crate::error::Result<f64> {
    match value {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| ServiceError::InvalidCoordinate(number.to_string())),
        Value::String(text) => parse_coordinate(text),
        other => Err(ServiceError::InvalidCoordinate(other.to_string())),
    }
}

/// Rounded per-target predictions, serialized in reporting order. AQI is
/// rounded to an integer, everything else to two decimals.
#[derive(Debug, Default, Serialize)]
pub struct PredictionValues {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm25: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm10: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub so2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub o3: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aqi: Option<i64>,
}

impl PredictionValues {
    fn set(&mut self, target: Target, value: f64) {
        match target {
            Target::Pollutant(Pollutant::Pm25) => self.pm25 = Some(round2(value)),
            Target::Pollutant(Pollutant::Pm10) => self.pm10 = Some(round2(value)),
            Target::Pollutant(Pollutant::No2) => self.no2 = Some(round2(value)),
            Target::Pollutant(Pollutant::So2) => self.so2 = Some(round2(value)),
            Target::Pollutant(Pollutant::Co) => self.co = Some(round2(value)),
            Target::Pollutant(Pollutant::O3) => self.o3 = Some(round2(value)),
            Target::Aqi => self.aqi = Some(value.round() as i64),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub predictions: PredictionValues,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aqi_category: Option<AqiCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_advice: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchResult {
    Success(PredictionResponse),
    OutOfBounds {
        latitude: f64,
        longitude: f64,
        error: &'static str,
    },
}

#[derive(Debug, Serialize)]
pub struct BatchPredictResponse {
    pub batch_results: Vec<BatchResult>,
}

/// Runs every loaded model for a validated coordinate and assembles the
/// response. The category and advisory are derived from the rounded AQI
/// prediction, so they appear exactly when an AQI model is loaded.
fn evaluate_location(
    registry: &ModelRegistry,
    lat: f64,
    lng: f64,
    include_advice: bool,
) -> PredictionResponse {
    let mut predictions = PredictionValues::default();
    for (target, value) in registry.predict_all(lat, lng) {
        predictions.set(target, value);
    }

    let aqi_category = predictions.aqi.map(|aqi| AqiCategory::from_aqi(aqi as f64));
    let health_advice = if include_advice {
        aqi_category.map(|category| category.advisory())
    } else {
        None
    };

    PredictionResponse {
        latitude: lat,
        longitude: lng,
        predictions,
        aqi_category,
        health_advice,
    }
}

pub async fn home() -> Json<Value> {
    Json(json!({
        "message": "Vayuraksha AI Backend is Running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/predict": "POST - Predict for single location",
            "/batch_predict": "POST - Predict for multiple locations",
            "/health": "GET - Health check",
            "/model_info": "GET - Information about loaded models"
        }
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Local::now().to_rfc3339(),
    }))
}

pub async fn model_info(State(state): State<AppState>) -> Json<Value> {
    let loaded: Vec<&'static str> = state
        .registry
        .loaded_targets()
        .iter()
        .map(|target| target.as_str())
        .collect();

    Json(json!({
        "loaded_models": loaded,
        "model_type": state.registry.model_type().unwrap_or("KnnRegressor"),
        "features": ["latitude", "longitude"],
    }))
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<LocationPayload>, JsonRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::bad_request(&rejection.to_string()))?;

    let (lat, lng) = payload
        .coordinates()?
        .ok_or_else(|| ApiError::bad_request(MISSING_COORDINATES))?;

    validate_india_coordinates(lat, lng)?;

    Ok(Json(evaluate_location(&state.registry, lat, lng, true)))
}

pub async fn batch_predict(
    State(state): State<AppState>,
    payload: Result<Json<BatchPayload>, JsonRejection>,
) -> Result<Json<BatchPredictResponse>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| ApiError::bad_request(&rejection.to_string()))?;

    if payload.locations.is_empty() {
        return Err(ApiError::bad_request(NO_LOCATIONS));
    }

    let mut batch_results = Vec::with_capacity(payload.locations.len());

    for location in &payload.locations {
        // Entries without both coordinates are skipped, not rejected.
        let (lat, lng) = match location.coordinates()? {
            Some(coordinates) => coordinates,
            None => continue,
        };

        if !is_within_india(lat, lng) {
            batch_results.push(BatchResult::OutOfBounds {
                latitude: lat,
                longitude: lng,
                error: BATCH_OUT_OF_BOUNDS,
            });
            continue;
        }

        batch_results.push(BatchResult::Success(evaluate_location(
            &state.registry,
            lat,
            lng,
            false,
        )));
    }

    Ok(Json(BatchPredictResponse { batch_results }))
}

#[derive(Debug, Deserialize)]
pub struct BatchPayload {
    #[serde(default)]
    locations: Vec<LocationPayload>,
}
