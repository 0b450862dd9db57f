/// India geographic bounds (serving geofence, borders inclusive)
pub const INDIA_MIN_LAT: f64 = 8.0;
pub const INDIA_MAX_LAT: f64 = 38.0;
pub const INDIA_MIN_LNG: f64 = 68.0;
pub const INDIA_MAX_LNG: f64 = 98.0;

/// Model artifact naming: model_<target>.json
pub const MODEL_FILE_PREFIX: &str = "model_";
pub const MODEL_FILE_EXTENSION: &str = "json";
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Regressor defaults
pub const DEFAULT_NEIGHBOURS: usize = 8;
pub const DEFAULT_MAX_POINTS: usize = 20_000;

/// One row in every HOLDOUT_STRIDE goes to the evaluation split (20%)
pub const HOLDOUT_STRIDE: usize = 5;

/// Serving defaults
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MODELS_DIR: &str = "models";
