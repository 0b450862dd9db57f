pub mod constants;
pub mod coordinates;
pub mod progress;

pub use constants::*;
pub use coordinates::{
    dms_to_decimal, haversine_distance, is_within_india, parse_coordinate,
    validate_india_coordinates,
};
pub use progress::ProgressReporter;
