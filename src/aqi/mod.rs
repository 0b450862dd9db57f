pub mod breakpoints;
pub mod category;
pub mod composite;

pub use breakpoints::{Breakpoint, Pollutant};
pub use category::AqiCategory;
pub use composite::{composite_aqi, composite_aqi_checked, CompositePolicy};
