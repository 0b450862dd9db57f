pub mod observation;
pub mod sample;

pub use observation::RawObservation;
pub use sample::LocationSample;
