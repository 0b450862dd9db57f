pub mod aqi;
pub mod cli;
pub mod error;
pub mod models;
pub mod predictor;
pub mod processors;
pub mod readers;
pub mod server;
pub mod utils;
pub mod writers;

pub use error::{Result, ServiceError};
