pub mod config;
pub mod handlers;
pub mod routes;

pub use config::ServeConfig;
pub use routes::{build_router, serve, AppState};
