pub mod service;
pub mod telemetry;

pub use service::{AppState, build_router};
