pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod service;

pub use api::{build_router, AppState};
pub use config::{AppConfig, EngineConfig};
pub use error::EngineError;
pub use service::SavingsService;
