pub mod error;
pub mod handlers;
pub mod routes;
pub mod telemetry;

pub use error::ApiError;
pub use handlers::*;
pub use routes::{build_router, BASE_PATH};

use crate::service::SavingsService;
use std::sync::Arc;
use std::time::Instant;

/// 共享状态: 计算服务 + 启动时间 (用于 /performance)
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SavingsService>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(service: Arc<SavingsService>) -> Self {
        Self {
            service,
            started_at: Instant::now(),
        }
    }
}
