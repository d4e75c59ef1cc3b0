use roundup_savings::{api::BASE_PATH, build_router, AppConfig, AppState, SavingsService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 本地时间格式, 级别由 RUST_LOG 控制
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::load()?;
    info!("Starting server with config: {:?}", config);

    let service = Arc::new(SavingsService::new(config.engine.clone())?);
    let app = build_router(AppState::new(service));

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST {}/transactions:parse", BASE_PATH);
    info!("  POST {}/transactions:validator", BASE_PATH);
    info!("  POST {}/transactions:filter", BASE_PATH);
    info!("  POST {}/returns:nps", BASE_PATH);
    info!("  POST {}/returns:index", BASE_PATH);
    info!("  GET  {}/performance", BASE_PATH);
    info!("  GET  /health");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
