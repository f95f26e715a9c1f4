use receipt_points::{api, logging, AppConfig, ReceiptService, ScoreStore};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载配置
    let config = AppConfig::load()?;

    // 初始化日志
    logging::init_logging(&config.log.level);
    info!("Starting server with config: {:?}", config);

    // 创建积分存储与服务
    let store = Arc::new(ScoreStore::new());
    let service = Arc::new(ReceiptService::new(store));

    // 构建路由
    let app = api::router(service);

    // 启动服务器
    let addr = config.listen_addr();
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /receipts/process      - score a receipt, returns its id");
    info!("  GET  /receipts/:id/points   - points for a processed receipt");
    info!("  GET  /health");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
