use rx_ocr_gateway::infrastructure::{AppConfig, AppContainer};
use rx_ocr_gateway::presentation::http::server::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;
    tracing::info!(
        "Uploads in {}, OCR command {:?}, timeout {:?}",
        config.upload_dir.display(),
        config.ocr_command,
        config.ocr_timeout
    );

    let container = AppContainer::new(&config).await?;

    HttpServer::new(
        container.upload_handler.clone(),
        config.socket_addr(),
        config.max_upload_bytes,
    )
    .run()
    .await
}
