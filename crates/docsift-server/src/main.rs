use tracing_subscriber::EnvFilter;

use docsift_server::{build_app, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("docsift=info".parse().unwrap()))
        .init();

    let config = docsift_core::AppConfig::from_env();
    let host = config.server_host.clone();
    let port = config.server_port;

    tracing::info!(
        ocr_command = %config.ocr.command,
        ocr_language = %config.ocr.language,
        timeout_secs = config.extraction_timeout_secs,
        max_upload_bytes = config.max_upload_bytes,
        "Loaded configuration"
    );

    let app = build_app(AppState::from_config(config));

    let addr = format!("{host}:{port}");
    tracing::info!("docsift server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, app).await.expect("Server error");
}
