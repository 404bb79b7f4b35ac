//! Q&A server binary
//!
//! Run with: cargo run --bin askdoc-server

use std::path::PathBuf;

use askdoc::{config::AppConfig, server::QaServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "askdoc=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!(
        r#"
╔═══════════════════════════════════════════════════════════╗
║                         askdoc                            ║
║     Document Q&A with Retrieval-Grounded Answers          ║
╚═══════════════════════════════════════════════════════════╝
"#
    );

    let config_path = std::env::var("ASKDOC_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("askdoc.toml"));
    let config = AppConfig::load(&config_path)?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.embeddings.model);
    tracing::info!("  - Embedding dimensions: {}", config.embeddings.dimensions);
    tracing::info!("  - LLM model: {}", config.llm.model);
    tracing::info!("  - Transcription model: {}", config.transcription.model);
    tracing::info!("  - Chunk window: {} words", config.chunking.window_words);
    tracing::info!("  - Top-K: {}", config.retrieval.top_k);

    if std::env::var(&config.llm.api_key_env).is_err() {
        tracing::warn!(
            "{} is not set; LLM and transcription calls will fail",
            config.llm.api_key_env
        );
        tracing::warn!("  export {}=<your key> and restart", config.llm.api_key_env);
    }

    let server = QaServer::new(config).await?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST   /api/documents - Upload PDFs");
    println!("  POST   /api/query     - Ask a typed question");
    println!("  POST   /api/voice     - Ask by voice (WAV clip)");
    println!("  GET    /api/chat      - Chat history");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
