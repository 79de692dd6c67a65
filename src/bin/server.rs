//! ai-persona HTTP server binary.
//!
//! Starts an axum HTTP server exposing the persona classifier and the
//! survey quote engine.
//!
//! # Environment Variables
//!
//! - `PORT` - HTTP port (default: 5000)
//! - `BIND_HOST` - bind address (default: 0.0.0.0)
//! - `PERSONA_DATA_PATH` - persona reference JSON (default: built-in table)
//! - `QUOTES_CSV_PATH` - quote CSV (default: data/raw/all_thought_labels.csv)
//! - `QUOTES_ON_READ_ERROR` - "sample" (default) or "partial"
//! - `RUST_LOG` - Tracing filter (default: "info")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use std::sync::Arc;

use ai_persona::config::ServiceConfig;
use ai_persona::persona::{PersonaCatalog, PersonaClassifier};
use ai_persona::quotes::{CsvFileSource, QuoteAggregator};
use ai_persona::server::{app_router, AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ai_persona=debug".into()),
        )
        .init();

    let config = ServiceConfig::from_env();

    let catalog = match &config.persona_data_path {
        Some(path) => match PersonaCatalog::from_json_file(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(
                    "Could not load persona data from {}: {}; using defaults",
                    path.display(),
                    e
                );
                PersonaCatalog::builtin()
            }
        },
        None => PersonaCatalog::builtin(),
    };

    let quotes = QuoteAggregator::new(Arc::new(CsvFileSource::new(&config.quotes_csv_path)))
        .with_read_error_policy(config.on_read_error);
    let state = AppState::new(PersonaClassifier::new(catalog), quotes);
    let app = app_router(state);

    let bind_addr = config.bind_addr();
    tracing::info!("ai-persona server starting on {}", bind_addr);
    tracing::info!("Quotes source: {}", config.quotes_csv_path.display());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
