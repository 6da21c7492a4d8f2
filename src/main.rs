// src/main.rs

use std::sync::Arc;

use dotenvy::dotenv;
use quiz_console::client::HttpFetcher;
use quiz_console::config::Config;
use quiz_console::routes;
use quiz_console::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "quiz_console.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    tracing::info!(
        "Questions API at {}, students API at {}",
        config.questions_api,
        config.students_api
    );

    let fetcher = Arc::new(HttpFetcher::new(&config)?);
    let state = AppState::new(fetcher);

    // Both screens load once on open; a failure leaves them empty until the
    // next reload.
    let (questions, students) = tokio::join!(state.questions.reload(), state.students.reload());
    if let Err(e) = questions {
        tracing::warn!("Initial questions load failed: {}", e);
    }
    if let Err(e) = students {
        tracing::warn!("Initial students load failed: {}", e);
    }

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
