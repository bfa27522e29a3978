// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use wlingo::config::Config;
use wlingo::log_store::{self, SqliteLogLayer};
use wlingo::quiz::QuizService;
use wlingo::quiz::store::{InMemorySessionStore, SessionStore};
use wlingo::routes;
use wlingo::state::AppState;
use wlingo::vocabulary::{Vocabulary, VocabularySource};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, &config.log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Log records are also kept in SQLite (`DB_DIR`/`DB_FILE`)
    let db_layer = match log_store::open(&config.db_dir, &config.db_file).await {
        Ok(pool) => {
            let (layer, records) = SqliteLogLayer::new();
            tokio::spawn(log_store::write_records(pool, records));
            Some(layer)
        }
        Err(e) => {
            eprintln!("WARNING: log database unavailable, continuing without it: {}", e);
            None
        }
    };

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .with(db_layer)
        .init();

    // Vocabulary is loaded once, outside the request path
    let vocabulary: Arc<dyn VocabularySource> = Arc::new(Vocabulary::load_dir(&config.vocab_dir));
    tracing::info!("Vocabulary ready: {} topics", vocabulary.topics().len());

    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new(config.session_timeout()));
    spawn_session_sweeper(store.clone(), config.session_sweep_interval_secs);

    let state = AppState {
        config: config.clone(),
        vocabulary: vocabulary.clone(),
        quiz: Arc::new(QuizService::new(vocabulary, store)),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid listen address {}:{}: {}", config.host, config.port, e);
            return;
        }
    };
    tracing::info!("Listening on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            return;
        }
    };

    // Start the server
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}

/// Periodically evicts expired sessions; lookups also expire them lazily.
fn spawn_session_sweeper(store: Arc<dyn SessionStore>, interval_secs: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
        loop {
            interval.tick().await;
            let removed = store.sweep().await;
            if removed > 0 {
                tracing::info!("Swept {} expired sessions", removed);
            } else {
                tracing::debug!("Session sweep: nothing expired");
            }
        }
    });
}
