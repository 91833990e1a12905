use std::sync::Arc;
use top_songs_ai::OpenAiBackend;
use top_songs_server::config::ServerConfig;
use top_songs_server::songs;
use top_songs_server::state::AppState;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!(model = %config.llm.model, "Loaded configuration");

    let backend =
        OpenAiBackend::new(config.llm.backend_config()).expect("failed to build LLM backend");
    let state = AppState::new(Arc::new(backend), config.llm.temperature);

    let app = songs::router()
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
