// src/main.rs

use std::{net::SocketAddr, process::ExitCode, sync::Arc};

use quiz_backend::{
    config::Config,
    routes,
    state::AppState,
    store::{PgStore, postgres},
    utils::logging::init_tracing,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration from environment (.env included)
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _guard = init_tracing(&config, "quiz-backend.log");

    let pool = match postgres::connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to connect to database: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Database connected...");

    let state = AppState {
        store: Arc::new(PgStore::new(pool)),
        config: config.clone(),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Listening on {}", addr);

    // Start the server
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
