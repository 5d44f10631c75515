// src/bin/import_questions.rs

use std::{path::Path, process::ExitCode};

use quiz_backend::{
    config::Config,
    importer::{self, DEFAULT_INPUT_FILE, ImportDefaults},
    store::{PgStore, postgres},
    utils::logging::init_tracing,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _guard = init_tracing(&config, "import_questions.log");
    tracing::info!("Starting import of {}", DEFAULT_INPUT_FILE);

    // Read the file before touching the database.
    let document = match importer::read_document(Path::new(DEFAULT_INPUT_FILE)) {
        Ok(document) => document,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let pool = match postgres::connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to connect to database: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let store = PgStore::new(pool);

    let report = importer::import_document(&store, &document, &ImportDefaults::default()).await;
    tracing::info!("Import finished: {}", report);

    ExitCode::SUCCESS
}
