//! shiftcash-engine server.
//!
//! Loads the catalog and the saved state, then serves the JSON API.

use shiftcash_engine::api::{AppState, create_router};
use shiftcash_engine::config::{ConfigLoader, ServerSettings};
use shiftcash_engine::ledger::StateStore;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shiftcash_engine=info".into()),
        )
        .init();

    let settings = ServerSettings::from_env();

    let catalog = match ConfigLoader::load(&settings.catalog_dir) {
        Ok(loader) => loader.into_catalog(),
        Err(e) => {
            tracing::warn!("{e}; using the built-in catalog");
            ConfigLoader::builtin()?.into_catalog()
        }
    };

    let store = StateStore::new(&settings.state_path);
    let ledger = store.load_or_default(&catalog);
    tracing::info!(
        shifts = ledger.shifts().len(),
        state = %store.path().display(),
        "State ready"
    );

    let app = create_router(AppState::new(ledger, store));

    let listener = tokio::net::TcpListener::bind(&settings.addr).await?;
    tracing::info!("shiftcash-engine listening on {}", settings.addr);
    axum::serve(listener, app).await?;

    Ok(())
}
