// src/bin/api_server.rs

use phonebook::infra::{config, logging};
use phonebook::transport;
use phonebook::{MemoryPersonStore, PersonStore, PhonebookService, PostgresPersonStore, StoreBackend};
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    // --- Store Initialization ---
    let backend = config::store_backend()?;
    let policy = config::duplicate_name_policy(&backend)?;
    let store: Arc<dyn PersonStore> = match &backend {
        StoreBackend::Memory => {
            tracing::info!("using in-memory store (records are lost on restart)");
            Arc::new(MemoryPersonStore::new())
        }
        StoreBackend::Postgres { database_url } => {
            tracing::info!("connecting to Postgres");
            Arc::new(PostgresPersonStore::connect(database_url, config::max_connections()?).await?)
        }
    };

    // --- API Server Initialization ---
    let app_state = transport::http::AppState {
        service: PhonebookService::new(store, policy),
    };
    tracing::info!(policy = ?app_state.service.policy(), "duplicate-name policy");
    let static_dir = PathBuf::from(config::static_dir());
    let app = transport::http::with_layers(transport::http::create_router_with_static(
        app_state,
        &static_dir,
    ));

    let port = config::port()?;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Server running on port {}", port);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger-ui", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    tracing::info!("server stopped");
    Ok(())
}
