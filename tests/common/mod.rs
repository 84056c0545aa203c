//! Shared helpers for the HTTP integration tests.

use phonebook::transport;
use phonebook::{DuplicateNamePolicy, MemoryPersonStore, PersonStore, PhonebookService};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral local port and returns its base URL.
#[allow(dead_code)]
pub async fn serve(router: axum::Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

#[allow(dead_code)]
pub fn state(store: Arc<dyn PersonStore>, policy: DuplicateNamePolicy) -> transport::http::AppState {
    transport::http::AppState {
        service: PhonebookService::new(store, policy),
    }
}

/// Full API (with access log and CORS) over a fresh in-memory store.
#[allow(dead_code)]
pub async fn spawn_memory_app(policy: DuplicateNamePolicy) -> String {
    let store: Arc<dyn PersonStore> = Arc::new(MemoryPersonStore::new());
    serve(transport::http::with_layers(transport::http::create_router(state(store, policy)))).await
}
