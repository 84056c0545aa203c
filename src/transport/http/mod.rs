pub mod access_log;
pub mod error;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod fallback;
    pub mod health;
    pub mod info;
    pub mod people;
}

pub use router::{create_router, create_router_with_static, with_layers, ApiDoc};
pub use types::AppState;
