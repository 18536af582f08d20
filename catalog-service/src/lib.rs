pub mod app;
pub mod app_state;
pub mod config;
pub mod extract;
pub mod item_handlers;
pub mod memory_store;
pub mod models;
pub mod pg_store;
pub mod stock_handlers;
pub mod store;

pub use app::build_router;
pub use app_state::AppState;
pub use common_http_errors::ApiError;
