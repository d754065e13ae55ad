pub mod aggregate;
pub mod app;
pub mod auth;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod reconcile;
pub mod state;
pub mod ui;
pub mod upstream;

pub use aggregate::aggregate;
pub use app::router;
pub use state::AppState;
pub use upstream::UpstreamClient;
