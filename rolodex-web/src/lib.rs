pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod views;

pub use error::{WebError, WebResult};
pub use routes::create_router;
pub use state::AppState;
