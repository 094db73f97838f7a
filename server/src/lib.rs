pub mod config;
pub mod error;
pub mod transport;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use transport::{build_router, serve, AppState};
