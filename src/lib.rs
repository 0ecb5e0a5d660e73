pub mod api;
pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod query;
pub mod storage;

pub use api::{AppState, GazetteServer, ServerConfig};
pub use config::Config;
pub use error::{GazetteError, Result};
pub use storage::ArticleStore;
