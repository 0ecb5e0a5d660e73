use thiserror::Error;

#[derive(Error, Debug)]
pub enum GazetteError {
    #[error("Article not found: {0}")]
    NotFound(String),

    #[error("{}", .0.join(". "))]
    Validation(Vec<String>),

    #[error("An article titled '{0}' already exists")]
    DuplicateTitle(String),

    #[error("Invalid article id: {0}")]
    InvalidId(String),

    #[error("Cast to {kind} failed for value \"{value}\" at path \"{field}\"")]
    Cast {
        kind: &'static str,
        value: String,
        field: &'static str,
    },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GazetteError>;
