//! Process configuration.
//!
//! Values come from the process environment, optionally seeded from a
//! dotenv-style file. Variables already present in the environment win over
//! the file.

use std::path::Path;

use tracing::debug;

use crate::api::ServerConfig;
use crate::error::{GazetteError, Result};
use crate::query::QueryLimits;

/// Token in `DATABASE` replaced by `DATABASE_PASSWORD`.
pub const PASSWORD_PLACEHOLDER: &str = "<PASSWORD>";
pub const DEFAULT_CONFIG_FILE: &str = "config.env";
pub const DEFAULT_DATABASE: &str = "articles.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

const REDACTED: &str = "*****";

#[derive(Debug, Clone)]
pub struct Config {
    database: String,
    database_redacted: String,
    pub host: String,
    pub port: u16,
    pub max_page_size: Option<u32>,
}

impl Config {
    /// Load `path` into the environment (if it exists) and read the result.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            dotenv::from_path(path).map_err(|e| {
                GazetteError::Config(format!("Failed to read '{}': {}", path.display(), e))
            })?;
            debug!(path = %path.display(), "Loaded configuration file");
        } else {
            debug!(path = %path.display(), "No configuration file, using environment only");
        }
        Self::from_env()
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let template = lookup("DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let database = if template.contains(PASSWORD_PLACEHOLDER) {
            let password = lookup("DATABASE_PASSWORD").ok_or_else(|| {
                GazetteError::Config(format!(
                    "DATABASE contains {} but DATABASE_PASSWORD is not set",
                    PASSWORD_PLACEHOLDER
                ))
            })?;
            template.replace(PASSWORD_PLACEHOLDER, &password)
        } else {
            template.clone()
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| GazetteError::Config(format!("Invalid PORT: {}", raw)))?,
            None => DEFAULT_PORT,
        };

        let max_page_size = match lookup("MAX_PAGE_SIZE") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    return Err(GazetteError::Config(format!(
                        "Invalid MAX_PAGE_SIZE: {}",
                        raw
                    )))
                }
            },
            None => None,
        };

        Ok(Self {
            database,
            database_redacted: template.replace(PASSWORD_PLACEHOLDER, REDACTED),
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            max_page_size,
        })
    }

    /// Connection string with the secret substituted in.
    pub fn connection_string(&self) -> &str {
        &self.database
    }

    /// Connection string safe to log.
    pub fn redacted_connection_string(&self) -> &str {
        &self.database_redacted
    }

    pub fn query_limits(&self) -> QueryLimits {
        QueryLimits::default().with_max_limit(self.max_page_size)
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::default()
            .with_host(self.host.clone())
            .with_port(self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn config(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.connection_string(), DEFAULT_DATABASE);
        assert_eq!(cfg.host, DEFAULT_HOST);
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.max_page_size, None);
        assert_eq!(cfg.query_limits().max_limit, None);
    }

    #[test]
    fn test_password_substitution_and_redaction() {
        let cfg = config(&[
            ("DATABASE", "file:/data/articles.db?user=admin&password=<PASSWORD>"),
            ("DATABASE_PASSWORD", "s3cret"),
        ])
        .unwrap();
        assert_eq!(
            cfg.connection_string(),
            "file:/data/articles.db?user=admin&password=s3cret"
        );
        assert_eq!(
            cfg.redacted_connection_string(),
            "file:/data/articles.db?user=admin&password=*****"
        );
    }

    #[test]
    fn test_missing_password_for_placeholder_is_an_error() {
        let err = config(&[("DATABASE", "file:x.db?password=<PASSWORD>")]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_PASSWORD"));
    }

    #[test]
    fn test_password_not_required_without_placeholder() {
        let cfg = config(&[("DATABASE", ":memory:")]).unwrap();
        assert_eq!(cfg.connection_string(), ":memory:");
    }

    #[test]
    fn test_port_and_page_cap() {
        let cfg = config(&[("PORT", "8081"), ("MAX_PAGE_SIZE", "100")]).unwrap();
        assert_eq!(cfg.port, 8081);
        assert_eq!(cfg.query_limits().max_limit, Some(100));
        assert_eq!(cfg.server_config().port, 8081);

        assert!(config(&[("PORT", "eighty")]).is_err());
        assert!(config(&[("MAX_PAGE_SIZE", "0")]).is_err());
    }

    #[test]
    fn test_load_reads_file_into_environment() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.env");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "GAZETTE_TEST_ONLY_KEY=from-file").unwrap();

        Config::load(&path).unwrap();
        assert_eq!(
            std::env::var("GAZETTE_TEST_ONLY_KEY").unwrap(),
            "from-file"
        );
    }

    #[test]
    fn test_load_tolerates_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(Config::load(&dir.path().join("absent.env")).is_ok());
    }
}
