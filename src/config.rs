//! Service configuration from environment variables.
//!
//! | Variable               | Default                              |
//! |------------------------|--------------------------------------|
//! | `BIND_HOST`            | `0.0.0.0`                            |
//! | `PORT`                 | `5000`                               |
//! | `PERSONA_DATA_PATH`    | unset (built-in persona table)       |
//! | `QUOTES_CSV_PATH`      | `data/raw/all_thought_labels.csv`    |
//! | `QUOTES_ON_READ_ERROR` | `sample` (`sample` or `partial`)     |

use std::path::PathBuf;

use crate::quotes::ReadErrorPolicy;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_QUOTES_CSV_PATH: &str = "data/raw/all_thought_labels.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub persona_data_path: Option<PathBuf>,
    pub quotes_csv_path: PathBuf,
    pub on_read_error: ReadErrorPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            persona_data_path: None,
            quotes_csv_path: PathBuf::from(DEFAULT_QUOTES_CSV_PATH),
            on_read_error: ReadErrorPolicy::default(),
        }
    }
}

impl ServiceConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unparseable values are logged and replaced by their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT").map(|p| p.trim().parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(e)) => {
                log::warn!("Invalid PORT ({}), using {}", e, DEFAULT_PORT);
                defaults.port
            }
            None => defaults.port,
        };

        let on_read_error = match get("QUOTES_ON_READ_ERROR").map(|p| p.parse::<ReadErrorPolicy>()) {
            Some(Ok(policy)) => policy,
            Some(Err(e)) => {
                log::warn!("{}, using '{:?}'", e, defaults.on_read_error);
                defaults.on_read_error
            }
            None => defaults.on_read_error,
        };

        Self {
            host: get("BIND_HOST").unwrap_or(defaults.host),
            port,
            persona_data_path: get("PERSONA_DATA_PATH").map(PathBuf::from),
            quotes_csv_path: get("QUOTES_CSV_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.quotes_csv_path),
            on_read_error,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
