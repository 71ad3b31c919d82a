// ABOUTME: Environment-based server configuration: database location plus policy and narration settings
// ABOUTME: Parses DATABASE_URL into a typed backend selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt;
use std::path::PathBuf;

use super::{ProgramPolicy, TextGenerationConfig};
use crate::constants::storage::DEFAULT_DATABASE_URL;
use crate::errors::{AppError, AppResult};
use crate::logging::LoggingConfig;

/// Storage backend selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// Process-local maps (no persistence)
    InMemory,
    /// In-memory SQLite (single connection)
    SqliteMemory,
    /// SQLite database file
    Sqlite {
        /// File path
        path: PathBuf,
    },
}

impl DatabaseUrl {
    /// Parse a `DATABASE_URL` value
    ///
    /// # Errors
    ///
    /// Returns a configuration error for empty values or unsupported schemes.
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AppError::config("DATABASE_URL must not be empty"));
        }
        if s.eq_ignore_ascii_case("memory") {
            return Ok(Self::InMemory);
        }
        if let Some(rest) = s.strip_prefix("sqlite:") {
            let path = rest.trim_start_matches("//");
            return if path == ":memory:" || path.is_empty() {
                Ok(Self::SqliteMemory)
            } else {
                Ok(Self::Sqlite {
                    path: PathBuf::from(path),
                })
            };
        }
        if s.contains("://") {
            return Err(AppError::config(format!(
                "unsupported database url '{s}'; use 'memory' or 'sqlite:<path>'"
            )));
        }
        Ok(Self::Sqlite {
            path: PathBuf::from(s),
        })
    }

    /// Connection string for sqlx
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::InMemory => "memory".to_owned(),
            Self::SqliteMemory => "sqlite::memory:".to_owned(),
            Self::Sqlite { path } => format!("sqlite:{}", path.display()),
        }
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(DEFAULT_DATABASE_URL).unwrap_or(Self::InMemory)
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_connection_string())
    }
}

/// Aggregate process configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Storage backend
    pub database: DatabaseUrl,
    /// Logging
    pub logging: LoggingConfig,
    /// Engine policy
    pub policy: ProgramPolicy,
    /// Narration adapter
    pub text_generation: TextGenerationConfig,
}

impl ServerConfig {
    /// Load every section from the environment
    ///
    /// # Errors
    ///
    /// Returns a configuration error when any section fails to parse or validate.
    pub fn from_env() -> AppResult<Self> {
        let database = env::var("DATABASE_URL").map_or_else(
            |_| Ok(DatabaseUrl::default()),
            |raw| DatabaseUrl::parse_url(&raw),
        )?;
        Ok(Self {
            database,
            logging: LoggingConfig::from_env(),
            policy: ProgramPolicy::from_env()?,
            text_generation: TextGenerationConfig::from_env()?,
        })
    }

    /// One-line summary safe for logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "database={} gate={:.0}% window={} narration={}",
            self.database,
            self.policy.gate_min_completion_percent,
            self.policy.analyzer_window,
            if self.text_generation.enabled {
                self.text_generation.model.as_str()
            } else {
                "template"
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_parsing() {
        assert_eq!(DatabaseUrl::parse_url("memory").ok(), Some(DatabaseUrl::InMemory));
        assert_eq!(
            DatabaseUrl::parse_url("sqlite::memory:").ok(),
            Some(DatabaseUrl::SqliteMemory)
        );
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/programs.db").ok(),
            Some(DatabaseUrl::Sqlite {
                path: PathBuf::from("./data/programs.db")
            })
        );
        assert!(DatabaseUrl::parse_url("postgres://localhost/db").is_err());
        assert!(DatabaseUrl::parse_url("  ").is_err());
    }

    #[test]
    fn test_default_database_is_sqlite_file() {
        assert_eq!(
            DatabaseUrl::default().to_connection_string(),
            "sqlite:./data/programs.db"
        );
    }
}
