//! TOML-based configuration.
//!
//! Named connections with environment variable expansion:
//! ```toml
//! [connections.default]
//! driver = "sqlite"
//! database = "./data/app.sqlite"
//!
//! [connections.analytics]
//! driver = "postgres"
//! database = "${ANALYTICS_DB}"
//! ```
//!
//! Every configured driver resolves to a grammar for SQL generation; only
//! SQLite connections can also be opened live.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::connection::{Connection, ConnectionFactory};
use crate::error::{SqlError, SqlResult};
use crate::sql::grammar::Grammar;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Named database connections.
    pub connections: HashMap<String, ConnectionConfig>,
}

/// One named connection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectionConfig {
    /// Driver key (mysql, postgres, sqlite, mssql and their aliases).
    pub driver: String,

    /// Database path or name (supports ${ENV_VAR} expansion).
    pub database: String,
}

impl ConnectionConfig {
    /// Database string with environment variables expanded.
    pub fn resolved_database(&self) -> SqlResult<String> {
        expand_env_vars(&self.database)
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_str(text: &str) -> SqlResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> SqlResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_str(&text)
    }

    /// Look up a named connection.
    pub fn connection(&self, name: &str) -> SqlResult<&ConnectionConfig> {
        self.connections
            .get(name)
            .ok_or_else(|| SqlError::ConnectionNotFound(name.to_string()))
    }

    /// The grammar for a named connection's dialect.
    pub fn grammar_for(&self, name: &str) -> SqlResult<Grammar> {
        Grammar::make(&self.connection(name)?.driver)
    }

    /// Open a live connection by name.
    pub fn connect(&self, name: &str) -> SqlResult<Box<dyn Connection>> {
        let config = self.connection(name)?;
        ConnectionFactory::make(&config.driver, &config.resolved_database()?)
    }
}

/// Expand `${VAR}` references against the process environment.
///
/// A reference to an unset variable fails with [`SqlError::MissingEnvVar`]
/// naming it, rather than silently expanding to empty.
pub fn expand_env_vars(s: &str) -> SqlResult<String> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next();
            let mut var_name = String::new();
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
            let value =
                env::var(&var_name).map_err(|_| SqlError::MissingEnvVar(var_name.clone()))?;
            result.push_str(&value);
        } else {
            result.push(c);
        }
    }

    Ok(result)
}
