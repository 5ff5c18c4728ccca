//! Crate-wide error types.

use thiserror::Error;

/// Result type for SQL generation and execution.
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors raised by the grammar compiler, schema compiler, and runtime layers.
#[derive(Error, Debug)]
pub enum SqlError {
    /// Requested dialect/driver key has no registered implementation.
    #[error("database driver not found: {0}")]
    DriverNotFound(String),

    /// A logical column type has no mapping in the target dialect's type table.
    #[error("no {dialect} column type mapping for {ty}")]
    TypeMapping { ty: String, dialect: &'static str },

    /// Requested aggregate function has no rendering.
    #[error("unsupported aggregate function: {0}")]
    UnsupportedAggregate(String),

    /// Requested schema operation has no rendering for the target dialect.
    #[error("unsupported schema operation for {dialect}: {operation}")]
    UnsupportedOperation {
        operation: String,
        dialect: &'static str,
    },

    /// ON DELETE / ON UPDATE action string is not a known referential action.
    #[error("invalid referential action: {0}")]
    InvalidReferentialAction(String),

    /// INSERT compiled with no value rows.
    #[error("insert requires at least one row of values")]
    EmptyInsert,

    /// A relationship name has no registered descriptor.
    #[error("unknown relation: {0}")]
    UnknownRelation(String),

    /// A recorded migration is not registered with the migrator.
    #[error("migration not found: {0}")]
    MigrationNotFound(String),

    /// A migration failed mid-run; carries the name that was executing.
    #[error("migration {name} failed: {source}")]
    MigrationFailed {
        name: String,
        #[source]
        source: Box<SqlError>,
    },

    /// Named connection missing from the configuration file.
    #[error("connection not found in config: {0}")]
    ConnectionNotFound(String),

    /// Environment variable referenced by the config is not set.
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    /// Pass-through from the SQLite driver. Never interpreted by the core.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Config(#[from] toml::de::Error),
}
