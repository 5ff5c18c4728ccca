//! Logical column types for schema blueprints.
//!
//! Blueprints describe columns with these dialect-independent types; each
//! dialect maps them to its native type tokens (see `dialect::helpers`).
//! A type with no mapping for the target dialect fails compilation with
//! [`SqlError::TypeMapping`](crate::error::SqlError::TypeMapping).

use std::fmt;

/// Logical column type used in CREATE/ALTER TABLE blueprints.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Auto-incrementing integer primary key.
    Increments,

    /// 32-bit signed integer.
    Integer,

    /// 64-bit signed integer.
    BigInteger,

    /// 16-bit signed integer.
    SmallInteger,

    /// Double-precision floating point.
    Float,

    /// Fixed-precision decimal: (precision, scale).
    Decimal(u8, u8),

    Boolean,

    /// Variable-length string with maximum length.
    String(u16),

    /// Unbounded text.
    Text,

    Date,

    Time,

    /// Date and time without timezone.
    DateTime,

    Timestamp,

    /// Binary blob.
    Binary,

    /// JSON document. Not every dialect has a native mapping.
    Json,

    /// Enumerated string column with the allowed values.
    ///
    /// MySQL renders a native `ENUM(...)`; Postgres and SQLite emulate it
    /// with a VARCHAR plus a CHECK constraint.
    Enum(Vec<String>),
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Increments => write!(f, "increments"),
            ColumnType::Integer => write!(f, "integer"),
            ColumnType::BigInteger => write!(f, "big_integer"),
            ColumnType::SmallInteger => write!(f, "small_integer"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::Decimal(p, s) => write!(f, "decimal({p},{s})"),
            ColumnType::Boolean => write!(f, "boolean"),
            ColumnType::String(n) => write!(f, "string({n})"),
            ColumnType::Text => write!(f, "text"),
            ColumnType::Date => write!(f, "date"),
            ColumnType::Time => write!(f, "time"),
            ColumnType::DateTime => write!(f, "datetime"),
            ColumnType::Timestamp => write!(f, "timestamp"),
            ColumnType::Binary => write!(f, "binary"),
            ColumnType::Json => write!(f, "json"),
            ColumnType::Enum(_) => write!(f, "enum"),
        }
    }
}
