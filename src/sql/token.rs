//! SQL tokens - the atomic units of SQL output.
//!
//! Tokens are dialect-agnostic; serialization turns them into
//! dialect-specific strings. Bound values appear as [`Token::Bind`] markers
//! so the same stream serializes either to inlined literals or to `?`
//! placeholders with an ordered bindings sequence.

use super::dialect::{Dialect, SqlDialect};
use super::value::Value;

/// Every element that can appear in a compiled statement.
///
/// Adding a new variant forces every serialization site to handle it
/// (exhaustive matching).
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    Select,
    Distinct,
    Top,
    From,
    Where,
    And,
    Or,
    Not,
    On,
    Join,
    Inner,
    Left,
    Right,
    Outer,
    GroupBy,
    Having,
    OrderBy,
    Asc,
    Desc,
    Limit,
    Offset,
    In,
    Between,
    Exists,
    IsNull,
    IsNotNull,
    Insert,
    Into,
    Values,
    Update,
    Set,
    Delete,
    Null,

    // === Punctuation ===
    Comma,
    Star,
    LParen,
    RParen,
    Plus,
    Minus,

    // === Whitespace ===
    Space,

    // === Dynamic content ===
    /// Identifier, quoted per dialect. Dotted references (`table.column`)
    /// quote each segment independently; a bare `*` passes through.
    Ident(String),
    /// Table name with optional schema/database prefix.
    QualifiedIdent {
        schema: Option<String>,
        name: String,
    },
    /// Comparison operator supplied by the caller (`=`, `<`, `LIKE`, ...).
    Operator(String),
    /// Structural integer (LIMIT/OFFSET/TOP counts). Never quoted, never bound.
    Count(i64),
    /// Function name (aggregates).
    FunctionName(&'static str),

    /// A bound value. Literal mode inlines it single-quoted; qmark mode
    /// emits `?` and appends the value to the bindings sequence.
    Bind(Value),

    /// Raw SQL passed through without quoting. Never feed user input here.
    Raw(String),
    /// Raw SQL with its own `?` placeholders and the values for them.
    /// Literal mode splices the quoted values back into the text; qmark
    /// mode keeps the text and appends the bindings in place.
    RawBound { sql: String, bindings: Vec<Value> },
}

/// How bound values are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BindMode {
    Literal,
    Qmark,
}

impl Token {
    fn serialize(&self, dialect: Dialect, mode: BindMode, bindings: &mut Vec<Value>) -> String {
        match self {
            Token::Select => "SELECT".into(),
            Token::Distinct => "DISTINCT".into(),
            Token::Top => "TOP".into(),
            Token::From => "FROM".into(),
            Token::Where => "WHERE".into(),
            Token::And => "AND".into(),
            Token::Or => "OR".into(),
            Token::Not => "NOT".into(),
            Token::On => "ON".into(),
            Token::Join => "JOIN".into(),
            Token::Inner => "INNER".into(),
            Token::Left => "LEFT".into(),
            Token::Right => "RIGHT".into(),
            Token::Outer => "OUTER".into(),
            Token::GroupBy => "GROUP BY".into(),
            Token::Having => "HAVING".into(),
            Token::OrderBy => "ORDER BY".into(),
            Token::Asc => "ASC".into(),
            Token::Desc => "DESC".into(),
            Token::Limit => "LIMIT".into(),
            Token::Offset => "OFFSET".into(),
            Token::In => "IN".into(),
            Token::Between => "BETWEEN".into(),
            Token::Exists => "EXISTS".into(),
            Token::IsNull => "IS NULL".into(),
            Token::IsNotNull => "IS NOT NULL".into(),
            Token::Insert => "INSERT".into(),
            Token::Into => "INTO".into(),
            Token::Values => "VALUES".into(),
            Token::Update => "UPDATE".into(),
            Token::Set => "SET".into(),
            Token::Delete => "DELETE".into(),
            Token::Null => "NULL".into(),

            Token::Comma => ",".into(),
            Token::Star => "*".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),

            Token::Space => " ".into(),

            Token::Ident(name) => quote_reference(dialect, name),
            Token::QualifiedIdent { schema, name } => match schema {
                Some(s) => format!(
                    "{}.{}",
                    dialect.quote_identifier(s),
                    dialect.quote_identifier(name)
                ),
                None => dialect.quote_identifier(name),
            },
            Token::Operator(op) => op.clone(),
            Token::Count(n) => n.to_string(),
            Token::FunctionName(name) => (*name).into(),

            Token::Bind(value) => match mode {
                BindMode::Literal => quote_value(dialect, value),
                BindMode::Qmark => {
                    bindings.push(value.clone());
                    "?".into()
                }
            },

            Token::Raw(sql) => sql.clone(),
            Token::RawBound {
                sql,
                bindings: raw_bindings,
            } => match mode {
                BindMode::Literal => splice_literals(dialect, sql, raw_bindings),
                BindMode::Qmark => {
                    bindings.extend(raw_bindings.iter().cloned());
                    sql.clone()
                }
            },
        }
    }
}

/// Quote a column/table reference, handling dotted qualification and `*`.
fn quote_reference(dialect: Dialect, name: &str) -> String {
    if name == "*" {
        return "*".into();
    }
    name.split('.')
        .map(|segment| {
            if segment == "*" {
                "*".into()
            } else {
                dialect.quote_identifier(segment)
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Inline a bound value as a literal.
///
/// Every non-NULL value renders single-quoted, including numerics
/// (`WHERE age = '20'`). The quoted-numeric form is pinned for output
/// compatibility; see DESIGN.md.
fn quote_value(dialect: Dialect, value: &Value) -> String {
    match value {
        Value::Null => "NULL".into(),
        Value::Str(s) => dialect.quote_string(s),
        Value::Bool(b) => format!("'{}'", dialect.format_bool(*b)),
        other => format!("'{}'", other.bare_text()),
    }
}

/// Replace each `?` in a raw fragment with the matching quoted literal.
fn splice_literals(dialect: Dialect, sql: &str, bindings: &[Value]) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut values = bindings.iter();
    for (i, piece) in sql.split('?').enumerate() {
        if i > 0 {
            match values.next() {
                Some(v) => out.push_str(&quote_value(dialect, v)),
                None => out.push('?'),
            }
        }
        out.push_str(piece);
    }
    out
}

/// A stream of tokens that serializes to SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Extend with multiple tokens.
    pub fn extend(&mut self, tokens: impl IntoIterator<Item = Token>) -> &mut Self {
        self.tokens.extend(tokens);
        self
    }

    /// Append another token stream.
    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    /// Serialize with values inlined as quoted literals.
    pub fn serialize(&self, dialect: Dialect) -> String {
        let mut unused = Vec::new();
        self.tokens
            .iter()
            .map(|t| t.serialize(dialect, BindMode::Literal, &mut unused))
            .collect()
    }

    /// Serialize with `?` placeholders, returning the SQL text and the
    /// bindings in placeholder occurrence order (left-to-right).
    pub fn serialize_qmark(&self, dialect: Dialect) -> (String, Vec<Value>) {
        let mut bindings = Vec::new();
        let sql = self
            .tokens
            .iter()
            .map(|t| t.serialize(dialect, BindMode::Qmark, &mut bindings))
            .collect();
        (sql, bindings)
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
    pub fn ident(&mut self, name: &str) -> &mut Self {
        self.push(Token::Ident(name.into()))
    }
    pub fn bind(&mut self, value: Value) -> &mut Self {
        self.push(Token::Bind(value))
    }
}
