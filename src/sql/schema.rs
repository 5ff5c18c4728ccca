//! Blueprints - the DDL counterpart of the query representation.
//!
//! A blueprint accumulates column definitions and constraints through fluent
//! calls, then compiles into one or more statements per dialect. Dialects
//! whose capability flags mark certain constraint kinds as "second query"
//! get those constraints as separate statements after the CREATE/ALTER.

use super::dialect::{Dialect, SqlDialect};
use super::types::ColumnType;
use super::value::Value;
use crate::error::{SqlError, SqlResult};

/// Constraint kinds a blueprint can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    Index,
    Fulltext,
    Primary,
    Foreign,
}

/// ON DELETE / ON UPDATE referential actions.
///
/// Parsed at construction time so a typo fails when the foreign key is
/// declared, not when the blueprint compiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferentialAction {
    Cascade,
    SetNull,
    NoAction,
    SetDefault,
    Restrict,
}

impl ReferentialAction {
    pub fn parse(action: &str) -> Result<Self, SqlError> {
        match action.to_lowercase().replace(' ', "_").as_str() {
            "cascade" => Ok(ReferentialAction::Cascade),
            "set_null" => Ok(ReferentialAction::SetNull),
            "no_action" => Ok(ReferentialAction::NoAction),
            "set_default" => Ok(ReferentialAction::SetDefault),
            "restrict" => Ok(ReferentialAction::Restrict),
            other => Err(SqlError::InvalidReferentialAction(other.to_string())),
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            ReferentialAction::Cascade => "CASCADE",
            ReferentialAction::SetNull => "SET NULL",
            ReferentialAction::NoAction => "NO ACTION",
            ReferentialAction::SetDefault => "SET DEFAULT",
            ReferentialAction::Restrict => "RESTRICT",
        }
    }
}

/// A column default.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Value(Value),
    /// Named "now" default, mapped per dialect (CURRENT_TIMESTAMP, GETDATE()).
    CurrentTimestamp,
}

/// What an ALTER statement does with a column. CREATE blueprints only ever
/// hold `Add` columns.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnAction {
    Add,
    Modify,
    Drop,
    Rename { from: String },
}

/// One column definition.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: String,
    pub ty: ColumnType,
    pub nullable: bool,
    pub default: Option<DefaultValue>,
    pub after: Option<String>,
    pub action: ColumnAction,
}

impl ColumnDef {
    fn new(name: &str, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: false,
            default: None,
            after: None,
            action: ColumnAction::Add,
        }
    }
}

/// One non-foreign constraint over a set of columns.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub columns: Vec<String>,
    pub name: String,
}

/// One foreign key declaration.
#[derive(Debug, Clone)]
pub struct ForeignKey {
    pub column: String,
    pub references_table: String,
    pub references_column: String,
    pub on_delete: Option<ReferentialAction>,
    pub on_update: Option<ReferentialAction>,
}

impl ForeignKey {
    pub fn references(&mut self, table: &str, column: &str) -> &mut Self {
        self.references_table = table.into();
        self.references_column = column.into();
        self
    }

    pub fn on_delete(&mut self, action: &str) -> SqlResult<&mut Self> {
        self.on_delete = Some(ReferentialAction::parse(action)?);
        Ok(self)
    }

    pub fn on_update(&mut self, action: &str) -> SqlResult<&mut Self> {
        self.on_update = Some(ReferentialAction::parse(action)?);
        Ok(self)
    }
}

/// Whether the blueprint creates a table or alters an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlueprintAction {
    Create,
    Alter,
}

/// A schema mutation under construction.
#[derive(Debug, Clone)]
pub struct Blueprint {
    table: String,
    action: BlueprintAction,
    columns: Vec<ColumnDef>,
    constraints: Vec<Constraint>,
    foreign_keys: Vec<ForeignKey>,
}

impl Blueprint {
    pub fn create(table: &str) -> Self {
        Self::new(table, BlueprintAction::Create)
    }

    pub fn alter(table: &str) -> Self {
        Self::new(table, BlueprintAction::Alter)
    }

    fn new(table: &str, action: BlueprintAction) -> Self {
        Self {
            table: table.into(),
            action,
            columns: Vec::new(),
            constraints: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn action(&self) -> BlueprintAction {
        self.action
    }

    // =========================================================================
    // Columns
    // =========================================================================

    fn push_column(&mut self, name: &str, ty: ColumnType) -> &mut Self {
        self.columns.push(ColumnDef::new(name, ty));
        self
    }

    /// Auto-incrementing primary key column.
    pub fn increments(&mut self, name: &str) -> &mut Self {
        self.push_column(name, ColumnType::Increments)
    }

    pub fn string(&mut self, name: &str, length: u16) -> &mut Self {
        self.push_column(name, ColumnType::String(length))
    }

    pub fn integer(&mut self, name: &str) -> &mut Self {
        self.push_column(name, ColumnType::Integer)
    }

    pub fn big_integer(&mut self, name: &str) -> &mut Self {
        self.push_column(name, ColumnType::BigInteger)
    }

    pub fn small_integer(&mut self, name: &str) -> &mut Self {
        self.push_column(name, ColumnType::SmallInteger)
    }

    pub fn float(&mut self, name: &str) -> &mut Self {
        self.push_column(name, ColumnType::Float)
    }

    pub fn decimal(&mut self, name: &str, precision: u8, scale: u8) -> &mut Self {
        self.push_column(name, ColumnType::Decimal(precision, scale))
    }

    pub fn boolean(&mut self, name: &str) -> &mut Self {
        self.push_column(name, ColumnType::Boolean)
    }

    pub fn text(&mut self, name: &str) -> &mut Self {
        self.push_column(name, ColumnType::Text)
    }

    pub fn date(&mut self, name: &str) -> &mut Self {
        self.push_column(name, ColumnType::Date)
    }

    pub fn time(&mut self, name: &str) -> &mut Self {
        self.push_column(name, ColumnType::Time)
    }

    pub fn datetime(&mut self, name: &str) -> &mut Self {
        self.push_column(name, ColumnType::DateTime)
    }

    pub fn timestamp(&mut self, name: &str) -> &mut Self {
        self.push_column(name, ColumnType::Timestamp)
    }

    pub fn binary(&mut self, name: &str) -> &mut Self {
        self.push_column(name, ColumnType::Binary)
    }

    pub fn json(&mut self, name: &str) -> &mut Self {
        self.push_column(name, ColumnType::Json)
    }

    pub fn enumeration(&mut self, name: &str, values: &[&str]) -> &mut Self {
        self.push_column(
            name,
            ColumnType::Enum(values.iter().map(|v| v.to_string()).collect()),
        )
    }

    // =========================================================================
    // Modifiers (apply to the most recently added column)
    // =========================================================================

    fn last_column(&mut self) -> &mut ColumnDef {
        self.columns
            .last_mut()
            .expect("column modifier called before any column was added")
    }

    pub fn nullable(&mut self) -> &mut Self {
        self.last_column().nullable = true;
        self
    }

    pub fn default_value(&mut self, value: impl Into<Value>) -> &mut Self {
        self.last_column().default = Some(DefaultValue::Value(value.into()));
        self
    }

    pub fn default_current_timestamp(&mut self) -> &mut Self {
        self.last_column().default = Some(DefaultValue::CurrentTimestamp);
        self
    }

    /// Position the column after another (MySQL honors this; other dialects
    /// ignore the hint).
    pub fn after(&mut self, column: &str) -> &mut Self {
        self.last_column().after = Some(column.into());
        self
    }

    /// Mark the most recent column as a MODIFY rather than an ADD.
    pub fn change(&mut self) -> &mut Self {
        self.last_column().action = ColumnAction::Modify;
        self
    }

    pub fn drop_column(&mut self, name: &str) -> &mut Self {
        let mut def = ColumnDef::new(name, ColumnType::Text);
        def.action = ColumnAction::Drop;
        self.columns.push(def);
        self
    }

    pub fn rename_column(&mut self, from: &str, to: &str) -> &mut Self {
        let mut def = ColumnDef::new(to, ColumnType::Text);
        def.action = ColumnAction::Rename { from: from.into() };
        self.columns.push(def);
        self
    }

    // =========================================================================
    // Constraints
    // =========================================================================

    fn push_constraint(&mut self, kind: ConstraintKind, columns: &[&str], suffix: &str) -> &mut Self {
        let name = format!("{}_{}_{}", self.table, columns.join("_"), suffix);
        self.constraints.push(Constraint {
            kind,
            columns: columns.iter().map(|c| c.to_string()).collect(),
            name,
        });
        self
    }

    pub fn unique(&mut self, columns: &[&str]) -> &mut Self {
        self.push_constraint(ConstraintKind::Unique, columns, "unique")
    }

    pub fn index(&mut self, columns: &[&str]) -> &mut Self {
        self.push_constraint(ConstraintKind::Index, columns, "index")
    }

    pub fn fulltext(&mut self, columns: &[&str]) -> &mut Self {
        self.push_constraint(ConstraintKind::Fulltext, columns, "fulltext")
    }

    pub fn primary(&mut self, columns: &[&str]) -> &mut Self {
        self.push_constraint(ConstraintKind::Primary, columns, "primary")
    }

    /// Declare a foreign key on `column`; chain `references` and the
    /// referential actions on the returned handle.
    pub fn foreign(&mut self, column: &str) -> &mut ForeignKey {
        self.foreign_keys.push(ForeignKey {
            column: column.into(),
            references_table: String::new(),
            references_column: String::new(),
            on_delete: None,
            on_update: None,
        });
        self.foreign_keys
            .last_mut()
            .expect("foreign key just pushed")
    }

    // =========================================================================
    // Compilation
    // =========================================================================

    /// Compile to one or more dialect statements, in execution order.
    pub fn to_sql(&self, dialect: Dialect) -> SqlResult<Vec<String>> {
        match self.action {
            BlueprintAction::Create => self.compile_create(dialect),
            BlueprintAction::Alter => self.compile_alter(dialect),
        }
    }

    fn compile_create(&self, dialect: Dialect) -> SqlResult<Vec<String>> {
        let mut items = Vec::new();
        for col in &self.columns {
            items.push(self.render_column(dialect, col)?);
        }

        let second = dialect.second_query_constraints();
        let mut trailing = Vec::new();
        for constraint in &self.constraints {
            if second.contains(&constraint.kind) {
                trailing.push(self.render_index_statement(dialect, constraint));
            } else {
                items.push(self.render_inline_constraint(dialect, constraint));
            }
        }
        for fk in &self.foreign_keys {
            items.push(self.render_foreign_key(dialect, fk));
        }

        let mut statements = vec![format!(
            "CREATE TABLE {} ({})",
            dialect.quote_identifier(&self.table),
            items.join(", ")
        )];
        statements.extend(trailing);
        Ok(statements)
    }

    fn compile_alter(&self, dialect: Dialect) -> SqlResult<Vec<String>> {
        let table = dialect.quote_identifier(&self.table);
        let mut statements = Vec::new();

        for col in &self.columns {
            let stmt = match &col.action {
                ColumnAction::Add => {
                    format!("ALTER TABLE {} ADD {}", table, self.render_column(dialect, col)?)
                }
                ColumnAction::Modify => {
                    if !dialect.supports_modify_column() {
                        return Err(SqlError::UnsupportedOperation {
                            operation: "modify column".into(),
                            dialect: dialect.name(),
                        });
                    }
                    format!(
                        "ALTER TABLE {} {} {}",
                        table,
                        dialect.modify_column_keyword(),
                        self.render_column(dialect, col)?
                    )
                }
                ColumnAction::Drop => {
                    format!(
                        "ALTER TABLE {} DROP COLUMN {}",
                        table,
                        dialect.quote_identifier(&col.name)
                    )
                }
                ColumnAction::Rename { from } => {
                    if dialect.uses_sp_rename() {
                        format!(
                            "EXEC sp_rename '{}.{}', '{}', 'COLUMN'",
                            self.table, from, col.name
                        )
                    } else {
                        format!(
                            "ALTER TABLE {} RENAME COLUMN {} TO {}",
                            table,
                            dialect.quote_identifier(from),
                            dialect.quote_identifier(&col.name)
                        )
                    }
                }
            };
            statements.push(stmt);
        }

        let second = dialect.second_query_constraints();
        for constraint in &self.constraints {
            if second.contains(&constraint.kind) {
                statements.push(self.render_index_statement(dialect, constraint));
            } else {
                statements.push(format!(
                    "ALTER TABLE {} ADD {}",
                    table,
                    self.render_inline_constraint(dialect, constraint)
                ));
            }
        }
        for fk in &self.foreign_keys {
            statements.push(format!(
                "ALTER TABLE {} ADD {}",
                table,
                self.render_foreign_key(dialect, fk)
            ));
        }

        Ok(statements)
    }

    fn render_column(&self, dialect: Dialect, col: &ColumnDef) -> SqlResult<String> {
        let mut out = format!(
            "{} {}",
            dialect.quote_identifier(&col.name),
            dialect.emit_column_type(&col.name, &col.ty)?
        );

        // Increments types already carry PRIMARY KEY and imply NOT NULL.
        if !col.nullable && col.ty != ColumnType::Increments {
            out.push_str(" NOT NULL");
        }

        if let Some(default) = &col.default {
            out.push_str(" DEFAULT ");
            out.push_str(&self.render_default(dialect, default));
        }

        if let Some(after) = &col.after {
            if dialect == Dialect::MySql {
                out.push_str(" AFTER ");
                out.push_str(&dialect.quote_identifier(after));
            }
        }

        Ok(out)
    }

    fn render_default(&self, dialect: Dialect, default: &DefaultValue) -> String {
        match default {
            DefaultValue::CurrentTimestamp => dialect.current_timestamp().to_string(),
            DefaultValue::Value(Value::Null) => "NULL".to_string(),
            DefaultValue::Value(Value::Str(s)) => dialect.quote_string(s),
            DefaultValue::Value(Value::Bool(b)) => dialect.format_bool(*b).to_string(),
            DefaultValue::Value(value) => value.bare_text(),
        }
    }

    fn quoted_columns(&self, dialect: Dialect, columns: &[String]) -> String {
        columns
            .iter()
            .map(|c| dialect.quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn render_inline_constraint(&self, dialect: Dialect, constraint: &Constraint) -> String {
        let cols = self.quoted_columns(dialect, &constraint.columns);
        match constraint.kind {
            ConstraintKind::Primary => format!("PRIMARY KEY ({cols})"),
            ConstraintKind::Unique => format!(
                "CONSTRAINT {} UNIQUE ({cols})",
                dialect.quote_identifier(&constraint.name)
            ),
            ConstraintKind::Index => format!(
                "INDEX {} ({cols})",
                dialect.quote_identifier(&constraint.name)
            ),
            ConstraintKind::Fulltext => format!(
                "FULLTEXT INDEX {} ({cols})",
                dialect.quote_identifier(&constraint.name)
            ),
            // Foreign keys never route through here.
            ConstraintKind::Foreign => String::new(),
        }
    }

    fn render_index_statement(&self, dialect: Dialect, constraint: &Constraint) -> String {
        format!(
            "CREATE INDEX {} ON {} ({})",
            dialect.quote_identifier(&constraint.name),
            dialect.quote_identifier(&self.table),
            self.quoted_columns(dialect, &constraint.columns)
        )
    }

    fn render_foreign_key(&self, dialect: Dialect, fk: &ForeignKey) -> String {
        let mut out = format!(
            "FOREIGN KEY ({}) REFERENCES {} ({})",
            dialect.quote_identifier(&fk.column),
            dialect.quote_identifier(&fk.references_table),
            dialect.quote_identifier(&fk.references_column)
        );
        if let Some(action) = fk.on_delete {
            out.push_str(" ON DELETE ");
            out.push_str(action.as_sql());
        }
        if let Some(action) = fk.on_update {
            out.push_str(" ON UPDATE ");
            out.push_str(action.as_sql());
        }
        out
    }
}
