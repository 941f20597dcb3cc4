//! Dynamic SQL clause composition.
//!
//! Filters and partial updates are built as an ordered list of
//! (clause, bound value) pairs. Each clause carries exactly one placeholder,
//! so placeholders and values cannot drift apart however many optional
//! criteria are present. Placeholders are only materialised at render time,
//! against a [`PlaceholderStyle`].

use duellog_core::types::{Date, Timestamp};
use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::SqliteArguments;
use sqlx::Sqlite;

/// Placeholder convention of the target store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// Unnamed sequential placeholders: `?`.
    Sequential,
    /// SQLite numbered placeholders: `?1`, `?2`, ...
    Numbered,
    /// PostgreSQL numbered placeholders: `$1`, `$2`, ...
    Dollar,
}

impl PlaceholderStyle {
    /// Render the placeholder for the 1-based parameter `position`.
    pub fn render(self, position: usize) -> String {
        match self {
            PlaceholderStyle::Sequential => "?".to_string(),
            PlaceholderStyle::Numbered => format!("?{position}"),
            PlaceholderStyle::Dollar => format!("${position}"),
        }
    }
}

/// A value bound to a rendered placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Date(Date),
    Timestamp(Timestamp),
}

impl From<&str> for BindValue {
    fn from(value: &str) -> Self {
        BindValue::Text(value.to_string())
    }
}

impl From<String> for BindValue {
    fn from(value: String) -> Self {
        BindValue::Text(value)
    }
}

impl From<Date> for BindValue {
    fn from(value: Date) -> Self {
        BindValue::Date(value)
    }
}

impl From<Timestamp> for BindValue {
    fn from(value: Timestamp) -> Self {
        BindValue::Timestamp(value)
    }
}

/// Comparison operator of a filter predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Gte,
    Lte,
}

impl Comparison {
    fn as_sql(self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Gte => ">=",
            Comparison::Lte => "<=",
        }
    }
}

// ---------------------------------------------------------------------------
// FilterBuilder
// ---------------------------------------------------------------------------

/// Ordered `WHERE` predicates joined with `AND`.
#[derive(Debug, Default, Clone)]
pub struct FilterBuilder {
    predicates: Vec<(&'static str, Comparison)>,
    values: Vec<BindValue>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `expr <cmp> <placeholder>` bound to `value`.
    pub fn push(
        &mut self,
        expr: &'static str,
        cmp: Comparison,
        value: impl Into<BindValue>,
    ) -> &mut Self {
        self.predicates.push((expr, cmp));
        self.values.push(value.into());
        self
    }

    /// Append an equality predicate for a text criterion. Absent and empty
    /// criteria leave the query unconstrained.
    pub fn eq_text(&mut self, expr: &'static str, value: Option<&str>) -> &mut Self {
        match value {
            Some(v) if !v.is_empty() => self.push(expr, Comparison::Eq, v),
            _ => self,
        }
    }

    /// Append a range predicate for an optional date criterion.
    pub fn cmp_date(&mut self, expr: &'static str, cmp: Comparison, value: Option<Date>) -> &mut Self {
        match value {
            Some(v) => self.push(expr, cmp, v),
            None => self,
        }
    }

    /// Number of appended predicates (and bound values).
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Bound values in placeholder order.
    pub fn values(&self) -> &[BindValue] {
        &self.values
    }

    /// Render ` WHERE a = ? AND b >= ?`, or an empty string without predicates.
    ///
    /// `first_position` is the 1-based number of the first placeholder, for
    /// statements that bind other parameters ahead of the filter.
    pub fn render_where(&self, style: PlaceholderStyle, first_position: usize) -> String {
        if self.predicates.is_empty() {
            return String::new();
        }
        let conditions: Vec<String> = self
            .predicates
            .iter()
            .enumerate()
            .map(|(i, (expr, cmp))| {
                format!("{expr} {} {}", cmp.as_sql(), style.render(first_position + i))
            })
            .collect();
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

// ---------------------------------------------------------------------------
// SetBuilder
// ---------------------------------------------------------------------------

/// Ordered `SET` assignments for a partial update.
#[derive(Debug, Default, Clone)]
pub struct SetBuilder {
    columns: Vec<&'static str>,
    values: Vec<BindValue>,
}

impl SetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `column = <placeholder>` bound to `value`.
    pub fn set(&mut self, column: &'static str, value: impl Into<BindValue>) -> &mut Self {
        self.columns.push(column);
        self.values.push(value.into());
        self
    }

    /// Append the assignment only when `value` is present.
    pub fn set_opt<V: Into<BindValue>>(&mut self, column: &'static str, value: Option<V>) -> &mut Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    /// Whether `column` has already been assigned.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains(&column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn values(&self) -> &[BindValue] {
        &self.values
    }

    /// Render `a = ?, b = ?` starting at placeholder `first_position`.
    pub fn render(&self, style: PlaceholderStyle, first_position: usize) -> String {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = {}", style.render(first_position + i)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ---------------------------------------------------------------------------
// Binding
// ---------------------------------------------------------------------------

/// Bind a slice of [`BindValue`] to a sqlx `QueryAs`, in order.
pub fn bind_query_as<'q, O>(
    mut q: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    values: &[BindValue],
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    for val in values {
        match val {
            BindValue::Text(v) => q = q.bind(v.clone()),
            BindValue::Date(v) => q = q.bind(*v),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of [`BindValue`] to a sqlx `Query`, in order.
pub fn bind_query<'q>(
    mut q: Query<'q, Sqlite, SqliteArguments<'q>>,
    values: &[BindValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for val in values {
        match val {
            BindValue::Text(v) => q = q.bind(v.clone()),
            BindValue::Date(v) => q = q.bind(*v),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}
