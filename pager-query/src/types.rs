//! Sort directives.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort order for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Ascending order (A-Z, 0-9, oldest first).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0, newest first).
    Desc,
}

impl SortOrder {
    /// Get the SQL keyword for this sort order.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_sql())
    }
}

/// Order by specification for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderByField {
    /// The column name to order by.
    pub column: String,
    /// The sort order.
    pub order: SortOrder,
}

impl OrderByField {
    /// Create a new order by field.
    pub fn new(column: impl Into<String>, order: SortOrder) -> Self {
        Self {
            column: column.into(),
            order,
        }
    }

    /// Create an ascending order.
    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, SortOrder::Asc)
    }

    /// Create a descending order.
    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, SortOrder::Desc)
    }

    /// Parse a single sort token: `-field` is descending, `field` ascending.
    ///
    /// Only one leading `-` is stripped, so `"--a"` orders `"-a"` descending
    /// and a lone `"-"` yields an empty descending column.
    pub fn parse_token(token: &str) -> Self {
        match token.strip_prefix('-') {
            Some(column) => Self::desc(column),
            None => Self::asc(token),
        }
    }

    /// Generate the SQL for this order by field.
    pub fn to_sql(&self) -> String {
        let mut sql = String::with_capacity(self.column.len() + 5);
        self.write_sql(&mut sql);
        sql
    }

    /// Write the SQL directly to a buffer.
    ///
    /// ```rust
    /// use pager_query::types::OrderByField;
    ///
    /// let field = OrderByField::desc("created_at");
    /// let mut buffer = String::from("ORDER BY ");
    /// field.write_sql(&mut buffer);
    /// assert_eq!(buffer, "ORDER BY created_at DESC");
    /// ```
    #[inline]
    pub fn write_sql(&self, buffer: &mut String) {
        buffer.push_str(&self.column);
        buffer.push(' ');
        buffer.push_str(self.order.as_sql());
    }
}

/// An ordered list of sort fields; earlier fields take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderBy {
    fields: Vec<OrderByField>,
}

impl OrderBy {
    /// Create an empty order by (no ordering).
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse a comma-separated sort string such as `"-created_at,id"`.
    ///
    /// Tokens are taken left to right and empty tokens are skipped. Tokens are
    /// not trimmed.
    ///
    /// ```rust
    /// use pager_query::types::{OrderBy, OrderByField};
    ///
    /// let order = OrderBy::parse("-created_at,,id");
    /// assert_eq!(
    ///     order.fields(),
    ///     &[OrderByField::desc("created_at"), OrderByField::asc("id")]
    /// );
    /// ```
    pub fn parse(spec: &str) -> Self {
        let mut order = Self::none();
        order.extend_from_str(spec);
        order
    }

    /// Append the fields parsed from `spec` after the existing ones.
    pub fn extend_from_str(&mut self, spec: &str) {
        self.fields.extend(
            spec.split(',')
                .filter(|token| !token.is_empty())
                .map(OrderByField::parse_token),
        );
    }

    /// Create an OrderBy from multiple fields.
    pub fn from_fields(fields: impl IntoIterator<Item = OrderByField>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// Add a field to the order by.
    pub fn then(mut self, field: OrderByField) -> Self {
        self.fields.push(field);
        self
    }

    /// Check if the order by is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the number of fields.
    #[inline]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Borrow the fields in precedence order.
    pub fn fields(&self) -> &[OrderByField] {
        &self.fields
    }

    /// Iterate over the fields in precedence order.
    pub fn iter(&self) -> std::slice::Iter<'_, OrderByField> {
        self.fields.iter()
    }

    /// Generate the SQL ORDER BY clause (without the "ORDER BY" keyword).
    pub fn to_sql(&self) -> String {
        let cap: usize = self.fields.iter().map(|f| f.column.len() + 7).sum();
        let mut sql = String::with_capacity(cap);
        self.write_sql(&mut sql);
        sql
    }

    /// Write the SQL ORDER BY clause directly to a buffer.
    #[inline]
    pub fn write_sql(&self, buffer: &mut String) {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                buffer.push_str(", ");
            }
            field.write_sql(buffer);
        }
    }
}

impl<'a> IntoIterator for &'a OrderBy {
    type Item = &'a OrderByField;
    type IntoIter = std::slice::Iter<'a, OrderByField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
