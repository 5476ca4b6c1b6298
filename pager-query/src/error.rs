//! Error types for translation, pagination and storage hand-off.
//!
//! Translation itself never fails: malformed page or size values fall back to
//! their defaults. Errors only come from three places:
//! - a caller contract violation when paginating (a page size below 1, or a
//!   descriptor that was built without a page request)
//! - the storage collaborator (row count or fetch)
//! - loading configuration
//!
//! # Error Codes
//!
//! Error codes follow a pattern: P{category}{number}
//! - 3xxx: Connection errors reported by the storage collaborator
//! - 5xxx: Execution errors (timeout, params, database)
//! - 7xxx: Configuration errors
//! - 9xxx: Internal errors
//!
//! ```rust
//! use pager_query::{QueryError, ErrorCode};
//!
//! let err = QueryError::invalid_page_size(0);
//! assert_eq!(err.code, ErrorCode::InvalidParameter);
//! assert!(err.to_string().starts_with("[P5003]"));
//!
//! let err = QueryError::database("relation \"users\" does not exist");
//! assert_eq!(err.code, ErrorCode::DatabaseError);
//! ```

use std::fmt;
use thiserror::Error;

/// Result type for pager operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Connection errors (3xxx)
    /// Database connection failed (P3001).
    ConnectionFailed = 3001,

    // Query execution errors (5xxx)
    /// Query timeout (P5001).
    QueryTimeout = 5001,
    /// Invalid parameter (P5003).
    InvalidParameter = 5003,
    /// General database error (P5005).
    DatabaseError = 5005,

    // Configuration errors (7xxx)
    /// Invalid configuration (P7001).
    InvalidConfiguration = 7001,
    /// Missing configuration (P7002).
    MissingConfiguration = 7002,

    // Internal errors (9xxx)
    /// Internal error (P9001).
    Internal = 9001,
}

impl ErrorCode {
    /// Get the error code string (e.g., "P5003").
    pub fn code(&self) -> String {
        format!("P{}", *self as u16)
    }

    /// Get a short description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::ConnectionFailed => "Database connection failed",
            Self::QueryTimeout => "Query timeout",
            Self::InvalidParameter => "Invalid parameter",
            Self::DatabaseError => "Database error",
            Self::InvalidConfiguration => "Invalid configuration",
            Self::MissingConfiguration => "Missing configuration",
            Self::Internal => "Internal error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Additional context for an error.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation that was being performed.
    pub operation: Option<String>,
    /// The parameter or option involved.
    pub field: Option<String>,
    /// The SQL text (if the collaborator supplied it).
    pub sql: Option<String>,
    /// Suggestions for fixing the error.
    pub suggestions: Vec<String>,
    /// Help text.
    pub help: Option<String>,
}

/// Errors that can occur while paginating or talking to storage.
#[derive(Error, Debug)]
pub struct QueryError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Additional context.
    pub context: ErrorContext,
    /// The source error (if any).
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl QueryError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add context about the operation.
    pub fn with_context(mut self, operation: impl Into<String>) -> Self {
        self.context.operation = Some(operation.into());
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context.suggestions.push(suggestion.into());
        self
    }

    /// Add help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.context.help = Some(help.into());
        self
    }

    /// Set the parameter or option involved.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.context.field = Some(field.into());
        self
    }

    /// Set the SQL text.
    pub fn with_sql(mut self, sql: impl Into<String>) -> Self {
        self.context.sql = Some(sql.into());
        self
    }

    /// Set the source error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // ============== Constructor Functions ==============

    /// Create an invalid input error.
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        let field = field.into();
        let message = message.into();
        Self::new(
            ErrorCode::InvalidParameter,
            format!("Invalid input for {}: {}", field, message),
        )
        .with_field(&field)
    }

    /// A page size below 1 reached the page calculator.
    pub fn invalid_page_size(size: i64) -> Self {
        Self::invalid_input("page_size", format!("page size must be at least 1, got {}", size))
            .with_suggestion("Set default_page_size to a positive value")
            .with_help("PagerOptions::normalize substitutes 20 for a zero default page size")
    }

    /// The descriptor was built without a page request.
    pub fn not_paginated() -> Self {
        Self::new(
            ErrorCode::InvalidParameter,
            "Query was built without pagination and cannot be paged",
        )
        .with_suggestion("Build the query with Pager::make_page_filter")
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(ErrorCode::ConnectionFailed, format!("Connection error: {}", message))
            .with_suggestion("Check that the database server is running")
    }

    /// Create a timeout error.
    pub fn timeout(duration_ms: u64) -> Self {
        Self::new(
            ErrorCode::QueryTimeout,
            format!("Query timed out after {}ms", duration_ms),
        )
        .with_help("Consider lowering max_page_size for large tables")
    }

    /// Create a general database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
            .with_suggestion("Check the database logs for more details")
    }

    /// Create an invalid configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(
            ErrorCode::InvalidConfiguration,
            format!("Invalid configuration: {}", message),
        )
    }

    /// Create a missing configuration error.
    pub fn missing_configuration(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorCode::MissingConfiguration,
            format!("Could not read configuration file {}", path),
        )
        .with_field(&path)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(ErrorCode::Internal, format!("Internal error: {}", message))
    }

    // ============== Error Checks ==============

    /// Check if this error came from the storage collaborator.
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::ConnectionFailed | ErrorCode::QueryTimeout | ErrorCode::DatabaseError
        )
    }

    /// Check if this is a configuration error.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::InvalidConfiguration | ErrorCode::MissingConfiguration
        )
    }

    /// Display the full error with all context and suggestions.
    pub fn display_full(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Error [{}]: {}\n", self.code.code(), self.message));

        if let Some(ref op) = self.context.operation {
            output.push_str(&format!("  → While: {}\n", op));
        }
        if let Some(ref field) = self.context.field {
            output.push_str(&format!("  → Field: {}\n", field));
        }

        // SQL (truncated if too long)
        if let Some(ref sql) = self.context.sql {
            let sql_display = match sql.char_indices().nth(200) {
                Some((idx, _)) => format!("{}...", &sql[..idx]),
                None => sql.clone(),
            };
            output.push_str(&format!("  → SQL: {}\n", sql_display));
        }

        if !self.context.suggestions.is_empty() {
            output.push_str("\nSuggestions:\n");
            for (i, suggestion) in self.context.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        if let Some(ref help) = self.context.help {
            output.push_str(&format!("\nHelp: {}\n", help));
        }

        output
    }
}

/// Helper for creating errors with context.
#[macro_export]
macro_rules! query_error {
    ($code:expr, $msg:expr) => {
        $crate::error::QueryError::new($code, $msg)
    };
    ($code:expr, $msg:expr, $($key:ident = $value:expr),+ $(,)?) => {{
        let mut err = $crate::error::QueryError::new($code, $msg);
        $(
            err = err.$key($value);
        )+
        err
    }};
}
