use std::{error::Error as StdError, fmt};

/// One live connection to the target server.
///
/// `execute` submits a single SQL unit and must drain every result set
/// the submission produces before returning; a stored-procedure call can
/// yield several, and leaving any unread desyncs the connection.
pub trait DatabaseAdapter {
    fn execute(&mut self, sql: &str) -> Result<(), AdapterError>;
    fn commit(&mut self) -> Result<(), AdapterError>;
    /// Runs a query expected to return a single scalar count. Used by
    /// the verifier only.
    fn query_count(&mut self, sql: &str) -> Result<u64, AdapterError>;
}

/// Opens connections against a fixed server endpoint. `database: None`
/// yields a server-level connection with no schema selected, so the
/// caller can drop or create the database itself.
pub trait Connector {
    fn connect(&self, database: Option<&str>) -> Result<Box<dyn DatabaseAdapter>, AdapterError>;
}

/// Failure of one connection operation, carrying the offending SQL
/// (truncated) for diagnostics. The error classifier reads its `Display`.
#[derive(Debug)]
pub struct AdapterError {
    sql: String,
    source: Box<dyn StdError + Send + Sync>,
}

/// Statements echoed in diagnostics are cut at this length.
pub const SQL_PREVIEW_LEN: usize = 100;

impl AdapterError {
    pub fn new<E>(sql: &str, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            sql: truncate_sql(sql),
            source: Box::new(source),
        }
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl StdError for AdapterError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Cuts `sql` to [`SQL_PREVIEW_LEN`] on a character boundary, appending
/// an ellipsis when anything was dropped.
#[must_use]
pub fn truncate_sql(sql: &str) -> String {
    let trimmed = sql.trim();
    if trimmed.chars().count() <= SQL_PREVIEW_LEN {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(SQL_PREVIEW_LEN).collect();
    format!("{cut}...")
}
