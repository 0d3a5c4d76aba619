use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("failed to decode store response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unknown table: {0}")]
    UnknownTable(String),
}

impl StoreError {
    pub fn not_found(table: &str, id: &str) -> Self {
        StoreError::Rejected {
            status: 404,
            message: format!("no row with id {} in {}", id, table),
        }
    }
}

/// Filter comparison. Values are carried as strings, matching the store's
/// query-parameter representation; Gte is only meaningful for ISO-formatted
/// dates and timestamps, which compare correctly as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Neq,
    Gte,
}

impl Comparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Eq => "eq",
            Comparison::Neq => "neq",
            Comparison::Gte => "gte",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Filter {
    pub column: String,
    pub cmp: Comparison,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// A select request: pass-through filters, ordering, limit, and at most one
/// embedded parent-title lookup (a backend-side join, not client logic)
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order: Option<(String, Direction)>,
    pub limit: Option<usize>,
    /// Name of a parent table whose `title` should be embedded per row
    pub embed: Option<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, column: &str, cmp: Comparison, value: impl Into<String>) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            cmp,
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, column: &str, direction: Direction) -> Self {
        self.order = Some((column.to_string(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn embed_parent(mut self, parent_table: &str) -> Self {
        self.embed = Some(parent_table.to_string());
        self
    }
}

/// The contract this application has with the record store: five logical
/// tables reached through filterable selects, inserts, updates and deletes
/// by id, and upserts by natural key. Implemented over the remote store's
/// HTTP protocol in production and in memory for tests.
pub trait RecordBackend {
    fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, StoreError>;

    /// Insert a row and return it as stored (with assigned id and timestamps)
    fn insert(&self, table: &str, row: &Value) -> Result<Value, StoreError>;

    /// Merge `patch` into the row with the given id. Errors with a 404-style
    /// rejection when no such row exists.
    fn update(&self, table: &str, id: &str, patch: &Value) -> Result<(), StoreError>;

    /// Insert-or-overwrite keyed on `key_column`
    fn upsert(&self, table: &str, key_column: &str, row: &Value) -> Result<(), StoreError>;

    /// Delete the row with the given id. Deleting an absent id is a no-op,
    /// matching the store's pass-through semantics.
    fn delete(&self, table: &str, id: &str) -> Result<(), StoreError>;
}
