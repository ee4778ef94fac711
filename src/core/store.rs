//! The remote store capability the facade reads through

use crate::core::query::SelectQuery;
use async_trait::async_trait;
use serde_json::Value;

/// Remote table names
pub mod tables {
    pub const REVENUE: &str = "revenue";
    pub const INVOICES: &str = "invoices";
    pub const CUSTOMERS: &str = "customers";
}

/// Remote procedure names
pub mod procedures {
    /// `fetch_filtered_customers(search text)`: customers whose name or email
    /// contains `search`, with invoice count and pending/paid sums.
    pub const FETCH_FILTERED_CUSTOMERS: &str = "fetch_filtered_customers";
}

/// Structured error reported by the remote store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (code {code})")]
pub struct StoreError {
    /// Store-specific error code (SQLSTATE or API error code)
    pub code: String,
    pub message: String,
    pub details: Option<String>,
    pub hint: Option<String>,
}

impl StoreError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            hint: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Read access to a hosted relational store
///
/// Rows travel as JSON objects keyed by column name; an embedded relation
/// appears under the related table's name.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Return the rows matching `query`, ordered and sliced as it asks
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>, StoreError>;

    /// Exact number of rows matching the filters of `query`, without fetching them
    ///
    /// Projection, order and range are ignored.
    async fn count(&self, query: &SelectQuery) -> Result<Option<u64>, StoreError>;

    /// Call a stored procedure with named arguments
    async fn rpc(&self, function: &str, args: Value) -> Result<Vec<Value>, StoreError>;
}
