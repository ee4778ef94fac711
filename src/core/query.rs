//! Query descriptions and pagination utilities
//!
//! A [`SelectQuery`] describes one read against a remote table: which
//! columns to return, which related table to embed, how to filter, order and
//! slice the rows. Stores translate it into their own query language.

use serde::{Deserialize, Serialize};

/// Rows per page of the invoices table
pub const ITEMS_PER_PAGE: u64 = 6;

/// Inclusive row range, `from..=to`, over an ordered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRange {
    pub from: u64,
    pub to: u64,
}

impl RowRange {
    /// Range covering a 1-based page; pages below 1 are treated as page 1.
    ///
    /// Pages too far out to address saturate at `u64::MAX` and select nothing
    /// from any real table.
    pub fn for_page(page: u64, page_size: u64) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let from = (page - 1).saturating_mul(page_size);

        Self {
            from,
            to: from.saturating_add(page_size - 1),
        }
    }

    /// Number of rows to skip
    pub fn offset(&self) -> u64 {
        self.from
    }

    /// Maximum number of rows to return
    pub fn limit(&self) -> u64 {
        self.to.saturating_sub(self.from).saturating_add(1)
    }
}

/// Number of pages needed to show `total` rows
pub fn page_count(total: u64, page_size: u64) -> u64 {
    // Ensure page size is at least 1 to avoid division by zero
    total.div_ceil(page_size.max(1))
}

/// Case-insensitive substring pattern for an ILIKE filter
///
/// `%` and `_` inside `text` keep their wildcard meaning.
pub fn contains_pattern(text: &str) -> String {
    format!("%{}%", text)
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

/// Sort order on one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// A row filter
///
/// Columns of an embedded table are addressed as `table.column`
/// (e.g. `customers.name`). A filter on an embedded column keeps only the
/// parent rows whose related row matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Filter {
    /// Exact match on the textual value of the column
    Eq { column: String, value: String },
    /// Case-insensitive LIKE pattern (`%` any run, `_` any single char)
    ILike { column: String, pattern: String },
}

impl Filter {
    pub fn column(&self) -> &str {
        match self {
            Filter::Eq { column, .. } | Filter::ILike { column, .. } => column,
        }
    }
}

/// A related table embedded into each parent row under its own name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub table: String,
    /// Columns to return from the related table; empty means all
    pub columns: Vec<String>,
}

/// A read against one remote table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectQuery {
    pub table: String,
    /// Columns to return; empty means all
    pub columns: Vec<String>,
    pub embed: Option<Embed>,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub range: Option<RowRange>,
    pub limit: Option<u64>,
}

impl SelectQuery {
    /// Start a query on `table` returning every column
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            embed: None,
            filters: Vec::new(),
            order: None,
            range: None,
            limit: None,
        }
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn embed<I, S>(mut self, table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.embed = Some(Embed {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Eq {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn ilike(mut self, column: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.filters.push(Filter::ILike {
            column: column.into(),
            pattern: pattern.into(),
        });
        self
    }

    pub fn order(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn range(mut self, range: RowRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Maximum rows after combining `range` and `limit`
    pub fn max_rows(&self) -> Option<u64> {
        match (self.range.map(|r| r.limit()), self.limit) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Rows to skip before returning any
    pub fn offset(&self) -> u64 {
        self.range.map(|r| r.offset()).unwrap_or(0)
    }
}
