//! Typed errors returned by the dashboard data facade
//!
//! Every read has its own failure kind with a fixed message. The store's
//! structured error is logged where it happens and never carried upward, so
//! callers can treat any `*FetchFailed` as one coarse "data fetch failed"
//! outcome.
//!
//! # Example
//!
//! ```rust,ignore
//! match data.fetch_invoice_by_id(&id).await {
//!     Ok(form) => render(form),
//!     Err(DataError::InvoiceNotFound { id }) => not_found(&id),
//!     Err(e) => error_page(e.to_string()),
//! }
//! ```

/// Errors raised by [`DashboardData`](crate::DashboardData) operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    #[error("Failed to fetch revenue data.")]
    RevenueFetchFailed,

    #[error("Failed to fetch the latest invoices.")]
    LatestInvoicesFetchFailed,

    #[error("Failed to fetch card data.")]
    CardDataFetchFailed,

    #[error("Failed to fetch invoices.")]
    FilteredInvoicesFetchFailed,

    #[error("Failed to fetch total number of invoices.")]
    InvoicePagesFetchFailed,

    #[error("Failed to fetch invoice.")]
    InvoiceFetchFailed,

    /// No invoice has the requested id
    #[error("Invoice with id '{id}' not found")]
    InvoiceNotFound { id: String },

    #[error("Failed to fetch all customers.")]
    CustomersFetchFailed,

    #[error("Failed to fetch customer table.")]
    CustomerTableFetchFailed,
}

impl DataError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DataError::RevenueFetchFailed => "REVENUE_FETCH_FAILED",
            DataError::LatestInvoicesFetchFailed => "LATEST_INVOICES_FETCH_FAILED",
            DataError::CardDataFetchFailed => "CARD_DATA_FETCH_FAILED",
            DataError::FilteredInvoicesFetchFailed => "FILTERED_INVOICES_FETCH_FAILED",
            DataError::InvoicePagesFetchFailed => "INVOICE_PAGES_FETCH_FAILED",
            DataError::InvoiceFetchFailed => "INVOICE_FETCH_FAILED",
            DataError::InvoiceNotFound { .. } => "INVOICE_NOT_FOUND",
            DataError::CustomersFetchFailed => "CUSTOMERS_FETCH_FAILED",
            DataError::CustomerTableFetchFailed => "CUSTOMER_TABLE_FETCH_FAILED",
        }
    }

    /// Whether this is the not-found outcome rather than a fetch failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::InvoiceNotFound { .. })
    }
}

/// Why a single store round-trip failed; logged, then replaced by a [`DataError`]
#[derive(Debug, thiserror::Error)]
pub(crate) enum FetchFailure {
    #[error(transparent)]
    Store(#[from] crate::core::store::StoreError),

    #[error("malformed row: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0} total overflows a 64-bit amount")]
    TotalOverflow(&'static str),
}
