//! Stored records and the row shapes the facade decodes from the remote store

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Payment state of an invoice
///
/// Only `paid` and `pending` take part in the dashboard totals. Any other
/// stored value is kept verbatim in [`InvoiceStatus::Other`] so that reads
/// never fail on a status this layer does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Other(String),
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Other(s) => s,
        }
    }
}

impl From<String> for InvoiceStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "paid" => InvoiceStatus::Paid,
            "pending" => InvoiceStatus::Pending,
            _ => InvoiceStatus::Other(value),
        }
    }
}

impl From<&str> for InvoiceStatus {
    fn from(value: &str) -> Self {
        InvoiceStatus::from(value.to_string())
    }
}

impl From<InvoiceStatus> for String {
    fn from(status: InvoiceStatus) -> Self {
        match status {
            InvoiceStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of the `invoices` table
///
/// `amount` is stored in minor currency units (cents).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl Invoice {
    /// New invoice with a random id
    pub fn new(
        customer_id: impl Into<String>,
        amount: i64,
        status: impl Into<InvoiceStatus>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            customer_id: customer_id.into(),
            amount,
            status: status.into(),
            date,
        }
    }
}

/// A row of the `customers` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

impl Customer {
    /// New customer with a random id
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            image_url: image_url.into(),
        }
    }
}

/// A row of the `revenue` reporting table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revenue {
    pub month: String,
    pub revenue: f64,
}

// ---------------------------------------------------------------------------
// Row shapes
// ---------------------------------------------------------------------------

/// Customer columns embedded in an invoice row
///
/// Every field is optional: the join may produce a partial or missing
/// customer and the views fall back to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EmbeddedCustomer {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// The embedded relation as it comes off the wire: an object, or an array
/// when the store reports a to-many relationship.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Embedded {
    One(EmbeddedCustomer),
    Many(Vec<EmbeddedCustomer>),
}

impl Embedded {
    pub fn into_first(self) -> Option<EmbeddedCustomer> {
        match self {
            Embedded::One(customer) => Some(customer),
            Embedded::Many(customers) => customers.into_iter().next(),
        }
    }
}

/// An invoice row carrying its joined customer
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InvoiceWithCustomer {
    pub id: String,
    pub amount: i64,
    pub date: NaiveDate,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub customers: Option<Embedded>,
}

impl InvoiceWithCustomer {
    /// The joined customer, or an all-empty one when the join found nothing
    pub fn customer(&self) -> EmbeddedCustomer {
        self.customers
            .clone()
            .and_then(Embedded::into_first)
            .unwrap_or_default()
    }
}

/// `(amount, status)` projection used by the card totals
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusAmount {
    pub amount: i64,
    pub status: InvoiceStatus,
}

/// Paid and pending sums over a set of invoices, in cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTotals {
    pub paid: i64,
    pub pending: i64,
}

impl StatusTotals {
    /// Sum amounts per status; statuses other than paid/pending are skipped.
    ///
    /// Returns `None` when either sum overflows `i64`.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a StatusAmount>) -> Option<Self> {
        rows.into_iter()
            .try_fold(Self::default(), |mut totals, row| {
                match row.status {
                    InvoiceStatus::Paid => totals.paid = totals.paid.checked_add(row.amount)?,
                    InvoiceStatus::Pending => {
                        totals.pending = totals.pending.checked_add(row.amount)?
                    }
                    InvoiceStatus::Other(_) => {}
                }
                Some(totals)
            })
    }
}

/// `(id, customer_id, amount, status)` projection for the edit form
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InvoiceFormRow {
    pub id: String,
    pub customer_id: String,
    pub amount: i64,
    pub status: InvoiceStatus,
}

/// A row returned by the `fetch_filtered_customers` procedure
///
/// The totals are aggregated by the store; this layer only formats them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredCustomerRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    #[serde(default)]
    pub total_invoices: i64,
    pub total_pending: i64,
    pub total_paid: i64,
}
