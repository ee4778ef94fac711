//! View shapes handed to the presentation layer
//!
//! These are computed per request and never written back. Display lists
//! carry amounts as formatted currency strings; [`InvoiceForm`] carries a
//! decimal amount because it feeds an edit form.

use crate::core::currency::format_currency;
use crate::core::model::{FilteredCustomerRow, InvoiceFormRow, InvoiceStatus, InvoiceWithCustomer};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One of the most recent invoices, with customer details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestInvoice {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub amount: String,
}

impl From<InvoiceWithCustomer> for LatestInvoice {
    fn from(invoice: InvoiceWithCustomer) -> Self {
        let customer = invoice.customer();
        Self {
            id: invoice.id,
            name: customer.name.unwrap_or_default(),
            email: customer.email.unwrap_or_default(),
            image_url: customer.image_url.unwrap_or_default(),
            amount: format_currency(invoice.amount),
        }
    }
}

/// A row of the paginated invoices table
///
/// `amount` stays in cents here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoicesTable {
    pub id: String,
    pub customer_id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub date: NaiveDate,
    pub amount: i64,
    pub status: InvoiceStatus,
}

impl From<InvoiceWithCustomer> for InvoicesTable {
    fn from(invoice: InvoiceWithCustomer) -> Self {
        let customer = invoice.customer();
        Self {
            id: invoice.id,
            customer_id: customer.id.unwrap_or_default(),
            name: customer.name.unwrap_or_default(),
            email: customer.email.unwrap_or_default(),
            image_url: customer.image_url.unwrap_or_default(),
            date: invoice.date,
            amount: invoice.amount,
            status: invoice.status,
        }
    }
}

/// Dashboard summary cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardData {
    pub number_of_invoices: u64,
    pub number_of_customers: u64,
    pub total_paid_invoices: String,
    pub total_pending_invoices: String,
}

/// Values for the invoice edit form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceForm {
    pub id: String,
    pub customer_id: String,
    /// Stored cents divided by 100
    pub amount: f64,
    pub status: InvoiceStatus,
}

impl From<InvoiceFormRow> for InvoiceForm {
    fn from(row: InvoiceFormRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            amount: row.amount as f64 / 100.0,
            status: row.status,
        }
    }
}

/// Customer option for a picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerField {
    pub id: String,
    pub name: String,
}

/// A row of the customers table with per-customer invoice totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomersTableType {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: String,
    pub total_paid: String,
}

impl From<FilteredCustomerRow> for CustomersTableType {
    fn from(row: FilteredCustomerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            total_invoices: row.total_invoices,
            total_pending: format_currency(row.total_pending),
            total_paid: format_currency(row.total_paid),
        }
    }
}
