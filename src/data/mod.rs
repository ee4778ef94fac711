//! Dashboard reads: one remote request per operation, reshaped for display

use crate::core::currency::format_currency;
use crate::core::error::{DataError, FetchFailure};
use crate::core::model::{
    FilteredCustomerRow, InvoiceFormRow, InvoiceWithCustomer, Revenue, StatusAmount,
    StatusTotals,
};
use crate::core::query::{
    Direction, ITEMS_PER_PAGE, RowRange, SelectQuery, contains_pattern, page_count,
};
use crate::core::store::{RemoteStore, procedures, tables};
use crate::core::view::{
    CardData, CustomerField, CustomersTableType, InvoiceForm, InvoicesTable, LatestInvoice,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;

/// Number of invoices shown in the "latest invoices" panel
pub const LATEST_INVOICES_LIMIT: u64 = 5;

const CUSTOMER_COLUMNS: [&str; 4] = ["id", "name", "email", "image_url"];

/// Read-only data access for the invoicing dashboard
///
/// Holds one shared store handle and nothing else; every call builds its
/// own query. Failures are logged with their cause and surfaced as the
/// operation's [`DataError`] variant.
///
/// # Example
///
/// ```rust,ignore
/// let data = DashboardData::new(Arc::new(InMemoryStore::new()));
/// let cards = data.fetch_card_data().await?;
/// println!("{} invoices", cards.number_of_invoices);
/// ```
#[derive(Clone)]
pub struct DashboardData {
    store: Arc<dyn RemoteStore>,
}

impl DashboardData {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    /// All revenue rows, as stored
    pub async fn fetch_revenue(&self) -> Result<Vec<Revenue>, DataError> {
        let query = SelectQuery::new(tables::REVENUE);

        self.select_as(&query)
            .await
            .map_err(failed("fetch_revenue", DataError::RevenueFetchFailed))
    }

    /// The five most recent invoices with their customer, amounts formatted
    pub async fn fetch_latest_invoices(&self) -> Result<Vec<LatestInvoice>, DataError> {
        let query = SelectQuery::new(tables::INVOICES)
            .embed(tables::CUSTOMERS, CUSTOMER_COLUMNS)
            .order("date", Direction::Desc)
            .limit(LATEST_INVOICES_LIMIT);

        let rows: Vec<InvoiceWithCustomer> = self.select_as(&query).await.map_err(failed(
            "fetch_latest_invoices",
            DataError::LatestInvoicesFetchFailed,
        ))?;

        Ok(rows.into_iter().map(LatestInvoice::from).collect())
    }

    /// Invoice and customer counts plus paid/pending totals
    ///
    /// The three reads run concurrently; if any of them fails the whole
    /// operation fails and no partial result is returned.
    pub async fn fetch_card_data(&self) -> Result<CardData, DataError> {
        let invoice_count = SelectQuery::new(tables::INVOICES);
        let customer_count = SelectQuery::new(tables::CUSTOMERS);
        let amounts = SelectQuery::new(tables::INVOICES).columns(["amount", "status"]);

        let on_error = failed("fetch_card_data", DataError::CardDataFetchFailed);

        let (number_of_invoices, number_of_customers, rows) = futures::try_join!(
            self.store.count(&invoice_count),
            self.store.count(&customer_count),
            self.store.select(&amounts),
        )
        .map_err(|e| on_error.clone()(e.into()))?;

        let rows: Vec<StatusAmount> = decode_rows(rows).map_err(on_error.clone())?;
        let totals = StatusTotals::from_rows(&rows)
            .ok_or(FetchFailure::TotalOverflow("paid or pending"))
            .map_err(on_error)?;

        Ok(CardData {
            number_of_invoices: number_of_invoices.unwrap_or(0),
            number_of_customers: number_of_customers.unwrap_or(0),
            total_paid_invoices: format_currency(totals.paid),
            total_pending_invoices: format_currency(totals.pending),
        })
    }

    /// One page of invoices whose customer name contains `search`
    ///
    /// Pages are 1-based and hold [`ITEMS_PER_PAGE`] rows, newest first.
    pub async fn fetch_filtered_invoices(
        &self,
        search: &str,
        page: u64,
    ) -> Result<Vec<InvoicesTable>, DataError> {
        let query = invoices_matching(search)
            .columns(["id", "amount", "date", "status"])
            .order("date", Direction::Desc)
            .range(RowRange::for_page(page, ITEMS_PER_PAGE));

        let rows: Vec<InvoiceWithCustomer> = self.select_as(&query).await.map_err(failed(
            "fetch_filtered_invoices",
            DataError::FilteredInvoicesFetchFailed,
        ))?;

        Ok(rows.into_iter().map(InvoicesTable::from).collect())
    }

    /// Number of pages [`fetch_filtered_invoices`](Self::fetch_filtered_invoices)
    /// can return for `search`
    pub async fn fetch_invoices_pages(&self, search: &str) -> Result<u64, DataError> {
        let query = invoices_matching(search);

        let total = self
            .store
            .count(&query)
            .await
            .map_err(|e| {
                failed("fetch_invoices_pages", DataError::InvoicePagesFetchFailed)(e.into())
            })?
            .unwrap_or(0);

        Ok(page_count(total, ITEMS_PER_PAGE))
    }

    /// Edit-form values of one invoice; the amount is converted to dollars
    pub async fn fetch_invoice_by_id(&self, id: &str) -> Result<InvoiceForm, DataError> {
        let query = SelectQuery::new(tables::INVOICES)
            .columns(["id", "customer_id", "amount", "status"])
            .eq("id", id);

        let rows: Vec<InvoiceFormRow> = self
            .select_as(&query)
            .await
            .map_err(failed("fetch_invoice_by_id", DataError::InvoiceFetchFailed))?;

        match rows.into_iter().next() {
            Some(row) => Ok(InvoiceForm::from(row)),
            None => {
                tracing::debug!(invoice_id = %id, "invoice not found");
                Err(DataError::InvoiceNotFound { id: id.to_string() })
            }
        }
    }

    /// Every customer's id and name, sorted by name
    pub async fn fetch_customers(&self) -> Result<Vec<CustomerField>, DataError> {
        let query = SelectQuery::new(tables::CUSTOMERS)
            .columns(["id", "name"])
            .order("name", Direction::Asc);

        self.select_as(&query)
            .await
            .map_err(failed("fetch_customers", DataError::CustomersFetchFailed))
    }

    /// Customers matching `search` with their invoice totals
    ///
    /// Filtering and aggregation happen in the store procedure; only the
    /// two totals are formatted here.
    pub async fn fetch_filtered_customers(
        &self,
        search: &str,
    ) -> Result<Vec<CustomersTableType>, DataError> {
        let on_error = failed(
            "fetch_filtered_customers",
            DataError::CustomerTableFetchFailed,
        );

        let rows = match self
            .store
            .rpc(procedures::FETCH_FILTERED_CUSTOMERS, json!({ "search": search }))
            .await
        {
            Ok(rows) => rows,
            Err(e) => return Err(on_error(e.into())),
        };

        let rows: Vec<FilteredCustomerRow> = decode_rows(rows).map_err(on_error)?;

        Ok(rows.into_iter().map(CustomersTableType::from).collect())
    }

    async fn select_as<T: DeserializeOwned>(
        &self,
        query: &SelectQuery,
    ) -> Result<Vec<T>, FetchFailure> {
        tracing::debug!(table = %query.table, "select");
        let rows = self.store.select(query).await?;
        decode_rows(rows)
    }
}

/// Invoices joined with their customer, restricted to customer names
/// containing `search`; an empty search keeps every invoice.
fn invoices_matching(search: &str) -> SelectQuery {
    let query = SelectQuery::new(tables::INVOICES).embed(tables::CUSTOMERS, CUSTOMER_COLUMNS);

    if search.is_empty() {
        query
    } else {
        query.ilike("customers.name", contains_pattern(search))
    }
}

fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, FetchFailure> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(FetchFailure::from))
        .collect()
}

/// Log the cause of a failed read and replace it with the operation's error
fn failed(
    operation: &'static str,
    error: DataError,
) -> impl FnOnce(FetchFailure) -> DataError + Clone {
    move |cause| {
        let (details, hint) = match &cause {
            FetchFailure::Store(e) => (e.details.as_deref(), e.hint.as_deref()),
            _ => (None, None),
        };
        tracing::error!(operation, cause = %cause, details, hint, "{}", error);
        error
    }
}
