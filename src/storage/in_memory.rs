//! In-memory implementation of RemoteStore for testing and development

use crate::core::model::{Customer, Invoice, InvoiceStatus, Revenue};
use crate::core::query::{Direction, Filter, SelectQuery};
use crate::core::store::{RemoteStore, StoreError, procedures, tables};
use async_trait::async_trait;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// A request received by [`InMemoryStore`]
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Select(SelectQuery),
    Count(SelectQuery),
    Rpc { function: String, args: Value },
}

/// Which kind of request an injected failure applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Select,
    Count,
    Rpc,
}

#[derive(Default)]
struct Tables {
    invoices: Vec<Invoice>,
    customers: Vec<Customer>,
    revenue: Vec<Revenue>,
}

/// In-memory remote store
///
/// Holds the `invoices`, `customers` and `revenue` tables and answers
/// queries the way the hosted store does: projection, embedded customers,
/// ILIKE/equality filters, ordering and row ranges. Also implements the
/// `fetch_filtered_customers` procedure.
///
/// Every request is recorded (see [`requests`](Self::requests)) and failures
/// can be injected per request kind and table or procedure name. Clones
/// share the same state.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
    failures: Arc<RwLock<HashMap<(RequestKind, String), StoreError>>>,
    requests: Arc<RwLock<Vec<Request>>>,
}

fn poisoned<T>(e: PoisonError<T>) -> StoreError {
    StoreError::new("lock", format!("store lock poisoned: {}", e))
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_customer(&self, customer: Customer) {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .customers
            .push(customer);
    }

    pub fn insert_invoice(&self, invoice: Invoice) {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .invoices
            .push(invoice);
    }

    pub fn insert_revenue(&self, revenue: Revenue) {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .revenue
            .push(revenue);
    }

    /// Make every `kind` request against `target` (a table or procedure name) fail
    pub fn fail(&self, kind: RequestKind, target: impl Into<String>, error: StoreError) {
        self.failures
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((kind, target.into()), error);
    }

    /// Remove all injected failures
    pub fn heal(&self) {
        self.failures
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<Request> {
        self.requests
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear_requests(&self) {
        self.requests
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn record(&self, kind: RequestKind, target: &str, request: Request) -> Result<(), StoreError> {
        self.requests.write().map_err(poisoned)?.push(request);

        let failures = self.failures.read().map_err(poisoned)?;
        match failures.get(&(kind, target.to_string())) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    /// Rows of `query.table` after embedding and filtering, before
    /// ordering, slicing and projection.
    fn matching_rows(&self, query: &SelectQuery) -> Result<Vec<Value>, StoreError> {
        let tables = self.tables.read().map_err(poisoned)?;

        let mut rows = match query.table.as_str() {
            tables::INVOICES => to_rows(&tables.invoices)?,
            tables::CUSTOMERS => to_rows(&tables.customers)?,
            tables::REVENUE => to_rows(&tables.revenue)?,
            other => {
                return Err(StoreError::new(
                    "42P01",
                    format!("relation \"{}\" does not exist", other),
                ));
            }
        };

        let embedded = match &query.embed {
            Some(embed) => {
                if query.table != tables::INVOICES || embed.table != tables::CUSTOMERS {
                    return Err(StoreError::new(
                        "PGRST200",
                        format!(
                            "Could not find a relationship between '{}' and '{}'",
                            query.table, embed.table
                        ),
                    ));
                }
                let customers = to_rows(&tables.customers)?;
                for row in rows.iter_mut() {
                    let related = customers
                        .iter()
                        .find(|c| c.get("id").is_some() && c.get("id") == row.get("customer_id"))
                        .map(|c| project(c, &embed.columns))
                        .unwrap_or(Value::Null);
                    if let Some(obj) = row.as_object_mut() {
                        obj.insert(embed.table.clone(), related);
                    }
                }
                Some(embed.table.as_str())
            }
            None => None,
        };

        let filters = query
            .filters
            .iter()
            .map(|filter| compile(filter, &query.table, embedded))
            .collect::<Result<Vec<_>, _>>()?;

        rows.retain(|row| filters.iter().all(|f| f.matches(row)));
        Ok(rows)
    }

    fn filtered_customers(&self, args: &Value) -> Result<Vec<Value>, StoreError> {
        let search = args.get("search").and_then(Value::as_str).ok_or_else(|| {
            StoreError::new(
                "PGRST202",
                "Could not find the function fetch_filtered_customers without parameter search",
            )
        })?;
        let pattern = like_regex(&format!("%{}%", search))?;

        let tables = self.tables.read().map_err(poisoned)?;
        let mut customers: Vec<&Customer> = tables
            .customers
            .iter()
            .filter(|c| pattern.is_match(&c.name) || pattern.is_match(&c.email))
            .collect();
        customers.sort_by(|a, b| a.name.cmp(&b.name));

        customers
            .into_iter()
            .map(|customer| {
                let invoices = tables
                    .invoices
                    .iter()
                    .filter(|i| i.customer_id == customer.id);

                let (mut total_invoices, mut total_pending, mut total_paid) = (0i64, 0i64, 0i64);
                for invoice in invoices {
                    total_invoices += 1;
                    let total = match invoice.status {
                        InvoiceStatus::Pending => &mut total_pending,
                        InvoiceStatus::Paid => &mut total_paid,
                        InvoiceStatus::Other(_) => continue,
                    };
                    *total = total
                        .checked_add(invoice.amount)
                        .ok_or_else(|| StoreError::new("22003", "bigint out of range"))?;
                }

                Ok(json!({
                    "id": customer.id,
                    "name": customer.name,
                    "email": customer.email,
                    "image_url": customer.image_url,
                    "total_invoices": total_invoices,
                    "total_pending": total_pending,
                    "total_paid": total_paid,
                }))
            })
            .collect()
    }
}

#[async_trait]
impl RemoteStore for InMemoryStore {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>, StoreError> {
        self.record(
            RequestKind::Select,
            &query.table,
            Request::Select(query.clone()),
        )?;

        let mut rows = self.matching_rows(query)?;

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ordering = compare(lookup(a, &order.column), lookup(b, &order.column));
                match order.direction {
                    Direction::Asc => ordering,
                    Direction::Desc => ordering.reverse(),
                }
            });
        }

        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let take = query
            .max_rows()
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);

        let mut keep = query.columns.clone();
        if let Some(embed) = &query.embed {
            if !keep.is_empty() {
                keep.push(embed.table.clone());
            }
        }

        Ok(rows
            .into_iter()
            .skip(offset)
            .take(take)
            .map(|row| project(&row, &keep))
            .collect())
    }

    async fn count(&self, query: &SelectQuery) -> Result<Option<u64>, StoreError> {
        self.record(RequestKind::Count, &query.table, Request::Count(query.clone()))?;

        let rows = self.matching_rows(query)?;
        Ok(Some(rows.len() as u64))
    }

    async fn rpc(&self, function: &str, args: Value) -> Result<Vec<Value>, StoreError> {
        self.record(
            RequestKind::Rpc,
            function,
            Request::Rpc {
                function: function.to_string(),
                args: args.clone(),
            },
        )?;

        match function {
            procedures::FETCH_FILTERED_CUSTOMERS => self.filtered_customers(&args),
            other => Err(StoreError::new(
                "PGRST202",
                format!("Could not find the function public.{}", other),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Row helpers
// ---------------------------------------------------------------------------

fn to_rows<T: Serialize>(records: &[T]) -> Result<Vec<Value>, StoreError> {
    records
        .iter()
        .map(|r| {
            serde_json::to_value(r)
                .map_err(|e| StoreError::new("serialize", format!("failed to serialize row: {}", e)))
        })
        .collect()
}

/// Keep only `columns` of an object row; an empty list keeps everything
fn project(row: &Value, columns: &[String]) -> Value {
    if columns.is_empty() {
        return row.clone();
    }
    match row.as_object() {
        Some(obj) => Value::Object(
            columns
                .iter()
                .filter_map(|c| obj.get(c).map(|v| (c.clone(), v.clone())))
                .collect::<Map<String, Value>>(),
        ),
        None => row.clone(),
    }
}

/// Resolve `column` or `table.column` in a row
fn lookup<'a>(row: &'a Value, column: &str) -> &'a Value {
    let value = match column.split_once('.') {
        Some((table, column)) => row.get(table).and_then(|related| related.get(column)),
        None => row.get(column),
    };
    value.unwrap_or(&Value::Null)
}

/// Total order over JSON scalars; nulls sort after everything else
fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

/// Textual value of a scalar, as SQL would compare it against a text parameter
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Translate a LIKE pattern into an anchored, case-insensitive regex
fn like_regex(pattern: &str) -> Result<Regex, StoreError> {
    let mut source = String::with_capacity(pattern.len() + 2);
    source.push('^');
    for ch in pattern.chars() {
        match ch {
            '%' => source.push_str(".*"),
            '_' => source.push('.'),
            other => source.push_str(&regex::escape(&other.to_string())),
        }
    }
    source.push('$');

    RegexBuilder::new(&source)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .map_err(|e| StoreError::new("22025", format!("invalid pattern: {}", e)))
}

enum Compiled {
    Eq { column: String, value: String },
    ILike { column: String, pattern: Regex },
}

impl Compiled {
    fn matches(&self, row: &Value) -> bool {
        match self {
            Compiled::Eq { column, value } => {
                as_text(lookup(row, column)).is_some_and(|v| &v == value)
            }
            Compiled::ILike { column, pattern } => {
                as_text(lookup(row, column)).is_some_and(|v| pattern.is_match(&v))
            }
        }
    }
}

/// Check that a filter addresses a known table and prepare it for matching
fn compile(filter: &Filter, table: &str, embedded: Option<&str>) -> Result<Compiled, StoreError> {
    if let Some((related, _)) = filter.column().split_once('.') {
        if Some(related) != embedded {
            return Err(StoreError::new(
                "PGRST108",
                format!(
                    "'{}' is not an embedded resource of '{}'",
                    related, table
                ),
            ));
        }
    }

    Ok(match filter {
        Filter::Eq { column, value } => Compiled::Eq {
            column: column.clone(),
            value: value.clone(),
        },
        Filter::ILike { column, pattern } => Compiled::ILike {
            column: column.clone(),
            pattern: like_regex(pattern)?,
        },
    })
}
