//! Shared test harness for remote store backends
//!
//! Provides a fixed dataset (four customers, thirteen invoices, a year of
//! revenue) with known totals, a seeded `InMemoryStore`, and the
//! `facade_contract_tests!` macro that runs every `DashboardData` operation
//! against any store loaded with that dataset.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//! use store_harness::*;
//!
//! facade_contract_tests!(seeded_in_memory());
//! ```

#![allow(dead_code)]

#[macro_use]
mod facade_contract_tests;

use chrono::NaiveDate;
use dashboard::core::model::{Customer, Invoice, InvoiceStatus, Revenue};
use dashboard::storage::InMemoryStore;

// ---------------------------------------------------------------------------
// Fixture ids
// ---------------------------------------------------------------------------

pub const EVIL_RABBIT: &str = "d6e15727-9fe1-4961-8c5b-ea44a9bd81aa";
pub const DELBA: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";
pub const LEE: &str = "3958dc9e-742f-4377-85e9-fec4b6a6442a";
pub const MICHAEL: &str = "76d65c26-f784-44a2-ac19-586678f7c2f2";

/// Id of fixture invoice number `n` (1-based)
pub fn invoice_id(n: u32) -> String {
    format!("00000000-0000-4000-8000-{:012}", n)
}

/// An id no fixture row uses
pub const UNKNOWN_ID: &str = "ffffffff-ffff-4fff-bfff-ffffffffffff";

// ---------------------------------------------------------------------------
// Fixture data
// ---------------------------------------------------------------------------

/// The shared dataset
///
/// Totals: 13 invoices, 4 customers, paid 100626 cents, pending 125632 cents.
/// Invoice dates are distinct so ordering by date is deterministic:
/// newest first the ids are 4, 11, 5, 6, 7, 9, 8, 10, 12, 1, 2, 3, 13.
pub struct Fixture {
    pub customers: Vec<Customer>,
    pub invoices: Vec<Invoice>,
    pub revenue: Vec<Revenue>,
}

fn customer(id: &str, name: &str, email: &str, image: &str) -> Customer {
    Customer {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        image_url: format!("/customers/{}.png", image),
    }
}

fn invoice(n: u32, customer_id: &str, amount: i64, status: &str, date: (i32, u32, u32)) -> Invoice {
    Invoice {
        id: invoice_id(n),
        customer_id: customer_id.to_string(),
        amount,
        status: InvoiceStatus::from(status),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
    }
}

pub fn fixture() -> Fixture {
    let customers = vec![
        customer(EVIL_RABBIT, "Evil Rabbit", "evil@rabbit.com", "evil-rabbit"),
        customer(DELBA, "Delba de Oliveira", "delba@oliveira.com", "delba-de-oliveira"),
        customer(LEE, "Lee Robinson", "lee@robinson.com", "lee-robinson"),
        customer(MICHAEL, "Michael Novotny", "michael@novotny.com", "michael-novotny"),
    ];

    let invoices = vec![
        invoice(1, EVIL_RABBIT, 15795, "pending", (2022, 12, 6)),
        invoice(2, DELBA, 20348, "pending", (2022, 11, 14)),
        invoice(3, MICHAEL, 3040, "paid", (2022, 10, 29)),
        invoice(4, LEE, 44800, "paid", (2023, 9, 10)),
        invoice(5, EVIL_RABBIT, 34577, "pending", (2023, 8, 5)),
        invoice(6, DELBA, 54246, "pending", (2023, 7, 16)),
        invoice(7, MICHAEL, 666, "pending", (2023, 6, 27)),
        invoice(8, LEE, 32545, "paid", (2023, 6, 9)),
        invoice(9, EVIL_RABBIT, 1250, "paid", (2023, 6, 17)),
        invoice(10, DELBA, 8546, "paid", (2023, 6, 7)),
        invoice(11, MICHAEL, 500, "paid", (2023, 8, 19)),
        invoice(12, LEE, 8945, "paid", (2023, 6, 3)),
        invoice(13, EVIL_RABBIT, 1000, "paid", (2022, 6, 5)),
    ];

    let revenue = [
        ("Jan", 2000.0),
        ("Feb", 1800.0),
        ("Mar", 2200.0),
        ("Apr", 2500.0),
        ("May", 2300.0),
        ("Jun", 3200.0),
        ("Jul", 3500.0),
        ("Aug", 3700.0),
        ("Sep", 2500.0),
        ("Oct", 2800.0),
        ("Nov", 3000.0),
        ("Dec", 4800.0),
    ]
    .into_iter()
    .map(|(month, revenue)| Revenue {
        month: month.to_string(),
        revenue,
    })
    .collect();

    Fixture {
        customers,
        invoices,
        revenue,
    }
}

/// In-memory store loaded with [`fixture`]
pub fn seeded_in_memory() -> InMemoryStore {
    let store = InMemoryStore::new();
    let data = fixture();
    for c in data.customers {
        store.insert_customer(c);
    }
    for i in data.invoices {
        store.insert_invoice(i);
    }
    for r in data.revenue {
        store.insert_revenue(r);
    }
    store
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

/// Assert that a list contains exactly `n` items.
pub fn assert_count<T>(list: &[T], expected: usize) {
    assert_eq!(
        list.len(),
        expected,
        "Expected {} items, got {}",
        expected,
        list.len()
    );
}

/// Assert that `ids` are the fixture invoices numbered `expected`, in order.
pub fn assert_invoice_ids(ids: &[String], expected: &[u32]) {
    let expected: Vec<String> = expected.iter().map(|n| invoice_id(*n)).collect();
    assert_eq!(ids, expected.as_slice(), "unexpected invoice order");
}
