//! Macro-generated test suite running every `DashboardData` operation against
//! a store loaded with the harness fixture.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//!
//! use store_harness::*;
//!
//! facade_contract_tests!(seeded_in_memory());
//! ```
//!
//! # Generated Tests
//!
//! ## Dashboard
//! - `test_revenue_returns_every_row`
//! - `test_latest_invoices_newest_five`
//! - `test_card_data_totals`
//!
//! ## Invoices
//! - `test_filtered_invoices_first_page` / `_last_page` / `_past_last_page`
//! - `test_filtered_invoices_match_name_case_insensitively`
//! - `test_filtered_invoices_no_match`
//! - `test_invoices_pages`
//! - `test_pages_agree_with_listing`
//! - `test_invoice_by_id` / `test_invoice_by_id_not_found`
//!
//! ## Customers
//! - `test_customers_sorted_by_name`
//! - `test_filtered_customers_single_match`
//! - `test_filtered_customers_all`

/// Generate the `DashboardData` conformance suite.
///
/// `$factory` must evaluate to a `RemoteStore` loaded with
/// [`fixture`](super::fixture). It is re-evaluated for each test.
macro_rules! facade_contract_tests {
    ($factory:expr) => {
        mod facade_contract_tests {
            use super::*;
            use dashboard::core::model::InvoiceStatus;
            use dashboard::{DashboardData, DataError};
            use std::sync::Arc;

            async fn data() -> DashboardData {
                DashboardData::new(Arc::new($factory))
            }

            // ==================================================================
            // Dashboard
            // ==================================================================

            #[tokio::test]
            async fn test_revenue_returns_every_row() {
                let data = data().await;

                let revenue = data.fetch_revenue().await.unwrap();
                assert_count(&revenue, 12);
                let dec = revenue.iter().find(|r| r.month == "Dec").unwrap();
                assert!((dec.revenue - 4800.0).abs() < f64::EPSILON);
            }

            #[tokio::test]
            async fn test_latest_invoices_newest_five() {
                let data = data().await;

                let latest = data.fetch_latest_invoices().await.unwrap();
                let ids: Vec<String> = latest.iter().map(|i| i.id.clone()).collect();
                assert_invoice_ids(&ids, &[4, 11, 5, 6, 7]);

                let amounts: Vec<&str> = latest.iter().map(|i| i.amount.as_str()).collect();
                assert_eq!(amounts, vec!["$448.00", "$5.00", "$345.77", "$542.46", "$6.66"]);

                assert_eq!(latest[0].name, "Lee Robinson");
                assert_eq!(latest[0].email, "lee@robinson.com");
                assert_eq!(latest[0].image_url, "/customers/lee-robinson.png");
            }

            #[tokio::test]
            async fn test_card_data_totals() {
                let data = data().await;

                let cards = data.fetch_card_data().await.unwrap();
                assert_eq!(cards.number_of_invoices, 13);
                assert_eq!(cards.number_of_customers, 4);
                assert_eq!(cards.total_paid_invoices, "$1,006.26");
                assert_eq!(cards.total_pending_invoices, "$1,256.32");
            }

            // ==================================================================
            // Invoices
            // ==================================================================

            #[tokio::test]
            async fn test_filtered_invoices_first_page() {
                let data = data().await;

                let page = data.fetch_filtered_invoices("", 1).await.unwrap();
                let ids: Vec<String> = page.iter().map(|i| i.id.clone()).collect();
                assert_invoice_ids(&ids, &[4, 11, 5, 6, 7, 9]);

                let first = &page[0];
                assert_eq!(first.amount, 44800);
                assert_eq!(first.status, InvoiceStatus::Paid);
                assert_eq!(first.customer_id, LEE);
                assert_eq!(first.name, "Lee Robinson");
                assert_eq!(first.date.to_string(), "2023-09-10");
            }

            #[tokio::test]
            async fn test_filtered_invoices_last_page() {
                let data = data().await;

                let page = data.fetch_filtered_invoices("", 3).await.unwrap();
                let ids: Vec<String> = page.iter().map(|i| i.id.clone()).collect();
                assert_invoice_ids(&ids, &[13]);
            }

            #[tokio::test]
            async fn test_filtered_invoices_past_last_page() {
                let data = data().await;

                let page = data.fetch_filtered_invoices("", 4).await.unwrap();
                assert!(page.is_empty());
            }

            #[tokio::test]
            async fn test_filtered_invoices_match_name_case_insensitively() {
                let data = data().await;

                let page = data.fetch_filtered_invoices("LEE", 1).await.unwrap();
                let ids: Vec<String> = page.iter().map(|i| i.id.clone()).collect();
                assert_invoice_ids(&ids, &[4, 8, 12]);
                assert!(page.iter().all(|i| i.name == "Lee Robinson"));
            }

            #[tokio::test]
            async fn test_filtered_invoices_no_match() {
                let data = data().await;

                let page = data.fetch_filtered_invoices("zzz", 1).await.unwrap();
                assert!(page.is_empty());
            }

            #[tokio::test]
            async fn test_invoices_pages() {
                let data = data().await;

                assert_eq!(data.fetch_invoices_pages("").await.unwrap(), 3);
                assert_eq!(data.fetch_invoices_pages("rabbit").await.unwrap(), 1);
                assert_eq!(data.fetch_invoices_pages("e").await.unwrap(), 3);
                assert_eq!(data.fetch_invoices_pages("zzz").await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_pages_agree_with_listing() {
                let data = data().await;

                for search in ["", "e", "lee", "rabbit", "zzz"] {
                    let pages = data.fetch_invoices_pages(search).await.unwrap();
                    let mut listed = 0;
                    for page in 1..=pages {
                        let rows = data.fetch_filtered_invoices(search, page).await.unwrap();
                        assert!(!rows.is_empty(), "page {} of '{}' is empty", page, search);
                        listed += rows.len();
                    }
                    let beyond = data.fetch_filtered_invoices(search, pages + 1).await.unwrap();
                    assert!(beyond.is_empty(), "'{}' has rows past the last page", search);
                    assert_eq!(pages, (listed as u64).div_ceil(6), "search '{}'", search);
                }
            }

            #[tokio::test]
            async fn test_invoice_by_id() {
                let data = data().await;

                let form = data.fetch_invoice_by_id(&invoice_id(9)).await.unwrap();
                assert_eq!(form.id, invoice_id(9));
                assert_eq!(form.customer_id, EVIL_RABBIT);
                assert_eq!(form.status, InvoiceStatus::Paid);
                assert!((form.amount - 12.5).abs() < f64::EPSILON);
            }

            #[tokio::test]
            async fn test_invoice_by_id_not_found() {
                let data = data().await;

                let err = data.fetch_invoice_by_id(UNKNOWN_ID).await.unwrap_err();
                assert_eq!(
                    err,
                    DataError::InvoiceNotFound {
                        id: UNKNOWN_ID.to_string()
                    }
                );
            }

            // ==================================================================
            // Customers
            // ==================================================================

            #[tokio::test]
            async fn test_customers_sorted_by_name() {
                let data = data().await;

                let customers = data.fetch_customers().await.unwrap();
                let names: Vec<&str> = customers.iter().map(|c| c.name.as_str()).collect();
                assert_eq!(
                    names,
                    vec!["Delba de Oliveira", "Evil Rabbit", "Lee Robinson", "Michael Novotny"]
                );
                assert_eq!(customers[0].id, DELBA);
            }

            #[tokio::test]
            async fn test_filtered_customers_single_match() {
                let data = data().await;

                let rows = data.fetch_filtered_customers("de").await.unwrap();
                assert_count(&rows, 1);
                let delba = &rows[0];
                assert_eq!(delba.id, DELBA);
                assert_eq!(delba.email, "delba@oliveira.com");
                assert_eq!(delba.total_invoices, 3);
                assert_eq!(delba.total_pending, "$745.94");
                assert_eq!(delba.total_paid, "$85.46");
            }

            #[tokio::test]
            async fn test_filtered_customers_all() {
                let data = data().await;

                let rows = data.fetch_filtered_customers("").await.unwrap();
                let summary: Vec<(&str, i64, &str, &str)> = rows
                    .iter()
                    .map(|r| {
                        (
                            r.name.as_str(),
                            r.total_invoices,
                            r.total_pending.as_str(),
                            r.total_paid.as_str(),
                        )
                    })
                    .collect();

                assert_eq!(
                    summary,
                    vec![
                        ("Delba de Oliveira", 3, "$745.94", "$85.46"),
                        ("Evil Rabbit", 4, "$503.72", "$22.50"),
                        ("Lee Robinson", 3, "$0.00", "$862.90"),
                        ("Michael Novotny", 3, "$6.66", "$35.40"),
                    ]
                );
            }
        }
    };
}
