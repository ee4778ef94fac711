//! # Dashboard Data
//!
//! Read-only data access for an invoicing dashboard. Each operation of
//! [`DashboardData`] issues one request (or one concurrent fan-out) against a
//! hosted relational store and reshapes the rows into view-ready records.
//!
//! ## Features
//!
//! - **Narrow store capability**: [`RemoteStore`](core::store::RemoteStore) covers table reads,
//!   exact counts and procedure calls, nothing more
//! - **View shapes**: currency formatting and empty-string defaults for missing joins
//! - **Coarse errors**: every failure surfaces as the operation's own [`DataError`]
//!   variant with a fixed message; the store's error is only logged
//! - **Backends**: an in-memory store for tests and development, PostgreSQL via sqlx
//!   behind the `postgres` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dashboard::prelude::*;
//!
//! let config = DashboardConfig::from_yaml_file("dashboard.yaml")?.with_env_overrides();
//! config.logging.init()?;
//!
//! let store = PostgresStore::connect(&config.database).await?;
//! let data = DashboardData::new(Arc::new(store));
//!
//! let cards = data.fetch_card_data().await?;
//! let page = data.fetch_filtered_invoices("lee", 1).await?;
//! let pages = data.fetch_invoices_pages("lee").await?;
//! ```

pub mod config;
pub mod core;
pub mod data;
pub mod storage;

pub use crate::core::error::DataError;
pub use data::DashboardData;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        currency::format_currency,
        error::DataError,
        model::{Customer, Invoice, InvoiceStatus, Revenue},
        query::{Direction, ITEMS_PER_PAGE, RowRange, SelectQuery},
        store::{RemoteStore, StoreError},
        view::{
            CardData, CustomerField, CustomersTableType, InvoiceForm, InvoicesTable,
            LatestInvoice,
        },
    };

    // === Facade ===
    pub use crate::data::DashboardData;

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresStore;

    // === Config ===
    pub use crate::config::{DashboardConfig, DatabaseConfig, LoggingConfig};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
