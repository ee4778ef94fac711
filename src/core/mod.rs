//! Core module containing the record types, query model and store capability

pub mod currency;
pub mod error;
pub mod model;
pub mod query;
pub mod store;
pub mod view;

pub use currency::format_currency;
pub use error::DataError;
pub use model::{Customer, Invoice, InvoiceStatus, Revenue};
pub use query::{Direction, Filter, ITEMS_PER_PAGE, RowRange, SelectQuery};
pub use store::{RemoteStore, StoreError};
pub use view::{
    CardData, CustomerField, CustomersTableType, InvoiceForm, InvoicesTable, LatestInvoice,
};
