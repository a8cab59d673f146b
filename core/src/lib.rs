//! invoice-desk core
//!
//! Client-side logic for the invoice backend: entities mirroring the backend
//! contract, the `InvoiceApi` port with its HTTP adapter, and the sender-domain
//! grouping used to present invoices by sending organization.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod render;

#[cfg(test)]
mod test_utils;


pub use adapters::HttpInvoiceApi;
pub use app::{
    extract_domain, filter_invoices, group_by_domain, group_invoices, sort_groups,
    CollapsedGroups, InvoiceGroup, InvoiceListView, InvoiceService, SortOrder,
};
pub use config::Config;
pub use error::{ApiError, AppError, ConfigError};
