//! HTTP adapter
//!
//! reqwest implementation of the invoice backend port.

pub mod client;

pub use client::HttpInvoiceApi;
