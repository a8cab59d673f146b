//! Domain ports (traits)
//!
//! Port traits define interfaces that the client requires.
//! Adapters provide concrete implementations of these traits.

pub mod invoice_api;

pub use invoice_api::InvoiceApi;
