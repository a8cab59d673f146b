//! Domain entities
//!
//! Records exchanged with the invoice backend. Everything the grouping core
//! does not inspect is carried through unchanged.

pub mod account;
pub mod export;
pub mod invoice;
pub mod sync;

pub use account::{AccountInfo, ConnectionStatus};
pub use export::ExportOptions;
pub use invoice::{
    Category, Invoice, InvoiceFilters, InvoiceId, InvoiceKind, InvoiceUpdate, SenderSummary,
};
pub use sync::{SyncOptions, SyncResponse};
