//! Application layer
//!
//! Contains the grouping core and the use cases built on the invoice port.
//! - `sender_domain`, `grouping`, `collation`: pure list organization
//! - `collapse`, `invoice_list`: presentation state that outlives a regrouping
//! - `invoice_service`: backend orchestration

pub mod collapse;
pub mod collation;
pub mod grouping;
pub mod invoice_list;
pub mod invoice_service;
pub mod sender_domain;

pub use collapse::CollapsedGroups;
pub use grouping::{
    filter_invoices, group_by_domain, group_invoices, sort_groups, InvoiceGroup, SortOrder,
};
pub use invoice_list::InvoiceListView;
pub use invoice_service::InvoiceService;
pub use sender_domain::{extract_domain, MULTI_LABEL_SUFFIXES};
