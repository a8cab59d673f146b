//! Invoice backend port trait
//!
//! Defines the interface for talking to the invoice backend. Invoice detection,
//! PDF extraction and storage all happen behind this boundary.

use async_trait::async_trait;

use crate::domain::entities::{
    AccountInfo, ConnectionStatus, ExportOptions, Invoice, InvoiceFilters, InvoiceId,
    InvoiceUpdate, SenderSummary, SyncOptions, SyncResponse,
};
use crate::error::ApiError;

/// Client port for the invoice backend
#[async_trait]
pub trait InvoiceApi: Send + Sync {
    // Session

    /// Get the connection status and connected mailboxes
    async fn status(&self) -> Result<ConnectionStatus, ApiError>;

    /// List connected mailboxes
    async fn accounts(&self) -> Result<Vec<AccountInfo>, ApiError>;

    /// Disconnect a mailbox
    async fn remove_account(&self, user_id: i64) -> Result<(), ApiError>;

    // Invoices

    /// Scan connected mailboxes for new invoices
    async fn sync(&self, options: &SyncOptions) -> Result<SyncResponse, ApiError>;

    /// List invoices matching the backend-side filters
    async fn list(&self, filters: &InvoiceFilters) -> Result<Vec<Invoice>, ApiError>;

    /// Get a single invoice
    async fn get(&self, id: InvoiceId) -> Result<Invoice, ApiError>;

    /// Change category and/or privacy flag
    async fn update(&self, id: InvoiceId, update: &InvoiceUpdate) -> Result<Invoice, ApiError>;

    /// Delete an invoice
    async fn delete(&self, id: InvoiceId) -> Result<(), ApiError>;

    /// Distinct senders across all invoices
    async fn senders(&self) -> Result<Vec<SenderSummary>, ApiError>;

    // Export

    /// Link to the ZIP export for the given period
    fn export_url(&self, options: &ExportOptions) -> String;
}
