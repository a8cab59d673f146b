//! Mock implementations of port traits
//!
//! In-memory backend that can be configured for testing. It stores data in
//! memory and applies the same list filters the real backend does.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    AccountInfo, ConnectionStatus, ExportOptions, Invoice, InvoiceFilters, InvoiceId,
    InvoiceUpdate, SenderSummary, SyncOptions, SyncResponse,
};
use crate::domain::ports::InvoiceApi;
use crate::error::ApiError;

use super::fixtures::test_account;

// ============================================================================
// In-Memory Invoice Backend
// ============================================================================

#[derive(Default)]
pub struct InMemoryInvoiceApi {
    invoices: Arc<RwLock<Vec<Invoice>>>,
    /// Invoices the next sync will "find"
    pending_sync: Arc<RwLock<Vec<Invoice>>>,
    accounts: Arc<RwLock<Vec<AccountInfo>>>,
    fail_sync: bool,
}

impl InMemoryInvoiceApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with invoices for testing
    pub fn with_invoices(self, invoices: Vec<Invoice>) -> Self {
        self.invoices.write().unwrap().extend(invoices);
        self
    }

    pub fn with_pending_sync(self, invoices: Vec<Invoice>) -> Self {
        self.pending_sync.write().unwrap().extend(invoices);
        self
    }

    pub fn with_account(self, email: &str) -> Self {
        {
            let mut accounts = self.accounts.write().unwrap();
            let id = accounts.len() as i64 + 1;
            accounts.push(test_account(id, email));
        }
        self
    }

    /// Make every sync fail with a server error
    pub fn failing_sync(mut self) -> Self {
        self.fail_sync = true;
        self
    }
}

fn received_on(invoice: &Invoice) -> Option<NaiveDate> {
    invoice
        .received_date
        .get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
}

fn matches_filters(invoice: &Invoice, filters: &InvoiceFilters) -> bool {
    if let Some(sender) = &filters.sender {
        if &invoice.sender_email != sender {
            return false;
        }
    }
    if let Some(category) = filters.category {
        if invoice.category != category {
            return false;
        }
    }
    if let Some(is_private) = filters.is_private {
        if invoice.is_private != is_private {
            return false;
        }
    }
    let received = received_on(invoice);
    if let Some(start) = filters.start_date {
        if received.map_or(true, |day| day < start) {
            return false;
        }
    }
    if let Some(end) = filters.end_date {
        if received.map_or(true, |day| day > end) {
            return false;
        }
    }
    true
}

#[async_trait]
impl InvoiceApi for InMemoryInvoiceApi {
    async fn status(&self) -> Result<ConnectionStatus, ApiError> {
        let accounts = self.accounts.read().unwrap().clone();
        Ok(ConnectionStatus {
            connected: !accounts.is_empty(),
            email: accounts.first().map(|a| a.email.clone()),
            message: if accounts.is_empty() {
                "No mailbox connected".to_string()
            } else {
                "Connected".to_string()
            },
            accounts,
        })
    }

    async fn accounts(&self) -> Result<Vec<AccountInfo>, ApiError> {
        Ok(self.accounts.read().unwrap().clone())
    }

    async fn remove_account(&self, user_id: i64) -> Result<(), ApiError> {
        let mut accounts = self.accounts.write().unwrap();
        let before = accounts.len();
        accounts.retain(|a| a.id != user_id);
        if accounts.len() == before {
            return Err(ApiError::NotFound(format!("Account {}", user_id)));
        }
        Ok(())
    }

    async fn sync(&self, _options: &SyncOptions) -> Result<SyncResponse, ApiError> {
        if self.fail_sync {
            return Err(ApiError::Server {
                status: 500,
                message: "mail server unreachable".to_string(),
            });
        }

        let found: Vec<Invoice> = self.pending_sync.write().unwrap().drain(..).collect();
        let count = found.len() as u32;
        self.invoices.write().unwrap().extend(found);

        Ok(SyncResponse {
            success: true,
            invoices_found: count,
            message: format!("Synced {} new invoices", count),
        })
    }

    async fn list(&self, filters: &InvoiceFilters) -> Result<Vec<Invoice>, ApiError> {
        let invoices = self.invoices.read().unwrap();
        Ok(invoices
            .iter()
            .filter(|inv| matches_filters(inv, filters))
            .cloned()
            .collect())
    }

    async fn get(&self, id: InvoiceId) -> Result<Invoice, ApiError> {
        let invoices = self.invoices.read().unwrap();
        invoices
            .iter()
            .find(|inv| inv.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Invoice not found".to_string()))
    }

    async fn update(&self, id: InvoiceId, update: &InvoiceUpdate) -> Result<Invoice, ApiError> {
        let mut invoices = self.invoices.write().unwrap();
        let invoice = invoices
            .iter_mut()
            .find(|inv| inv.id == id)
            .ok_or_else(|| ApiError::NotFound("Invoice not found".to_string()))?;
        update.apply_to(invoice);
        Ok(invoice.clone())
    }

    async fn delete(&self, id: InvoiceId) -> Result<(), ApiError> {
        let mut invoices = self.invoices.write().unwrap();
        let before = invoices.len();
        invoices.retain(|inv| inv.id != id);
        if invoices.len() == before {
            return Err(ApiError::NotFound("Invoice not found".to_string()));
        }
        Ok(())
    }

    async fn senders(&self) -> Result<Vec<SenderSummary>, ApiError> {
        let invoices = self.invoices.read().unwrap();
        let mut senders: Vec<SenderSummary> = Vec::new();
        for invoice in invoices.iter() {
            if !senders.iter().any(|s| s.sender_email == invoice.sender_email) {
                senders.push(SenderSummary {
                    sender_email: invoice.sender_email.clone(),
                    sender_name: invoice.sender_name.clone(),
                });
            }
        }
        Ok(senders)
    }

    fn export_url(&self, options: &ExportOptions) -> String {
        let query: Vec<String> = options
            .to_query()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        format!("memory://export/zip?{}", query.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_invoice_received;

    #[tokio::test]
    async fn list_applies_date_range() {
        let api = InMemoryInvoiceApi::new().with_invoices(vec![
            test_invoice_received(1, "a@shop.com", "2024-12-31T23:00:00"),
            test_invoice_received(2, "a@shop.com", "2025-01-01T08:00:00"),
            test_invoice_received(3, "a@shop.com", "2026-01-01T08:00:00"),
        ]);

        let invoices = api.list(&InvoiceFilters::year(2025)).await.unwrap();

        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0].id, InvoiceId(2));
    }

    #[tokio::test]
    async fn senders_are_distinct() {
        let api = InMemoryInvoiceApi::new().with_invoices(vec![
            test_invoice_received(1, "a@shop.com", "2025-01-01"),
            test_invoice_received(2, "a@shop.com", "2025-01-02"),
            test_invoice_received(3, "b@shop.com", "2025-01-03"),
        ]);
        assert_eq!(api.senders().await.unwrap().len(), 2);
    }
}
