//! Invoice service
//!
//! Use cases over the invoice backend. Every mutation is followed by the
//! matching change to the local list so the grouping is recomputed from the
//! refreshed data.

use std::sync::Arc;

use crate::domain::entities::{
    AccountInfo, ConnectionStatus, ExportOptions, Invoice, InvoiceFilters, InvoiceId,
    InvoiceUpdate, SenderSummary, SyncOptions, SyncResponse,
};
use crate::domain::ports::InvoiceApi;
use crate::error::AppError;

use super::invoice_list::InvoiceListView;

/// Service for loading and mutating invoices
pub struct InvoiceService<A>
where
    A: InvoiceApi,
{
    api: Arc<A>,
}

impl<A> InvoiceService<A>
where
    A: InvoiceApi,
{
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    // --- Session ---

    pub async fn status(&self) -> Result<ConnectionStatus, AppError> {
        Ok(self.api.status().await?)
    }

    pub async fn accounts(&self) -> Result<Vec<AccountInfo>, AppError> {
        Ok(self.api.accounts().await?)
    }

    pub async fn remove_account(&self, user_id: i64) -> Result<(), AppError> {
        self.api.remove_account(user_id).await?;
        tracing::info!("Removed mailbox account {}", user_id);
        Ok(())
    }

    // --- Invoices ---

    pub async fn fetch(&self, filters: &InvoiceFilters) -> Result<Vec<Invoice>, AppError> {
        let invoices = self.api.list(filters).await?;
        tracing::debug!("Fetched {} invoices", invoices.len());
        Ok(invoices)
    }

    /// Reload the view's invoices using its current filters
    pub async fn refresh(&self, view: &mut InvoiceListView) -> Result<usize, AppError> {
        let invoices = self.fetch(view.filters()).await?;
        let count = invoices.len();
        view.set_invoices(invoices);
        Ok(count)
    }

    /// Run a backend sync. Callers refresh their view afterwards; the sync can
    /// run for minutes, so it does not hold on to any view.
    pub async fn sync(&self, options: &SyncOptions) -> Result<SyncResponse, AppError> {
        tracing::info!("Starting sync ({})", options.describe());
        let response = self.api.sync(options).await.map_err(|e| {
            tracing::warn!("Sync failed: {}", e);
            e
        })?;
        tracing::info!(
            "Sync finished: {} new invoices ({})",
            response.invoices_found,
            response.message
        );
        Ok(response)
    }

    pub async fn get(&self, id: InvoiceId) -> Result<Invoice, AppError> {
        self.api.get(id).await.map_err(|e| {
            if e.is_not_found() {
                AppError::NotFound(format!("Invoice {}", id))
            } else {
                e.into()
            }
        })
    }

    /// Update category and/or privacy, then patch the view in place
    pub async fn update(
        &self,
        id: InvoiceId,
        update: &InvoiceUpdate,
        view: &mut InvoiceListView,
    ) -> Result<Invoice, AppError> {
        if update.is_empty() {
            return Err(AppError::BadRequest(
                "Nothing to update: set a category and/or the private flag".to_string(),
            ));
        }

        let updated = self.api.update(id, update).await.map_err(|e| {
            if e.is_not_found() {
                AppError::NotFound(format!("Invoice {}", id))
            } else {
                e.into()
            }
        })?;
        tracing::info!("Updated invoice {}", id);

        if !view.apply_update(updated.clone()) {
            tracing::debug!("Updated invoice {} is not in the current list", id);
        }
        Ok(updated)
    }

    /// Delete an invoice, then drop it from the view
    pub async fn delete(&self, id: InvoiceId, view: &mut InvoiceListView) -> Result<(), AppError> {
        self.api.delete(id).await.map_err(|e| {
            if e.is_not_found() {
                AppError::NotFound(format!("Invoice {}", id))
            } else {
                e.into()
            }
        })?;
        tracing::info!("Deleted invoice {}", id);

        view.remove(id);
        Ok(())
    }

    pub async fn senders(&self) -> Result<Vec<SenderSummary>, AppError> {
        Ok(self.api.senders().await?)
    }

    // --- Export ---

    pub fn export_url(&self, options: &ExportOptions) -> Result<String, AppError> {
        options.validate().map_err(AppError::BadRequest)?;
        Ok(self.api.export_url(options))
    }
}
