//! Invoice list view state
//!
//! Owns everything the grouped invoice list needs between renders: the loaded
//! invoices, the backend filters they were loaded with, the free-text search,
//! the sort order and the collapsed groups. Groups themselves are never
//! stored; they are recomputed from these inputs on demand.

use crate::domain::entities::{Invoice, InvoiceFilters, InvoiceId};

use super::collapse::CollapsedGroups;
use super::grouping::{group_invoices, InvoiceGroup, SortOrder};

#[derive(Debug, Clone, Default)]
pub struct InvoiceListView {
    invoices: Vec<Invoice>,
    filters: InvoiceFilters,
    search: String,
    sort_order: SortOrder,
    collapsed: CollapsedGroups,
}

impl InvoiceListView {
    pub fn new(filters: InvoiceFilters) -> Self {
        Self {
            filters,
            ..Self::default()
        }
    }

    // --- Inputs ---

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn has_invoices(&self) -> bool {
        !self.invoices.is_empty()
    }

    /// Replace the loaded invoices (after a fetch or sync)
    pub fn set_invoices(&mut self, invoices: Vec<Invoice>) {
        self.invoices = invoices;
        self.merge_collapsed();
    }

    /// Replace a single invoice in place, matched by id.
    ///
    /// Returns false if no loaded invoice has that id.
    pub fn apply_update(&mut self, updated: Invoice) -> bool {
        let Some(slot) = self.invoices.iter_mut().find(|inv| inv.id == updated.id) else {
            return false;
        };
        *slot = updated;
        self.merge_collapsed();
        true
    }

    /// Drop an invoice. Returns false if it was not loaded.
    pub fn remove(&mut self, id: InvoiceId) -> bool {
        let before = self.invoices.len();
        self.invoices.retain(|inv| inv.id != id);
        let removed = self.invoices.len() != before;
        if removed {
            self.merge_collapsed();
        }
        removed
    }

    pub fn filters(&self) -> &InvoiceFilters {
        &self.filters
    }

    /// Set the backend filters. The caller refetches with them.
    pub fn set_filters(&mut self, filters: InvoiceFilters) {
        self.filters = filters;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        self.merge_collapsed();
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
        self.merge_collapsed();
    }

    // --- Derived ---

    /// Current groups in display order
    pub fn groups(&self) -> Vec<InvoiceGroup<'_>> {
        group_invoices(&self.invoices, &self.search, self.sort_order)
    }

    /// Look up a loaded invoice
    pub fn invoice(&self, id: InvoiceId) -> Option<&Invoice> {
        self.invoices.iter().find(|inv| inv.id == id)
    }

    // --- Collapse state ---

    pub fn is_collapsed(&self, domain: &str) -> bool {
        self.collapsed.is_collapsed(domain)
    }

    /// Flip a group between collapsed and expanded. Returns the new collapsed state.
    pub fn toggle(&mut self, domain: &str) -> bool {
        self.collapsed.toggle(domain)
    }

    pub fn collapsed(&self) -> &CollapsedGroups {
        &self.collapsed
    }

    fn merge_collapsed(&mut self) {
        let domains: Vec<String> = self.groups().into_iter().map(|g| g.domain).collect();
        let added = self.collapsed.merge(&domains);
        if added > 0 {
            tracing::debug!("{} new sender group(s), collapsed by default", added);
        }
    }
}
