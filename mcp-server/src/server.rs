//! invoice-desk MCP server implementation
//!
//! Holds one invoice list view per server process. Listing tools render the
//! view grouped by sender domain; mutating tools go through the backend and
//! then update the view so the grouping is recomputed.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use chrono::NaiveDate;
use invoice_desk_core::domain::entities::{
    Category, ExportOptions, InvoiceFilters, InvoiceId, InvoiceKind, InvoiceUpdate, SyncOptions,
};
use invoice_desk_core::render::{
    render_accounts, render_invoice_list, render_senders, render_status, render_sync,
};
use invoice_desk_core::{Config, HttpInvoiceApi, InvoiceListView, InvoiceService, SortOrder};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{
    handler::server::tool::ToolRouter,
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct InvoiceDeskServer {
    service: Arc<InvoiceService<HttpInvoiceApi>>,
    view: Arc<Mutex<InvoiceListView>>,
    tool_router: ToolRouter<Self>,
}

impl InvoiceDeskServer {
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env()?;
        let api = HttpInvoiceApi::new(&config)?;
        tracing::info!("Using invoice backend at {}", api.base_url());

        let today = chrono::Local::now().date_naive();
        let view = InvoiceListView::new(InvoiceFilters::last_days(
            config.default_window_days,
            today,
        ));

        Ok(Self {
            service: Arc::new(InvoiceService::new(Arc::new(api))),
            view: Arc::new(Mutex::new(view)),
            tool_router: Self::tool_router(),
        })
    }
}

fn text(content: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(content)]))
}

fn error(message: String) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(message)]))
}

// --- Tool Parameter Types ---

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct InvoicesParams {
    /// Free-text search over sender name, sender email and subject
    #[serde(default)]
    pub search: Option<String>,
    /// Group order by display name: "a-z" or "z-a"
    #[serde(default)]
    pub sort: Option<String>,
    /// Refetch from the backend before rendering
    #[serde(default)]
    pub refresh: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DomainParams {
    /// Sender domain shown next to the group, e.g. "wmf.de"
    pub domain: String,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct FilterParams {
    /// Exact sender email
    #[serde(default)]
    pub sender: Option<String>,
    /// "Digital Service", "Physical Product", "Online Course" or "Other"
    #[serde(default)]
    pub category: Option<String>,
    /// true for private invoices only, false for business only
    #[serde(default)]
    pub private: Option<bool>,
    /// Calendar year; takes precedence over days and explicit dates
    #[serde(default)]
    pub year: Option<i32>,
    /// Invoices received within the last N days
    #[serde(default)]
    pub days: Option<u32>,
    /// Start date (YYYY-MM-DD)
    #[serde(default)]
    pub start_date: Option<String>,
    /// End date (YYYY-MM-DD)
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct SyncParams {
    /// Sync mails from the last N days
    #[serde(default)]
    pub days_back: Option<u32>,
    /// Sync a whole calendar year; takes precedence over days_back
    #[serde(default)]
    pub year: Option<i32>,
    /// Also scan mails without invoice keywords or PDF attachments
    #[serde(default)]
    pub include_all: Option<bool>,
    /// Only sync this mailbox account
    #[serde(default)]
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateInvoiceParams {
    /// Invoice id (the number after '#')
    pub id: i64,
    /// New category
    #[serde(default)]
    pub category: Option<String>,
    /// Mark as private (true) or business (false)
    #[serde(default)]
    pub private: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct InvoiceIdParams {
    /// Invoice id (the number after '#')
    pub id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AccountParams {
    /// Mailbox account id from `accounts`
    pub user_id: i64,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ExportParams {
    pub year: i32,
    /// Month 1-12; the whole year when absent
    #[serde(default)]
    pub month: Option<u32>,
    /// "business" or "private"
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

// --- Parameter conversion ---

fn parse_date(name: &str, value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid {}: {} (expected YYYY-MM-DD)", name, value))
}

fn filters_from(params: &FilterParams, today: NaiveDate) -> Result<InvoiceFilters, String> {
    let mut filters = if let Some(year) = params.year {
        InvoiceFilters::year(year)
    } else if let Some(days) = params.days {
        InvoiceFilters::last_days(days, today)
    } else {
        InvoiceFilters {
            start_date: params
                .start_date
                .as_deref()
                .map(|d| parse_date("start_date", d))
                .transpose()?,
            end_date: params
                .end_date
                .as_deref()
                .map(|d| parse_date("end_date", d))
                .transpose()?,
            ..InvoiceFilters::default()
        }
    };

    if let (Some(start), Some(end)) = (filters.start_date, filters.end_date) {
        if start > end {
            return Err(format!("start_date {} is after end_date {}", start, end));
        }
    }

    filters.sender = params.sender.clone().filter(|s| !s.trim().is_empty());
    filters.category = params
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()?;
    filters.is_private = params.private;
    Ok(filters)
}

/// Resolve a requested domain against the current group keys.
///
/// An exact (case-insensitive) match wins, so keys that carry whitespace stay
/// reachable; otherwise surrounding whitespace in the request is ignored.
fn find_group_domain<'a, I>(domains: I, requested: &str) -> Option<String>
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    let lowered = requested.to_lowercase();
    let trimmed = lowered.trim();
    domains
        .clone()
        .into_iter()
        .find(|d| *d == lowered)
        .or_else(|| domains.into_iter().find(|d| *d == trimmed))
        .map(str::to_string)
}

fn sync_options_from(params: &SyncParams) -> SyncOptions {
    SyncOptions {
        days_back: params.days_back,
        year: params.year,
        include_all: params.include_all.unwrap_or(false),
        user_id: params.user_id,
    }
}

fn update_from(params: &UpdateInvoiceParams) -> Result<InvoiceUpdate, String> {
    Ok(InvoiceUpdate {
        category: params
            .category
            .as_deref()
            .map(str::parse::<Category>)
            .transpose()?,
        is_private: params.private,
    })
}

fn export_options_from(params: &ExportParams) -> Result<ExportOptions, String> {
    let kind = match params.kind.as_deref() {
        Some(kind) => kind.parse::<InvoiceKind>()?,
        None => InvoiceKind::Business,
    };
    Ok(ExportOptions {
        year: params.year,
        month: params.month,
        kind,
    })
}

#[tool_router]
impl InvoiceDeskServer {
    // === Invoice list ===

    #[tool(
        description = "Show invoices grouped by sender domain. New groups start collapsed; use toggle_group to expand one. Optional search and sort (a-z / z-a). Call this first."
    )]
    async fn invoices(
        &self,
        params: Parameters<InvoicesParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let mut view = self.view.lock().await;

        if let Some(sort) = params.sort.as_deref() {
            match sort.parse::<SortOrder>() {
                Ok(order) => view.set_sort_order(order),
                Err(e) => return error(e),
            }
        }
        if let Some(search) = params.search {
            view.set_search(search);
        }

        if params.refresh.unwrap_or(false) || !view.has_invoices() {
            if let Err(e) = self.service.refresh(&mut view).await {
                return error(e.user_message());
            }
        }

        text(render_invoice_list(&view))
    }

    #[tool(description = "Expand or collapse the invoice group for a sender domain.")]
    async fn toggle_group(
        &self,
        params: Parameters<DomainParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut view = self.view.lock().await;

        let groups = view.groups();
        let Some(domain) =
            find_group_domain(groups.iter().map(|g| g.domain.as_str()), &params.0.domain)
        else {
            return error(format!(
                "No sender group '{}' in the current list. Domains are shown in backticks next to each group.",
                params.0.domain
            ));
        };
        drop(groups);

        let collapsed = view.toggle(&domain);
        tracing::debug!("Group {} collapsed: {}", domain, collapsed);
        text(render_invoice_list(&view))
    }

    #[tool(
        description = "Set backend filters (sender, category, private, year, days or start/end date) and reload the list. Omitted fields are cleared."
    )]
    async fn set_filters(
        &self,
        params: Parameters<FilterParams>,
    ) -> Result<CallToolResult, McpError> {
        let today = chrono::Local::now().date_naive();
        let filters = match filters_from(&params.0, today) {
            Ok(filters) => filters,
            Err(e) => return error(e),
        };

        let mut view = self.view.lock().await;
        view.set_filters(filters);
        match self.service.refresh(&mut view).await {
            Ok(_) => text(render_invoice_list(&view)),
            Err(e) => error(e.user_message()),
        }
    }

    #[tool(description = "Reload invoices from the backend with the current filters.")]
    async fn refresh(&self) -> Result<CallToolResult, McpError> {
        let mut view = self.view.lock().await;
        match self.service.refresh(&mut view).await {
            Ok(_) => text(render_invoice_list(&view)),
            Err(e) => error(e.user_message()),
        }
    }

    // === Backend operations ===

    #[tool(
        description = "Scan connected mailboxes for new invoices, then reload the list. Pass days_back or a year. A full-year sync can take several minutes."
    )]
    async fn sync(&self, params: Parameters<SyncParams>) -> Result<CallToolResult, McpError> {
        let options = sync_options_from(&params.0);
        let started = Instant::now();

        // The view stays unlocked while the backend scans mailboxes
        let response = match self.service.sync(&options).await {
            Ok(response) => response,
            Err(e) => return error(e.user_message()),
        };
        let mut out = render_sync(&response, started.elapsed().as_secs());

        let mut view = self.view.lock().await;
        match self.service.refresh(&mut view).await {
            Ok(_) => {
                out.push('\n');
                out.push_str(&render_invoice_list(&view));
                text(out)
            }
            Err(e) => error(format!(
                "{}\nReloading the list failed: {}",
                out,
                e.user_message()
            )),
        }
    }

    #[tool(description = "Change an invoice's category and/or mark it private or business.")]
    async fn update_invoice(
        &self,
        params: Parameters<UpdateInvoiceParams>,
    ) -> Result<CallToolResult, McpError> {
        let update = match update_from(&params.0) {
            Ok(update) => update,
            Err(e) => return error(e),
        };
        let id = InvoiceId(params.0.id);

        let mut view = self.view.lock().await;
        match self.service.update(id, &update, &mut view).await {
            Ok(invoice) => text(format!(
                "Updated invoice #{}: {} | {}\n\n{}",
                invoice.id,
                invoice.category,
                invoice.kind(),
                render_invoice_list(&view)
            )),
            Err(e) => error(e.user_message()),
        }
    }

    #[tool(description = "Delete an invoice and its stored file.")]
    async fn delete_invoice(
        &self,
        params: Parameters<InvoiceIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let id = InvoiceId(params.0.id);
        let mut view = self.view.lock().await;
        match self.service.delete(id, &mut view).await {
            Ok(()) => text(format!(
                "Deleted invoice #{}\n\n{}",
                id,
                render_invoice_list(&view)
            )),
            Err(e) => error(e.user_message()),
        }
    }

    #[tool(description = "List every distinct sender the backend has invoices from.")]
    async fn senders(&self) -> Result<CallToolResult, McpError> {
        match self.service.senders().await {
            Ok(senders) => text(render_senders(&senders)),
            Err(e) => error(e.user_message()),
        }
    }

    // === Mailboxes ===

    #[tool(description = "Check whether the backend is reachable and which mailboxes are connected.")]
    async fn connection_status(&self) -> Result<CallToolResult, McpError> {
        match self.service.status().await {
            Ok(status) => text(render_status(&status)),
            Err(e) => error(e.user_message()),
        }
    }

    #[tool(description = "List connected mailbox accounts.")]
    async fn accounts(&self) -> Result<CallToolResult, McpError> {
        match self.service.accounts().await {
            Ok(accounts) => text(render_accounts(&accounts)),
            Err(e) => error(e.user_message()),
        }
    }

    #[tool(description = "Disconnect a mailbox account. Its invoices are removed by the backend.")]
    async fn remove_account(
        &self,
        params: Parameters<AccountParams>,
    ) -> Result<CallToolResult, McpError> {
        let user_id = params.0.user_id;
        if let Err(e) = self.service.remove_account(user_id).await {
            return error(e.user_message());
        }

        let mut view = self.view.lock().await;
        match self.service.refresh(&mut view).await {
            Ok(_) => text(format!(
                "Removed mailbox account {}\n\n{}",
                user_id,
                render_invoice_list(&view)
            )),
            Err(e) => error(e.user_message()),
        }
    }

    // === Export ===

    #[tool(description = "Get the download link for a ZIP export of a year or month, business or private.")]
    async fn export_link(
        &self,
        params: Parameters<ExportParams>,
    ) -> Result<CallToolResult, McpError> {
        let options = match export_options_from(&params.0) {
            Ok(options) => options,
            Err(e) => return error(e),
        };
        match self.service.export_url(&options) {
            Ok(url) => text(format!("Export link: {}\n", url)),
            Err(e) => error(e.user_message()),
        }
    }
}

#[tool_handler]
impl ServerHandler for InvoiceDeskServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "invoice-desk".into(),
                title: Some("Invoice Desk MCP Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                r#"Invoice Desk - invoices collected from your mailboxes

WORKFLOW:
1. 'connection_status' - Check the backend and connected mailboxes
2. 'invoices' - See invoices grouped by sender domain (groups start collapsed)
3. 'toggle_group' - Expand a group by its domain, e.g. "wmf.de"
4. 'sync' - Fetch new invoices from the mailboxes
5. 'update_invoice' / 'delete_invoice' - Fix categories or remove invoices
6. 'export_link' - Get a ZIP download link for a year or month

Groups you expanded stay expanded across refreshes, searches and syncs."#
                    .into(),
            ),
        }
    }
}
