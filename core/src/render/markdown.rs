//! Markdown renderer
//!
//! Renders the grouped invoice list and backend results to LLM-readable markdown.

use crate::app::{InvoiceGroup, InvoiceListView};
use crate::domain::entities::{
    AccountInfo, ConnectionStatus, Invoice, SenderSummary, SyncResponse,
};

const COLLAPSED: &str = "▶";
const EXPANDED: &str = "▼";

/// Render the grouped invoice list.
///
/// Collapsed groups show only their heading; expanded groups list their invoices.
pub fn render_invoice_list(view: &InvoiceListView) -> String {
    let mut buf = String::new();

    buf.push_str("# Invoices\n\n");

    if !view.has_invoices() {
        buf.push_str("_No invoices found. Try syncing your mailbox to fetch invoices._\n");
        return buf;
    }

    let groups = view.groups();
    let total: usize = groups.iter().map(InvoiceGroup::len).sum();

    let mut summary = format!(
        "{} invoice(s) from {} sender(s), sorted {}",
        total,
        groups.len(),
        view.sort_order()
    );
    if !view.search().trim().is_empty() {
        summary.push_str(&format!(", search \"{}\"", view.search()));
    }
    buf.push_str(&summary);
    buf.push_str("\n\n");

    if groups.is_empty() {
        buf.push_str(&format!(
            "_No invoices match \"{}\"._\n",
            view.search()
        ));
        return buf;
    }

    for group in &groups {
        buf.push_str(&render_group(group, view.is_collapsed(&group.domain)));
    }

    buf.push_str("\n---\n\n");
    buf.push_str("Use `toggle_group` with a domain to expand or collapse it.\n");

    buf
}

fn render_group(group: &InvoiceGroup<'_>, collapsed: bool) -> String {
    let chevron = if collapsed { COLLAPSED } else { EXPANDED };
    let mut out = format!(
        "{} **{}** ({}) `{}`\n",
        chevron,
        group.display_name,
        group.len(),
        group.domain
    );

    if !collapsed {
        for invoice in &group.members {
            out.push_str(&render_invoice(invoice));
        }
        out.push('\n');
    }

    out
}

fn render_invoice(invoice: &Invoice) -> String {
    let subject = invoice.subject.as_deref().unwrap_or("(no subject)");
    let mut line = format!(
        "  - #{} {} | {} | {} | {}",
        invoice.id,
        truncate(subject, 60),
        invoice.category,
        invoice.kind(),
        received_day(&invoice.received_date),
    );

    if invoice.sender_label() != invoice.sender_email {
        line.push_str(&format!(" | {} <{}>", invoice.sender_label(), invoice.sender_email));
    } else {
        line.push_str(&format!(" | {}", invoice.sender_email));
    }

    if let Some(url) = &invoice.file_url {
        line.push_str(&format!(" | [file]({})", url));
    } else if invoice.file_path.is_some() {
        line.push_str(" | PDF stored");
    }

    format!("{}\n", line)
}

/// Render a sync result
pub fn render_sync(response: &SyncResponse, duration_secs: u64) -> String {
    let status = if response.success { "[OK]" } else { "[FAILED]" };
    format!(
        "{} {} (took {}s)\n\nNew invoices: {}\n",
        status, response.message, duration_secs, response.invoices_found
    )
}

/// Render the distinct sender list
pub fn render_senders(senders: &[SenderSummary]) -> String {
    if senders.is_empty() {
        return "_No senders yet._\n".to_string();
    }

    let mut buf = String::from("# Senders\n\n");
    for sender in senders {
        if sender.label() == sender.sender_email {
            buf.push_str(&format!("- {}\n", sender.sender_email));
        } else {
            buf.push_str(&format!("- {} <{}>\n", sender.label(), sender.sender_email));
        }
    }
    buf
}

/// Render connection status with mailbox list
pub fn render_status(status: &ConnectionStatus) -> String {
    let mut buf = String::new();
    if status.connected {
        buf.push_str(&format!(
            "[CONNECTED] {} mailbox(es) connected\n",
            status.account_count()
        ));
    } else {
        buf.push_str("[NOT CONNECTED] ");
        buf.push_str(&status.message);
        buf.push('\n');
    }
    if !status.accounts.is_empty() {
        buf.push('\n');
        buf.push_str(&render_accounts(&status.accounts));
    }
    buf
}

/// Render connected mailboxes
pub fn render_accounts(accounts: &[AccountInfo]) -> String {
    if accounts.is_empty() {
        return "_No mailboxes connected._\n".to_string();
    }

    let mut buf = String::new();
    for account in accounts {
        buf.push_str(&format!(
            "- [{}] {} ({}:{})\n",
            account.id, account.email, account.imap_server, account.imap_port
        ));
    }
    buf
}

fn received_day(received_date: &str) -> &str {
    received_date.get(..10).unwrap_or(received_date)
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
