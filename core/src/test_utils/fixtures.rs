//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use crate::domain::entities::{AccountInfo, Category, Invoice, InvoiceId};

/// Create a test invoice from a sender
pub fn test_invoice(id: i64, sender_email: &str, sender_name: Option<&str>) -> Invoice {
    test_invoice_with_subject(id, sender_email, sender_name, Some("Ihre Rechnung"))
}

/// Create a test invoice with a specific subject
pub fn test_invoice_with_subject(
    id: i64,
    sender_email: &str,
    sender_name: Option<&str>,
    subject: Option<&str>,
) -> Invoice {
    Invoice {
        id: InvoiceId(id),
        user_id: 1,
        sender_email: sender_email.to_string(),
        sender_name: sender_name.map(str::to_string),
        subject: subject.map(str::to_string),
        received_date: "2025-03-01T10:00:00".to_string(),
        file_path: None,
        file_url: None,
        category: Category::Other,
        is_private: false,
        created_at: "2025-03-01T10:05:00".to_string(),
    }
}

/// Create a test invoice received on a specific date
pub fn test_invoice_received(id: i64, sender_email: &str, received_date: &str) -> Invoice {
    Invoice {
        received_date: received_date.to_string(),
        ..test_invoice(id, sender_email, None)
    }
}

/// Create a connected mailbox
pub fn test_account(id: i64, email: &str) -> AccountInfo {
    AccountInfo {
        id,
        email: email.to_string(),
        imap_server: "imap.gmail.com".to_string(),
        imap_port: 993,
        created_at: Some("2025-01-01T00:00:00".to_string()),
    }
}
