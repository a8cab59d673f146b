//! Mailbox sync request and result

use serde::{Deserialize, Serialize};

/// Options for a backend sync run.
///
/// `year` takes precedence over `days_back` on the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncOptions {
    pub days_back: Option<u32>,
    pub year: Option<i32>,
    /// Include mails without invoice keywords or PDF attachments
    #[serde(default)]
    pub include_all: bool,
    /// Sync only this mailbox; all mailboxes when absent
    pub user_id: Option<i64>,
}

impl SyncOptions {
    pub fn last_days(days: u32) -> Self {
        Self {
            days_back: Some(days),
            ..Self::default()
        }
    }

    pub fn for_year(year: i32) -> Self {
        Self {
            year: Some(year),
            ..Self::default()
        }
    }

    /// Query parameters; zero and absent values are left out
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(days) = self.days_back.filter(|d| *d > 0) {
            params.push(("days_back", days.to_string()));
        }
        if let Some(year) = self.year {
            params.push(("year", year.to_string()));
        }
        if self.include_all {
            params.push(("include_all", "true".to_string()));
        }
        if let Some(user_id) = self.user_id {
            params.push(("user_id", user_id.to_string()));
        }
        params
    }

    /// Human-readable description of the sync range
    pub fn describe(&self) -> String {
        match (self.year, self.days_back) {
            (Some(year), _) => format!("year {}", year),
            (None, Some(days)) => format!("last {} days", days),
            (None, None) => "default range".to_string(),
        }
    }
}

/// Result of a sync run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResponse {
    pub success: bool,
    pub invoices_found: u32,
    pub message: String,
}
