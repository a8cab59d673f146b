//! Connected mailbox accounts
//!
//! Connecting a mailbox happens outside this client; it only reads the
//! resulting session state and can disconnect accounts.

use serde::{Deserialize, Serialize};

/// A connected mailbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub id: i64,
    pub email: String,
    pub imap_server: String,
    pub imap_port: u16,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Backend connection status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub connected: bool,
    #[serde(default)]
    pub email: Option<String>,
    pub message: String,
    #[serde(default)]
    pub accounts: Vec<AccountInfo>,
}

impl ConnectionStatus {
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}
