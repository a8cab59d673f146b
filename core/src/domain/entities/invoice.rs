//! Invoice domain entity
//!
//! An invoice record as found by the backend sync. The client never creates
//! invoices; it lists, recategorizes and deletes them.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Unique identifier for an invoice (backend row id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(pub i64);

impl From<i64> for InvoiceId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Invoice category assigned by the backend categorizer (or by the user)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Digital Service")]
    DigitalService,
    #[serde(rename = "Physical Product")]
    PhysicalProduct,
    #[serde(rename = "Online Course")]
    OnlineCourse,
    #[serde(rename = "Other", other)]
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::DigitalService,
        Category::PhysicalProduct,
        Category::OnlineCourse,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::DigitalService => "Digital Service",
            Category::PhysicalProduct => "Physical Product",
            Category::OnlineCourse => "Online Course",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        match normalized.as_str() {
            "digitalservice" | "digital" => Ok(Category::DigitalService),
            "physicalproduct" | "physical" => Ok(Category::PhysicalProduct),
            "onlinecourse" | "course" => Ok(Category::OnlineCourse),
            "other" => Ok(Category::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// Business vs. private invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceKind {
    Business,
    Private,
}

impl InvoiceKind {
    pub fn is_private(&self) -> bool {
        matches!(self, InvoiceKind::Private)
    }
}

impl From<bool> for InvoiceKind {
    fn from(is_private: bool) -> Self {
        if is_private {
            InvoiceKind::Private
        } else {
            InvoiceKind::Business
        }
    }
}

impl std::fmt::Display for InvoiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceKind::Business => write!(f, "business"),
            InvoiceKind::Private => write!(f, "private"),
        }
    }
}

impl std::str::FromStr for InvoiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "business" => Ok(InvoiceKind::Business),
            "private" => Ok(InvoiceKind::Private),
            _ => Err(format!("Unknown invoice type: {}", s)),
        }
    }
}

/// An invoice record as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub user_id: i64,
    pub sender_email: String,
    pub sender_name: Option<String>,
    pub subject: Option<String>,
    /// Backend timestamp, passed through as sent
    pub received_date: String,
    pub file_path: Option<String>,
    pub file_url: Option<String>,
    pub category: Category,
    pub is_private: bool,
    pub created_at: String,
}

impl Invoice {
    /// The sender name when present and non-empty, otherwise the sender email
    pub fn sender_label(&self) -> &str {
        match self.sender_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.sender_email,
        }
    }

    pub fn kind(&self) -> InvoiceKind {
        InvoiceKind::from(self.is_private)
    }

    pub fn has_file(&self) -> bool {
        self.file_path.is_some() || self.file_url.is_some()
    }
}

/// Backend-side list filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceFilters {
    /// Exact sender email
    pub sender: Option<String>,
    pub category: Option<Category>,
    pub is_private: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl InvoiceFilters {
    /// Invoices received within the last `days` days.
    ///
    /// Windows reaching before year 1 start at 0001-01-01, the earliest date
    /// the backend accepts. The start date is never dropped: without one the
    /// backend applies its own default window.
    pub fn last_days(days: u32, today: NaiveDate) -> Self {
        let start = today
            .checked_sub_days(Days::new(days.into()))
            .filter(|start| start.year() >= 1)
            .or_else(|| NaiveDate::from_ymd_opt(1, 1, 1));
        Self {
            start_date: start,
            ..Self::default()
        }
    }

    /// Invoices received within a calendar year
    pub fn year(year: i32) -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(year, 1, 1),
            end_date: NaiveDate::from_ymd_opt(year, 12, 31),
            ..Self::default()
        }
    }

    /// Query parameters for the set filters only
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(sender) = self.sender.as_deref().filter(|s| !s.is_empty()) {
            params.push(("sender", sender.to_string()));
        }
        if let Some(category) = self.category {
            params.push(("category", category.to_string()));
        }
        if let Some(is_private) = self.is_private {
            params.push(("is_private", is_private.to_string()));
        }
        if let Some(start) = self.start_date {
            params.push(("start_date", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            params.push(("end_date", end.format("%Y-%m-%d").to_string()));
        }
        params
    }
}

/// Partial update for an invoice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InvoiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
}

impl InvoiceUpdate {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.is_private.is_none()
    }

    /// Apply this update to a local copy of an invoice
    pub fn apply_to(&self, invoice: &mut Invoice) {
        if let Some(category) = self.category {
            invoice.category = category;
        }
        if let Some(is_private) = self.is_private {
            invoice.is_private = is_private;
        }
    }
}

/// A distinct sender known to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderSummary {
    pub sender_email: String,
    pub sender_name: Option<String>,
}

impl SenderSummary {
    pub fn label(&self) -> &str {
        match self.sender_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.sender_email,
        }
    }
}
