//! ZIP export request
//!
//! The client only builds the export link; downloading is left to the caller.

use serde::{Deserialize, Serialize};

use super::invoice::InvoiceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub year: i32,
    pub month: Option<u32>,
    #[serde(rename = "type")]
    pub kind: InvoiceKind,
}

impl ExportOptions {
    pub fn validate(&self) -> Result<(), String> {
        if !(1970..=9999).contains(&self.year) {
            return Err(format!("Invalid export year: {}", self.year));
        }
        match self.month {
            Some(month) if !(1..=12).contains(&month) => {
                Err(format!("Invalid export month: {}", month))
            }
            _ => Ok(()),
        }
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("year", self.year.to_string()),
            ("type", self.kind.to_string()),
        ];
        if let Some(month) = self.month {
            params.push(("month", month.to_string()));
        }
        params
    }
}
