//! Sender grouping
//!
//! Organizes a flat invoice list for display: text filter, group by sender
//! domain, pick a display name per group, then order the groups.
//! Everything here is a pure function of its inputs and is cheap enough to
//! re-run in full whenever the invoices, the search query or the sort order
//! change.

use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::collation;
use super::sender_domain::extract_domain;
use crate::domain::entities::Invoice;

/// Direction for ordering groups by display name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "a-z", alias = "asc")]
    Ascending,
    #[serde(rename = "z-a", alias = "desc")]
    Descending,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "a-z"),
            SortOrder::Descending => write!(f, "z-a"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a-z" | "asc" | "ascending" => Ok(SortOrder::Ascending),
            "z-a" | "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}

/// Invoices sharing a sender domain
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceGroup<'a> {
    /// Grouping key from [`extract_domain`]
    pub domain: String,
    /// Most frequent sender label among the members
    pub display_name: String,
    /// Members in input order
    pub members: Vec<&'a Invoice>,
}

impl InvoiceGroup<'_> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Keep invoices whose sender name, sender email or subject contains `query`,
/// ignoring case. A blank query keeps everything.
pub fn filter_invoices<'a>(invoices: &'a [Invoice], query: &str) -> Vec<&'a Invoice> {
    if query.trim().is_empty() {
        return invoices.iter().collect();
    }

    let query = query.to_lowercase();
    invoices
        .iter()
        .filter(|invoice| {
            let name = invoice.sender_name.as_deref().unwrap_or_default();
            let subject = invoice.subject.as_deref().unwrap_or_default();
            name.to_lowercase().contains(&query)
                || invoice.sender_email.to_lowercase().contains(&query)
                || subject.to_lowercase().contains(&query)
        })
        .collect()
}

/// Group invoices by sender domain, keyed in first-seen order.
///
/// The display name is the sender label counted most often; a later label only
/// replaces the current choice with a strictly greater count, so the label
/// seen first wins ties.
pub fn group_by_domain<'a, I>(invoices: I) -> IndexMap<String, InvoiceGroup<'a>>
where
    I: IntoIterator<Item = &'a Invoice>,
{
    let mut buckets: IndexMap<String, (Vec<&'a Invoice>, IndexMap<&'a str, usize>)> =
        IndexMap::new();

    for invoice in invoices {
        let (members, label_counts) = buckets
            .entry(extract_domain(&invoice.sender_email))
            .or_default();
        members.push(invoice);
        *label_counts.entry(invoice.sender_label()).or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .map(|(domain, (members, label_counts))| {
            let display_name = most_frequent_label(&label_counts)
                .map(str::to_string)
                .unwrap_or_else(|| domain.clone());
            let group = InvoiceGroup {
                domain: domain.clone(),
                display_name,
                members,
            };
            (domain, group)
        })
        .collect()
}

fn most_frequent_label<'a>(label_counts: &IndexMap<&'a str, usize>) -> Option<&'a str> {
    let mut best: Option<(&'a str, usize)> = None;
    for (&label, &count) in label_counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((label, count)),
        }
    }
    best.map(|(label, _)| label)
}

/// Order groups by display name with German base-strength collation.
///
/// The sort is stable: groups whose names compare equal keep their first-seen
/// order in both directions.
pub fn sort_groups<'a>(
    groups: IndexMap<String, InvoiceGroup<'a>>,
    order: SortOrder,
) -> Vec<InvoiceGroup<'a>> {
    let mut sorted: Vec<InvoiceGroup<'a>> = groups.into_values().collect();
    sorted.sort_by(|a, b| compare_groups(a, b, order));
    sorted
}

fn compare_groups(a: &InvoiceGroup<'_>, b: &InvoiceGroup<'_>, order: SortOrder) -> Ordering {
    let name_a = a.display_name.to_lowercase();
    let name_b = b.display_name.to_lowercase();
    match order {
        SortOrder::Ascending => collation::compare(&name_a, &name_b),
        SortOrder::Descending => collation::compare(&name_b, &name_a),
    }
}

/// Filter, group and order in one pass
pub fn group_invoices<'a>(
    invoices: &'a [Invoice],
    query: &str,
    order: SortOrder,
) -> Vec<InvoiceGroup<'a>> {
    sort_groups(group_by_domain(filter_invoices(invoices, query)), order)
}
