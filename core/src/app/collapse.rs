//! Expand/collapse state for sender groups
//!
//! Keyed purely by domain string, so it survives regrouping caused by new
//! data, a different search or a different sort order.

use std::collections::BTreeSet;

/// Set of collapsed domain keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapsedGroups {
    collapsed: BTreeSet<String>,
    /// Every domain ever merged; decides whether a domain is new
    seen: BTreeSet<String>,
}

impl CollapsedGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union newly seen domains into the collapsed set.
    ///
    /// Domains seen before keep whatever state they have. Returns the number of
    /// domains that were added.
    pub fn merge<I, S>(&mut self, domains: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for domain in domains {
            let domain = domain.as_ref();
            if self.seen.insert(domain.to_string()) {
                self.collapsed.insert(domain.to_string());
                added += 1;
            }
        }
        added
    }

    /// Flip a domain between collapsed and expanded. Returns the new collapsed state.
    pub fn toggle(&mut self, domain: &str) -> bool {
        self.seen.insert(domain.to_string());
        if self.collapsed.remove(domain) {
            false
        } else {
            self.collapsed.insert(domain.to_string());
            true
        }
    }

    pub fn is_collapsed(&self, domain: &str) -> bool {
        self.collapsed.contains(domain)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.collapsed.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.collapsed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collapsed.is_empty()
    }
}
