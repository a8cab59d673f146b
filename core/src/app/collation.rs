//! German base-strength collation for group headings
//!
//! Compares strings the way a German reader expects a sorted list of sender
//! names: case and diacritics are ignored (`Ärzte` sorts with `arzte`), and
//! punctuation follows the CLDR root order (`_` before `-` before `.` before
//! `@`). Backed by the ICU4X collator with compiled `de` data.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::locale;

thread_local! {
    static GERMAN: Option<Collator> = german_collator();
}

fn german_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Primary);
    match Collator::try_new(&locale!("de").into(), options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            tracing::warn!("German collation unavailable, using code point order: {}", e);
            None
        }
    }
}

/// Compare two strings at primary strength.
///
/// Returns `Ordering::Equal` for strings that differ only in case or accents.
pub fn compare(a: &str, b: &str) -> Ordering {
    GERMAN.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
}
