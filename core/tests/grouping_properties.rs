//! Property tests for sender grouping.

use std::collections::HashSet;

use invoice_desk_core::domain::entities::{Category, Invoice, InvoiceId};
use invoice_desk_core::{extract_domain, group_invoices, CollapsedGroups, SortOrder};
use proptest::prelude::*;

fn invoice(id: i64, sender_email: String, sender_name: Option<String>) -> Invoice {
    Invoice {
        id: InvoiceId(id),
        user_id: 1,
        sender_email,
        sender_name,
        subject: None,
        received_date: "2025-01-01T00:00:00".to_string(),
        file_path: None,
        file_url: None,
        category: Category::Other,
        is_private: false,
        created_at: "2025-01-01T00:00:00".to_string(),
    }
}

fn sender_strategy() -> impl Strategy<Value = (String, Option<String>)> {
    let local = "[a-z]{1,6}";
    let host = prop_oneof![
        Just("wmf.de".to_string()),
        Just("mail.wmf.de".to_string()),
        Just("www.example.com".to_string()),
        Just("shop.co.uk".to_string()),
        Just("a.b.example.co.uk".to_string()),
        "[a-z]{1,5}\\.[a-z]{2,3}",
    ];
    let name = proptest::option::of(prop_oneof![
        Just("Shop".to_string()),
        Just("WMF".to_string()),
        Just("Ärzte".to_string()),
        Just(String::new()),
        "[A-Za-z ]{1,8}",
    ]);
    (local, host, name).prop_map(|(local, host, name)| (format!("{}@{}", local, host), name))
}

fn invoices_strategy() -> impl Strategy<Value = Vec<Invoice>> {
    proptest::collection::vec(sender_strategy(), 0..40).prop_map(|senders| {
        senders
            .into_iter()
            .enumerate()
            .map(|(i, (email, name))| invoice(i as i64, email, name))
            .collect()
    })
}

proptest! {
    #[test]
    fn groups_partition_the_input(invoices in invoices_strategy()) {
        let groups = group_invoices(&invoices, "", SortOrder::Ascending);

        let mut seen = Vec::new();
        for group in &groups {
            prop_assert!(!group.is_empty());
            for member in &group.members {
                prop_assert_eq!(extract_domain(&member.sender_email), group.domain.clone());
                seen.push(member.id);
            }
        }
        seen.sort();
        let mut expected: Vec<InvoiceId> = invoices.iter().map(|i| i.id).collect();
        expected.sort();
        prop_assert_eq!(seen, expected);

        let domains: HashSet<&str> = groups.iter().map(|g| g.domain.as_str()).collect();
        prop_assert_eq!(domains.len(), groups.len());
    }

    #[test]
    fn display_name_is_a_member_label(invoices in invoices_strategy()) {
        for group in group_invoices(&invoices, "", SortOrder::Ascending) {
            prop_assert!(group
                .members
                .iter()
                .any(|m| m.sender_label() == group.display_name));
        }
    }

    #[test]
    fn sort_direction_does_not_change_groups(invoices in invoices_strategy()) {
        let mut ascending: Vec<String> = group_invoices(&invoices, "", SortOrder::Ascending)
            .into_iter()
            .map(|g| g.domain)
            .collect();
        let mut descending: Vec<String> = group_invoices(&invoices, "", SortOrder::Descending)
            .into_iter()
            .map(|g| g.domain)
            .collect();
        ascending.sort();
        descending.sort();
        prop_assert_eq!(ascending, descending);
    }

    #[test]
    fn extract_domain_is_deterministic_and_lowercase(email in "\\PC{0,30}") {
        let first = extract_domain(&email);
        prop_assert_eq!(&first, &extract_domain(&email));
        prop_assert_eq!(first.clone(), first.to_lowercase());
    }

    #[test]
    fn merge_never_collapses_expanded_domains(
        first in proptest::collection::vec("[a-c]\\.de", 1..5),
        second in proptest::collection::vec("[a-e]\\.de", 0..5),
    ) {
        let mut state = CollapsedGroups::new();
        state.merge(&first);
        let expanded = first[0].clone();
        state.toggle(&expanded);

        state.merge(&second);

        prop_assert!(!state.is_collapsed(&expanded));
        for domain in second.iter().filter(|d| !first.contains(*d)) {
            prop_assert!(state.is_collapsed(domain));
        }
    }
}
