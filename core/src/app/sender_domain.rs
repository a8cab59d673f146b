//! Sender domain extraction
//!
//! Reduces a sender email to the key of the organization that sent it:
//! `noreply@wmf.de`, `sonderaktionen@wmf.de` and `info@mail.wmf.de` all map to
//! `wmf.de`. The result is a grouping key, not a validated DNS name.

/// Public suffixes spanning two labels that keep one extra label.
///
/// Deliberately short: hosts under unlisted multi-label suffixes (`.com.sg`,
/// `.co.jp`, ...) are cut to their last two labels. Extending this list changes
/// the grouping of existing data.
pub const MULTI_LABEL_SUFFIXES: [&str; 4] = ["co.uk", "com.au", "co.za", "com.br"];

/// Extract the normalized organization domain from a sender email.
///
/// Input without an `@` (or with nothing after the last one) falls back to the
/// whole lowercased input.
pub fn extract_domain(email: &str) -> String {
    let host = match email.rsplit_once('@') {
        Some((_, host)) if !host.is_empty() => host.to_lowercase(),
        _ => return email.to_lowercase(),
    };

    let host = host.strip_prefix("www.").unwrap_or(&host);
    let labels: Vec<&str> = host.split('.').collect();

    let multi_label = MULTI_LABEL_SUFFIXES
        .iter()
        .any(|suffix| host.ends_with(&format!(".{}", suffix)));

    if multi_label && labels.len() >= 3 {
        labels[labels.len() - 3..].join(".")
    } else if labels.len() >= 2 {
        labels[labels.len() - 2..].join(".")
    } else {
        host.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_cases() {
        let cases = [
            ("noreply@wmf.de", "wmf.de"),
            ("sonderaktionen@wmf.de", "wmf.de"),
            ("user@www.example.com", "example.com"),
            ("user@mail.wmf.de", "wmf.de"),
            ("user@mail.example.co.uk", "example.co.uk"),
            ("malformed-no-at-sign", "malformed-no-at-sign"),
        ];
        for (email, expected) in cases {
            assert_eq!(extract_domain(email), expected, "for {}", email);
        }
    }

    #[test]
    fn lowercases_host() {
        assert_eq!(extract_domain("Billing@Mail.Amazon.DE"), "amazon.de");
    }

    #[test]
    fn malformed_input_is_lowercased_unchanged() {
        assert_eq!(extract_domain("Not An Email"), "not an email");
        assert_eq!(extract_domain("trailing@"), "trailing@");
        assert_eq!(extract_domain(""), "");
    }

    #[test]
    fn uses_part_after_last_at() {
        assert_eq!(extract_domain("\"odd@name\"@shop.example.com"), "example.com");
    }

    #[test]
    fn single_label_host_is_kept() {
        assert_eq!(extract_domain("root@localhost"), "localhost");
    }

    #[test]
    fn multi_label_suffixes_keep_three_labels() {
        assert_eq!(extract_domain("a@shop.com.au"), "shop.com.au");
        assert_eq!(extract_domain("a@eu.mail.store.co.za"), "store.co.za");
        assert_eq!(extract_domain("a@www.loja.com.br"), "loja.com.br");
    }

    #[test]
    fn bare_multi_label_suffix_keeps_two_labels() {
        assert_eq!(extract_domain("a@co.uk"), "co.uk");
    }

    #[test]
    fn suffix_must_match_whole_labels() {
        // "xco.uk" is not under co.uk
        assert_eq!(extract_domain("a@mail.xco.uk"), "xco.uk");
    }

    #[test]
    fn unlisted_multi_label_suffix_is_cut_to_two_labels() {
        assert_eq!(extract_domain("a@shop.example.com.sg"), "com.sg");
    }

    #[test]
    fn www_is_only_stripped_as_prefix() {
        assert_eq!(extract_domain("a@www.shop.de"), "shop.de");
        assert_eq!(extract_domain("a@wwwshop.de"), "wwwshop.de");
        assert_eq!(extract_domain("a@mail.www.shop.de"), "shop.de");
    }

    #[test]
    fn is_deterministic() {
        let email = "Rechnung@Service.Telekom.de";
        assert_eq!(extract_domain(email), extract_domain(email));
    }
}
