use super::document::{Document, ElementRef};
use std::collections::HashMap;

/// Attribute marking an element's text for translation.
pub const I18N_KEY_ATTRIBUTE: &str = "data-i18n-key";

/// A marked element and the text it carried when scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    pub element: ElementRef,
    /// Text content at scan time, trimmed
    pub original_text: String,
}

/// A marked element together with its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedElement {
    pub key: String,
    pub entry: TranslationEntry,
}

/// Every attached element with a non-empty translation key, in document order.
pub fn scan_entries(document: &dyn Document) -> Vec<KeyedElement> {
    document
        .query_by_attribute(I18N_KEY_ATTRIBUTE)
        .into_iter()
        .filter_map(|element| {
            let key = document
                .attribute(element, I18N_KEY_ATTRIBUTE)
                .filter(|key| !key.is_empty())?;
            let original_text = document
                .text_content(element)
                .map(|text| text.trim().to_string())
                .unwrap_or_default();

            Some(KeyedElement {
                key,
                entry: TranslationEntry {
                    element,
                    original_text,
                },
            })
        })
        .collect()
}

/// Translation entries keyed by translation key.
///
/// When several elements share a key, the last one in document order wins.
pub fn scan_translations(document: &dyn Document) -> HashMap<String, TranslationEntry> {
    scan_entries(document)
        .into_iter()
        .map(|keyed| (keyed.key, keyed.entry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::InMemoryDocument;

    #[test]
    fn test_scan_records_trimmed_original_text() {
        let doc = InMemoryDocument::new();
        let heading = doc.append("h1", &[(I18N_KEY_ATTRIBUTE, "welcome_msg")], "  Welcome \n");

        let translations = scan_translations(&doc);

        assert_eq!(translations.len(), 1);
        assert_eq!(
            translations["welcome_msg"],
            TranslationEntry {
                element: heading,
                original_text: "Welcome".to_string(),
            }
        );
    }

    #[test]
    fn test_scan_empty_document() {
        let doc = InMemoryDocument::new();
        assert!(scan_translations(&doc).is_empty());
        assert!(scan_entries(&doc).is_empty());
    }

    #[test]
    fn test_scan_skips_empty_keys_and_unmarked_elements() {
        let doc = InMemoryDocument::new();
        doc.append("p", &[], "Unmarked");
        doc.append("p", &[(I18N_KEY_ATTRIBUTE, "")], "Empty key");
        doc.append("p", &[(I18N_KEY_ATTRIBUTE, "footer")], "Footer");

        let keys: Vec<_> = scan_entries(&doc).into_iter().map(|keyed| keyed.key).collect();
        assert_eq!(keys, vec!["footer"]);
    }

    #[test]
    fn test_duplicate_keys_last_element_wins() {
        let doc = InMemoryDocument::new();
        doc.append("a", &[(I18N_KEY_ATTRIBUTE, "nav.home")], "Home");
        let second = doc.append("a", &[(I18N_KEY_ATTRIBUTE, "nav.home")], "Home (footer)");

        assert_eq!(scan_entries(&doc).len(), 2);

        let translations = scan_translations(&doc);
        assert_eq!(translations.len(), 1);
        assert_eq!(translations["nav.home"].element, second);
        assert_eq!(translations["nav.home"].original_text, "Home (footer)");
    }
}
