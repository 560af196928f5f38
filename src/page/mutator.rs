use super::document::Document;
use super::scanner::I18N_KEY_ATTRIBUTE;
use crate::i18n::TranslationMap;
use tracing::debug;

/// Rewrite every marked element whose key is in `translations`.
///
/// The document is queried afresh, so elements added since any earlier scan
/// are included. Elements whose key is missing from the map keep their text.
/// Returns the number of elements rewritten.
pub fn apply_translations(document: &dyn Document, translations: &TranslationMap) -> usize {
    let mut updated = 0;

    for element in document.query_by_attribute(I18N_KEY_ATTRIBUTE) {
        let Some(key) = document.attribute(element, I18N_KEY_ATTRIBUTE) else {
            continue;
        };

        if let Some(text) = translations.get(&key) {
            document.set_text_content(element, text);
            updated += 1;
        }
    }

    debug!(
        "Applied {} translated strings to {} elements",
        translations.len(),
        updated
    );
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Document, InMemoryDocument};
    use proptest::prelude::*;

    fn map(pairs: &[(&str, &str)]) -> TranslationMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_rewrites_only_mapped_keys() {
        let doc = InMemoryDocument::new();
        let heading = doc.append("h1", &[(I18N_KEY_ATTRIBUTE, "welcome_msg")], "Welcome");
        let footer = doc.append("p", &[(I18N_KEY_ATTRIBUTE, "footer")], "Footer");
        let plain = doc.append("p", &[], "Untouched");

        let updated = apply_translations(&doc, &map(&[("welcome_msg", "स्वागत है")]));

        assert_eq!(updated, 1);
        assert_eq!(doc.text_content(heading).as_deref(), Some("स्वागत है"));
        assert_eq!(doc.text_content(footer).as_deref(), Some("Footer"));
        assert_eq!(doc.text_content(plain).as_deref(), Some("Untouched"));
    }

    #[test]
    fn test_empty_map_is_noop() {
        let doc = InMemoryDocument::new();
        let heading = doc.append("h1", &[(I18N_KEY_ATTRIBUTE, "welcome_msg")], "Welcome");

        assert_eq!(apply_translations(&doc, &TranslationMap::new()), 0);
        assert_eq!(doc.text_content(heading).as_deref(), Some("Welcome"));
    }

    #[test]
    fn test_duplicate_keys_all_rewritten() {
        let doc = InMemoryDocument::new();
        let top = doc.append("a", &[(I18N_KEY_ATTRIBUTE, "nav.home")], "Home");
        let bottom = doc.append("a", &[(I18N_KEY_ATTRIBUTE, "nav.home")], "Home");

        assert_eq!(apply_translations(&doc, &map(&[("nav.home", "मुखपृष्ठ")])), 2);
        assert_eq!(doc.text_content(top).as_deref(), Some("मुखपृष्ठ"));
        assert_eq!(doc.text_content(bottom).as_deref(), Some("मुखपृष्ठ"));
    }

    #[test]
    fn test_empty_translation_value_is_applied() {
        let doc = InMemoryDocument::new();
        let badge = doc.append("span", &[(I18N_KEY_ATTRIBUTE, "badge")], "New");

        assert_eq!(apply_translations(&doc, &map(&[("badge", "")])), 1);
        assert_eq!(doc.text_content(badge).as_deref(), Some(""));
    }

    proptest! {
        #[test]
        fn prop_mapped_keys_show_value_others_unchanged(
            keys in proptest::collection::vec("[a-z]{1,4}", 0..12),
            translations in proptest::collection::hash_map("[a-z]{1,4}", "\\PC{0,8}", 0..12),
        ) {
            let doc = InMemoryDocument::new();
            let elements: Vec<_> = keys
                .iter()
                .map(|key| {
                    let original = format!("original {}", key);
                    (doc.append("span", &[(I18N_KEY_ATTRIBUTE, key.as_str())], &original), key, original)
                })
                .collect();

            let updated = apply_translations(&doc, &translations);

            let expected_updates = keys.iter().filter(|key| translations.contains_key(*key)).count();
            prop_assert_eq!(updated, expected_updates);

            for (element, key, original) in elements {
                let text = doc.text_content(element).unwrap_or_default();
                match translations.get(key) {
                    Some(value) => prop_assert_eq!(&text, value),
                    None => prop_assert_eq!(&text, &original),
                }
            }
        }
    }
}
