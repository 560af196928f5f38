//! Translated string tables served to the page.
//!
//! A catalog holds one flat key → text table per language. On disk each table
//! is a `<code>.json` file containing a single JSON object of strings.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Mapping from translation key to translated text for one language.
pub type TranslationMap = HashMap<String, String>;

/// All string tables known to the server, keyed by language code.
#[derive(Debug, Clone, Default)]
pub struct StringCatalog {
    tables: HashMap<String, TranslationMap>,
}

impl StringCatalog {
    pub fn new(tables: HashMap<String, TranslationMap>) -> Self {
        Self { tables }
    }

    /// Load every `*.json` file in `dir`; the file stem is the language code.
    ///
    /// Files with other extensions are skipped. A JSON file that is not a flat
    /// object of strings fails the whole load.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut tables = HashMap::new();

        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read strings directory {}", dir.display()))?;

        for entry in entries {
            let path = entry
                .with_context(|| format!("Failed to list {}", dir.display()))?
                .path();

            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                debug!("Skipping non-JSON file {}", path.display());
                continue;
            }

            let Some(code) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let table: TranslationMap = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid string table in {}", path.display()))?;

            info!("Loaded {} strings for '{}'", table.len(), code);
            tables.insert(code.to_string(), table);
        }

        Ok(Self { tables })
    }

    /// Strings for `language`, optionally restricted to `keys`.
    ///
    /// Unknown languages yield an empty table; requested keys with no
    /// translation are simply absent from the result.
    pub fn strings_for(&self, language: &str, keys: Option<&[String]>) -> TranslationMap {
        let Some(table) = self.tables.get(language) else {
            return TranslationMap::new();
        };

        match keys {
            Some(keys) => keys
                .iter()
                .filter_map(|key| table.get(key).map(|text| (key.clone(), text.clone())))
                .collect(),
            None => table.clone(),
        }
    }

    /// Language codes with a loaded table, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut codes: Vec<_> = self.tables.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn hindi_catalog() -> StringCatalog {
        let table: TranslationMap = [
            ("welcome_msg", "स्वागत है"),
            ("nav.scan", "कचरा स्कैन करें"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        StringCatalog::new(HashMap::from([("hi".to_string(), table)]))
    }

    #[test]
    fn test_strings_for_known_language() {
        let strings = hindi_catalog().strings_for("hi", None);

        assert_eq!(strings.len(), 2);
        assert_eq!(strings["welcome_msg"], "स्वागत है");
    }

    #[test]
    fn test_strings_for_unknown_language_is_empty() {
        assert!(hindi_catalog().strings_for("fr", None).is_empty());
    }

    #[test]
    fn test_strings_for_filters_by_keys() {
        let keys = vec!["nav.scan".to_string(), "missing".to_string()];
        let strings = hindi_catalog().strings_for("hi", Some(&keys));

        assert_eq!(strings.len(), 1);
        assert_eq!(strings["nav.scan"], "कचरा स्कैन करें");
    }

    #[test]
    fn test_load_dir_reads_json_tables() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("en.json"), r#"{"welcome_msg": "Welcome"}"#)
            .expect("write en");
        std::fs::write(dir.path().join("hi.json"), r#"{"welcome_msg": "स्वागत है"}"#)
            .expect("write hi");
        std::fs::write(dir.path().join("README.txt"), "not a table").expect("write readme");

        let catalog = StringCatalog::load_dir(dir.path()).expect("Should load");

        assert_eq!(catalog.languages(), vec!["en", "hi"]);
        assert_eq!(catalog.strings_for("en", None)["welcome_msg"], "Welcome");
    }

    #[test]
    fn test_load_dir_rejects_nested_values() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("en.json"), r#"{"nav": {"scan": "Scan"}}"#)
            .expect("write en");

        let err = StringCatalog::load_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid string table"));
    }

    #[test]
    fn test_load_dir_missing_directory() {
        let err = StringCatalog::load_dir("/definitely/not/here").unwrap_err();
        assert!(err.to_string().contains("Failed to read strings directory"));
    }
}
