//! Language code type.
//!
//! Unlike the server's accepted set, a `LanguageCode` is never validated: any
//! string the page or a caller supplies is passed through to the server, which
//! has the final say.

use crate::i18n::LanguageRegistry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A short language identifier such as "en" or "hi".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// English display name from the registry, or the raw code when the
    /// registry does not know it.
    pub fn display_name(&self) -> &str {
        LanguageRegistry::get()
            .get_by_code(&self.0)
            .map(|config| config.name)
            .unwrap_or(self.0.as_str())
    }

    /// Name of the language in its own script, or the raw code when the
    /// registry does not know it.
    pub fn native_name(&self) -> &str {
        LanguageRegistry::get()
            .get_by_code(&self.0)
            .map(|config| config.native_name)
            .unwrap_or(self.0.as_str())
    }
}

impl Default for LanguageCode {
    /// The canonical language ("en").
    fn default() -> Self {
        Self::new(LanguageRegistry::get().canonical().code)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl PartialEq<str> for LanguageCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LanguageCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_english() {
        assert_eq!(LanguageCode::default(), "en");
    }

    #[test]
    fn test_display_name_known_code() {
        assert_eq!(LanguageCode::from("hi").display_name(), "Hindi");
        assert_eq!(LanguageCode::from("bn").display_name(), "Bengali");
    }

    #[test]
    fn test_display_name_unknown_code_is_verbatim() {
        assert_eq!(LanguageCode::from("fr").display_name(), "fr");
        assert_eq!(LanguageCode::from("").display_name(), "");
    }

    #[test]
    fn test_native_name() {
        assert_eq!(LanguageCode::from("ta").native_name(), "தமிழ்");
        assert_eq!(LanguageCode::from("fr").native_name(), "fr");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&LanguageCode::from("kn")).expect("Should serialize");
        assert_eq!(json, "\"kn\"");

        let code: LanguageCode = serde_json::from_str("\"ta\"").expect("Should deserialize");
        assert_eq!(code, "ta");
    }

    #[test]
    fn test_display_formats_code() {
        assert_eq!(LanguageCode::from("mr").to_string(), "mr");
    }
}
