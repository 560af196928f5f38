//! Server round trips of a language switch: persisting the session language
//! and fetching the translated string table.

use crate::error::SwitchError;
use crate::i18n::{LanguageCode, TranslationMap};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::error;

/// Path of the session language endpoint.
pub const SESSION_CHANGE_PATH: &str = "/language/change";

/// Path of the string-table endpoint.
pub const STRINGS_PATH: &str = "/api/i18n/strings";

/// Request body of `POST /language/change`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChangeLanguageRequest {
    pub language: LanguageCode,
}

/// Response body of `GET /api/i18n/strings`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StringsResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub strings: TranslationMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The two server calls a switch makes.
pub trait LanguageBackend: Send + Sync {
    /// Persist `language` as the session language. Fails on transport errors
    /// and non-2xx statuses.
    fn change_session_language(
        &self,
        language: &LanguageCode,
    ) -> impl Future<Output = Result<(), SwitchError>> + Send;

    /// Fetch the string table for `language`. Fails when the request or the
    /// body parse fails, or when the body's `success` flag is false.
    fn fetch_strings(
        &self,
        language: &LanguageCode,
    ) -> impl Future<Output = Result<TranslationMap, SwitchError>> + Send;
}

/// `LanguageBackend` over HTTP.
///
/// No request timeout is set: a hung server stalls only the switch waiting on it.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl LanguageBackend for HttpBackend {
    async fn change_session_language(&self, language: &LanguageCode) -> Result<(), SwitchError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, SESSION_CHANGE_PATH))
            .json(&ChangeLanguageRequest {
                language: language.clone(),
            })
            .send()
            .await
            .map_err(|source| SwitchError::Transport {
                endpoint: SESSION_CHANGE_PATH,
                source,
            })?;

        if !response.status().is_success() {
            return Err(SwitchError::SessionRejected {
                status: response.status().as_u16(),
            });
        }

        Ok(())
    }

    async fn fetch_strings(&self, language: &LanguageCode) -> Result<TranslationMap, SwitchError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, STRINGS_PATH))
            .query(&[("language", language.as_str())])
            .send()
            .await
            .map_err(|source| SwitchError::Transport {
                endpoint: STRINGS_PATH,
                source,
            })?;

        // Only the body's success flag matters, not the HTTP status
        let body: StringsResponse = response
            .json()
            .await
            .map_err(|e| SwitchError::MalformedResponse {
                endpoint: STRINGS_PATH,
                reason: e.to_string(),
            })?;

        if !body.success {
            return Err(SwitchError::StringsUnavailable {
                language: language.to_string(),
            });
        }

        Ok(body.strings)
    }
}

/// Fetch the string table for `language`, degrading every failure to an empty
/// map. The failure is logged and otherwise swallowed.
pub async fn load_translations<B: LanguageBackend>(
    backend: &B,
    language: &LanguageCode,
) -> TranslationMap {
    match backend.fetch_strings(language).await {
        Ok(strings) => strings,
        Err(e) => {
            error!("Error loading translations for '{}': {}", language, e);
            TranslationMap::new()
        }
    }
}
