//! Companion HTTP server for the switcher: stores the session language and
//! serves translated string tables.

use crate::backend::{StringsResponse, SESSION_CHANGE_PATH, STRINGS_PATH};
use crate::i18n::{LanguageCode, LanguageRegistry, StringCatalog};
use anyhow::{Context, Result};
use axum::{
    extract::{FromRequest, Query, Request, State},
    http::{
        header::{CONTENT_TYPE, COOKIE},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Path reading (GET) and updating (POST) the session's language preference.
pub const PREFERENCES_PATH: &str = "/api/i18n/user/preferences";

/// Cookie naming the caller's session.
pub const SESSION_COOKIE: &str = "session";

/// Session used by callers without a session cookie.
const DEFAULT_SESSION: &str = "default";

/// In-memory session id → language store.
#[derive(Debug, Default)]
pub struct SessionStore {
    languages: RwLock<HashMap<String, LanguageCode>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The session's language, or the canonical language if never set.
    pub fn language(&self, session: &str) -> LanguageCode {
        self.languages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session)
            .cloned()
            .unwrap_or_default()
    }

    pub fn set_language(&self, session: &str, language: LanguageCode) {
        self.languages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session.to_string(), language);
    }
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<StringCatalog>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(catalog: StringCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            sessions: Arc::new(SessionStore::new()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChangeLanguageBody {
    #[serde(default)]
    language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChangeLanguageResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StringsQuery {
    language: Option<String>,
    keys: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PreferencesBody {
    #[serde(default)]
    preferred_language: Option<String>,
}

/// A registry language as listed by the preferences endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSummary {
    pub code: String,
    pub name: String,
    pub native_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreferencesResponse {
    pub success: bool,
    pub preferred_language: String,
    pub native_name: String,
    pub available_languages: Vec<LanguageSummary>,
}

impl PreferencesResponse {
    fn for_language(language: &LanguageCode) -> Self {
        let available_languages = LanguageRegistry::get()
            .list_all()
            .into_iter()
            .map(|config| LanguageSummary {
                code: config.code.to_string(),
                name: config.name.to_string(),
                native_name: config.native_name.to_string(),
            })
            .collect();

        Self {
            success: true,
            preferred_language: language.to_string(),
            native_name: language.native_name().to_string(),
            available_languages,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

fn bad_request(error: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            success: false,
            error: error.to_string(),
        }),
    )
}

/// Extract the session id from the `Cookie` headers.
fn session_id(headers: &HeaderMap) -> String {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
        .unwrap_or_else(|| DEFAULT_SESSION.to_string())
}

fn is_form_encoded(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

/// Change the session language from a JSON body or a submitted form.
async fn change_language(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
) -> Result<(StatusCode, Json<ChangeLanguageResponse>), Response> {
    let body = if is_form_encoded(&headers) {
        Form::<ChangeLanguageBody>::from_request(request, &state)
            .await
            .map(|Form(body)| body)
            .map_err(IntoResponse::into_response)?
    } else {
        Json::<ChangeLanguageBody>::from_request(request, &state)
            .await
            .map(|Json(body)| body)
            .map_err(IntoResponse::into_response)?
    };
    let code = body.language.unwrap_or_else(|| "en".to_string());

    if !LanguageRegistry::get().is_supported(&code) {
        warn!("Rejected language change to '{}'", code);
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ChangeLanguageResponse {
                success: false,
                language: None,
                message: None,
                error: Some("Invalid language selection".to_string()),
            }),
        ));
    }

    let session = session_id(&headers);
    let language = LanguageCode::from(code);
    let message = format!("Language changed to {}", language.display_name());
    state.sessions.set_language(&session, language.clone());
    info!("Session '{}' language set to '{}'", session, language);

    Ok((
        StatusCode::OK,
        Json(ChangeLanguageResponse {
            success: true,
            language: Some(language.to_string()),
            message: Some(message),
            error: None,
        }),
    ))
}

async fn localized_strings(
    State(state): State<AppState>,
    Query(query): Query<StringsQuery>,
) -> Json<StringsResponse> {
    let language = query.language.unwrap_or_else(|| "en".to_string());
    let keys: Option<Vec<String>> = query.keys.map(|keys| {
        keys.split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect()
    });

    let strings = state.catalog.strings_for(&language, keys.as_deref());

    Json(StringsResponse {
        success: true,
        language: Some(language),
        strings,
        error: None,
    })
}

async fn preferences(State(state): State<AppState>, headers: HeaderMap) -> Json<PreferencesResponse> {
    let language = state.sessions.language(&session_id(&headers));
    Json(PreferencesResponse::for_language(&language))
}

/// Update the session's preferred language. A body without
/// `preferred_language` leaves the preference unchanged.
async fn update_preferences(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<PreferencesBody>,
) -> Result<Json<PreferencesResponse>, (StatusCode, Json<ErrorResponse>)> {
    let session = session_id(&headers);

    if let Some(code) = body.preferred_language {
        if !LanguageRegistry::get().is_supported(&code) {
            warn!("Rejected preferred language '{}'", code);
            return Err(bad_request("Invalid language selection"));
        }
        state.sessions.set_language(&session, LanguageCode::from(code));
    }

    let language = state.sessions.language(&session);
    info!("Session '{}' preferred language is '{}'", session, language);
    Ok(Json(PreferencesResponse::for_language(&language)))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(SESSION_CHANGE_PATH, post(change_language))
        .route(STRINGS_PATH, get(localized_strings))
        .route(PREFERENCES_PATH, get(preferences).post(update_preferences))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the switcher endpoints on `listener` until the server stops.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> Result<()> {
    let addr = listener.local_addr().context("Listener has no local address")?;
    info!("Language switch server listening on {}", addr);

    axum::serve(listener, router(state))
        .await
        .context("Language switch server failed")
}
