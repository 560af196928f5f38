use thiserror::Error;

/// Failures inside a language switch.
///
/// Which of these reach the page is decided by the switcher: session failures
/// trigger a reload, string-table failures degrade to an empty map.
#[derive(Debug, Error)]
pub enum SwitchError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("session language change rejected with status {status}")]
    SessionRejected { status: u16 },

    #[error("malformed response from {endpoint}: {reason}")]
    MalformedResponse {
        endpoint: &'static str,
        reason: String,
    },

    #[error("server reported no strings for '{language}'")]
    StringsUnavailable { language: String },

    #[error("toast display unavailable: {0}")]
    ToastUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let rejected = SwitchError::SessionRejected { status: 400 };
        assert_eq!(
            rejected.to_string(),
            "session language change rejected with status 400"
        );

        let unavailable = SwitchError::StringsUnavailable {
            language: "hi".to_string(),
        };
        assert_eq!(unavailable.to_string(), "server reported no strings for 'hi'");

        let toast = SwitchError::ToastUnavailable("no toast library".to_string());
        assert!(toast.to_string().contains("no toast library"));
    }
}
