use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub strings_dir: String,

    // Client
    pub base_url: String,
    pub initial_language: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {}", value))?,
            Err(_) => 8080,
        };

        Ok(Self {
            port,
            strings_dir: std::env::var("STRINGS_DIR").unwrap_or_else(|_| "locales".to_string()),

            // Defaults to the companion server on this machine
            base_url: std::env::var("SWITCHER_BASE_URL")
                .unwrap_or_else(|_| format!("http://127.0.0.1:{}", port)),
            initial_language: std::env::var("INITIAL_LANGUAGE")
                .ok()
                .filter(|v| !v.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = ["PORT", "STRINGS_DIR", "SWITCHER_BASE_URL", "INITIAL_LANGUAGE"];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();

        let config = Config::from_env().expect("Should load defaults");

        assert_eq!(config.port, 8080);
        assert_eq!(config.strings_dir, "locales");
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.initial_language, None);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("PORT", "9090");
        std::env::set_var("STRINGS_DIR", "/srv/strings");
        std::env::set_var("INITIAL_LANGUAGE", "hi");

        let config = Config::from_env().expect("Should load");
        clear_env();

        assert_eq!(config.port, 9090);
        assert_eq!(config.strings_dir, "/srv/strings");
        assert_eq!(config.base_url, "http://127.0.0.1:9090");
        assert_eq!(config.initial_language.as_deref(), Some("hi"));
    }

    #[test]
    #[serial]
    fn test_from_env_explicit_base_url() {
        clear_env();
        std::env::set_var("SWITCHER_BASE_URL", "https://example.org");

        let config = Config::from_env().expect("Should load");
        clear_env();

        assert_eq!(config.base_url, "https://example.org");
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_port() {
        clear_env();
        std::env::set_var("PORT", "eighty");

        let result = Config::from_env();
        clear_env();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("PORT is not a valid port number"));
    }
}
