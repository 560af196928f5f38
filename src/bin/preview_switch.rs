//! Preview switch binary - runs one live language switch against a server
//! on a headless page and prints the rewritten markup
//!
//! Usage:
//!   cargo run --bin preview -- hi welcome_msg=Welcome footer="Thanks for visiting"
//!
//! The first argument is the target language; every following `key=text`
//! argument becomes an element marked with that translation key.
//!
//! Optional environment variables:
//! - SWITCHER_BASE_URL (defaults to http://127.0.0.1:<PORT>)
//! - PORT (defaults to 8080)
//! - INITIAL_LANGUAGE (defaults to en)

use anyhow::{bail, Result};
use live_language_switch::{
    config::Config,
    page::{
        Document, HeadlessToast, InMemoryDocument, Page, PageReloader, I18N_KEY_ATTRIBUTE,
        TOAST_ELEMENT_ID,
    },
    HttpBackend, LanguageSwitcher, UpdateOutcome,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Reloading a headless page means nothing; report it instead
struct LoggingReloader;

impl PageReloader for LoggingReloader {
    fn reload(&self) {
        warn!("Page reload requested (headless preview, nothing to reload)");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("live_language_switch=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((language, elements)) = args.split_first() else {
        bail!("Usage: preview <language> [key=text ...]");
    };

    let config = Config::from_env()?;

    let document = Arc::new(InMemoryDocument::new());
    let mut marked = Vec::new();
    for element in elements {
        let Some((key, text)) = element.split_once('=') else {
            bail!("Expected key=text, got '{}'", element);
        };
        marked.push(document.append("span", &[(I18N_KEY_ATTRIBUTE, key)], text));
    }

    let page = Page::new(
        document.clone(),
        Arc::new(HeadlessToast::new()),
        Arc::new(LoggingReloader),
    );
    let initial = config.initial_language.clone().unwrap_or_else(|| "en".to_string());
    let switcher = LanguageSwitcher::new(HttpBackend::new(&config.base_url), page, initial.into());

    info!("Switching to '{}' via {}", language, config.base_url);
    let outcome = switcher.change_language_live(language.as_str()).await;

    println!("\n{}", "=".repeat(60));
    for element in &marked {
        if let Some(html) = document.outer_html(*element) {
            println!("{}", html);
        }
    }
    if let Some(toast) = document
        .element_by_id(TOAST_ELEMENT_ID)
        .and_then(|toast| document.outer_html(toast))
    {
        println!("\n{}", toast);
    }
    println!("{}", "=".repeat(60));

    match outcome {
        UpdateOutcome::Applied {
            language,
            elements_updated,
        } => println!("Applied '{}': {} elements updated", language, elements_updated),
        UpdateOutcome::Reloaded { language } => {
            println!("Switch to '{}' failed; the page would reload", language)
        }
    }

    Ok(())
}
