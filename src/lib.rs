//! Live language switching for server-rendered pages.
//!
//! A switch persists the chosen language in the server session, fetches the
//! language's string table and rewrites every `data-i18n-key` element in
//! place. If the session cannot be updated, the page is reloaded instead.
//!
//! The browser is reached only through injected capabilities (`page::Document`,
//! `page::ToastDisplay`, `page::PageReloader`), so the whole flow runs
//! headlessly against `page::InMemoryDocument`.

pub mod backend;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod i18n;
pub mod page;
pub mod server;
pub mod switcher;

pub use backend::{HttpBackend, LanguageBackend};
pub use bootstrap::{bootstrap, PageEvent, SwitcherHandle};
pub use error::SwitchError;
pub use switcher::{LanguageSwitcher, UpdateOutcome};
