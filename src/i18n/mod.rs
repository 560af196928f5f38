//! Internationalization (i18n) building blocks shared by the page switcher and
//! the companion server.
//!
//! # Architecture
//!
//! - `registry`: the languages with known display names
//! - `language`: `LanguageCode`, the unvalidated code carried through a switch
//! - `strings`: translation maps and the server's on-disk string catalog
//!
//! # Example
//!
//! ```rust
//! use live_language_switch::i18n::LanguageCode;
//!
//! let hindi = LanguageCode::from("hi");
//! assert_eq!(hindi.display_name(), "Hindi");
//! assert_eq!(LanguageCode::from("xx").display_name(), "xx");
//! ```

mod language;
mod registry;
mod strings;

pub use language::LanguageCode;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::{StringCatalog, TranslationMap};
