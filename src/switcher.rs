//! The language switcher: owns the page's current language and runs the
//! update flow (persist session language, load strings, rewrite the page,
//! notify).
//!
//! Overlapping updates are not sequenced. Each flow reads and writes the
//! shared state in short critical sections, so whichever flow finishes last
//! decides both the visible text and the current language. Every flow is
//! tagged with an update id in the logs to make that interleaving visible.

use crate::backend::{load_translations, LanguageBackend};
use crate::i18n::LanguageCode;
use crate::page::{
    apply_translations, scan_entries, show_language_change_message, KeyedElement, Page,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, error, info};

/// How an update flow ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The server accepted the language, the page was rewritten in place and
    /// the confirmation toast was shown.
    Applied {
        language: LanguageCode,
        elements_updated: usize,
    },
    /// The flow failed and the page was reloaded instead.
    ///
    /// A rejected session change leaves the current language untouched. A
    /// toast failure happens after the language has already advanced.
    Reloaded { language: LanguageCode },
}

impl UpdateOutcome {
    pub fn language(&self) -> &LanguageCode {
        match self {
            UpdateOutcome::Applied { language, .. } | UpdateOutcome::Reloaded { language } => {
                language
            }
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, UpdateOutcome::Applied { .. })
    }
}

/// Page-session controller for live language changes.
pub struct LanguageSwitcher<B> {
    backend: B,
    page: Page,
    current: RwLock<LanguageCode>,
    originals: Vec<KeyedElement>,
    next_update_id: AtomicU64,
}

impl<B: LanguageBackend> LanguageSwitcher<B> {
    /// Create a switcher for `page`, snapshotting the original text of every
    /// marked element for `revert_to_original`.
    pub fn new(backend: B, page: Page, initial_language: LanguageCode) -> Self {
        let originals = scan_entries(page.document.as_ref());
        debug!(
            "Scanned {} translatable elements, current language '{}'",
            originals.len(),
            initial_language
        );

        Self {
            backend,
            page,
            current: RwLock::new(initial_language),
            originals,
            next_update_id: AtomicU64::new(1),
        }
    }

    /// The last successfully applied language.
    pub fn current_language(&self) -> LanguageCode {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    fn set_current(&self, language: LanguageCode) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = language;
    }

    /// Switch the page to `language`.
    ///
    /// The current language only advances after the server accepts the
    /// session change. A failed session change reloads the page; a failed
    /// string fetch still advances the language but leaves the text as is.
    /// If the toast cannot be shown the page is reloaded too, with the new
    /// language already current.
    pub async fn update_page_language(&self, language: LanguageCode) -> UpdateOutcome {
        let update_id = self.next_update_id.fetch_add(1, Ordering::SeqCst);
        info!("[update {}] Changing language to '{}'", update_id, language);

        if let Err(e) = self.backend.change_session_language(&language).await {
            error!(
                "[update {}] Error changing language to '{}': {}, reloading page",
                update_id, language, e
            );
            self.page.reloader.reload();
            return UpdateOutcome::Reloaded { language };
        }

        let translations = load_translations(&self.backend, &language).await;
        let document = self.page.document.as_ref();
        let elements_updated = apply_translations(document, &translations);

        self.set_current(language.clone());

        if let Err(e) = show_language_change_message(document, self.page.toast.as_ref(), &language)
        {
            error!(
                "[update {}] Error showing language change for '{}': {}, reloading page",
                update_id, language, e
            );
            self.page.reloader.reload();
            return UpdateOutcome::Reloaded { language };
        }

        info!(
            "[update {}] Language changed to '{}' ({} elements updated)",
            update_id, language, elements_updated
        );

        UpdateOutcome::Applied {
            language,
            elements_updated,
        }
    }

    /// Selector change handler: a no-op when `selected` is already current.
    pub async fn handle_selector_change(&self, selected: &str) -> Option<UpdateOutcome> {
        if self.current_language() == *selected {
            debug!("Selector value '{}' is already current, ignoring", selected);
            return None;
        }

        Some(self.update_page_language(LanguageCode::from(selected)).await)
    }

    /// Manual trigger: always runs a full update, even for the current language.
    pub async fn change_language_live(&self, language: impl Into<LanguageCode>) -> UpdateOutcome {
        self.update_page_language(language.into()).await
    }

    /// Restore every snapshotted element to its original (trimmed) text.
    ///
    /// Elements removed from the page since the snapshot are skipped. The
    /// current language and the server session are left alone. Returns the
    /// number of elements restored.
    pub fn revert_to_original(&self) -> usize {
        let document = self.page.document.as_ref();
        let mut restored = 0;

        for keyed in &self.originals {
            if document.text_content(keyed.entry.element).is_some() {
                document.set_text_content(keyed.entry.element, &keyed.entry.original_text);
                restored += 1;
            }
        }

        info!("Reverted {} elements to their original text", restored);
        restored
    }
}
