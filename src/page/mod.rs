//! The page side of a language switch: the document and the capabilities the
//! switcher borrows from the browser.
//!
//! - `document`: the `Document` seam and the headless `InMemoryDocument`
//! - `scanner`: collect `data-i18n-key` elements and their original text
//! - `mutator`: rewrite marked elements from a translation map
//! - `notifier`: the "Language changed" toast

mod document;
mod mutator;
mod notifier;
mod scanner;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub use document::{Document, ElementRef, InMemoryDocument};
pub use mutator::apply_translations;
pub use notifier::{
    change_message, show_language_change_message, HeadlessToast, ToastDisplay, TOAST_ELEMENT_ID,
};
pub use scanner::{
    scan_entries, scan_translations, KeyedElement, TranslationEntry, I18N_KEY_ATTRIBUTE,
};

/// Capability to throw away the page and re-render it from the server.
pub trait PageReloader: Send + Sync {
    fn reload(&self);
}

/// Headless reloader that only counts reload requests.
#[derive(Debug, Default)]
pub struct ReloadCounter {
    reloads: AtomicUsize,
}

impl ReloadCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

impl PageReloader for ReloadCounter {
    fn reload(&self) {
        self.reloads.fetch_add(1, Ordering::SeqCst);
    }
}

/// Everything the switcher touches on the page.
#[derive(Clone)]
pub struct Page {
    pub document: Arc<dyn Document>,
    pub toast: Arc<dyn ToastDisplay>,
    pub reloader: Arc<dyn PageReloader>,
}

impl Page {
    pub fn new(
        document: Arc<dyn Document>,
        toast: Arc<dyn ToastDisplay>,
        reloader: Arc<dyn PageReloader>,
    ) -> Self {
        Self {
            document,
            toast,
            reloader,
        }
    }
}
