use super::document::{Document, ElementRef};
use crate::error::SwitchError;
use crate::i18n::LanguageCode;
use std::sync::{Mutex, PoisonError};

/// Id of the single toast element the notifier owns.
pub const TOAST_ELEMENT_ID: &str = "language-change-toast";

const TOAST_CLASS: &str = "toast position-fixed top-0 end-0 p-3";
const TOAST_STYLE: &str = "z-index: 9999";

/// Capability that makes a prepared toast element visible.
///
/// In a browser this wraps the UI library's toast widget. Returning an error
/// means the capability is unavailable on this page.
pub trait ToastDisplay: Send + Sync {
    fn show(&self, document: &dyn Document, toast: ElementRef) -> Result<(), SwitchError>;
}

/// Headless toast display that records every element it was asked to show.
#[derive(Debug, Default)]
pub struct HeadlessToast {
    shown: Mutex<Vec<ElementRef>>,
}

impl HeadlessToast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<ElementRef> {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ToastDisplay for HeadlessToast {
    fn show(&self, _document: &dyn Document, toast: ElementRef) -> Result<(), SwitchError> {
        self.shown
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
        Ok(())
    }
}

/// Confirmation text, e.g. "Language changed to Hindi".
pub fn change_message(language: &LanguageCode) -> String {
    format!("Language changed to {}", language.display_name())
}

fn toast_markup(language: &LanguageCode) -> String {
    format!(
        r#"<div class="toast-header bg-success text-white"><strong class="me-auto">Language Changed</strong><button type="button" class="btn-close btn-close-white" data-bs-dismiss="toast"></button></div><div class="toast-body">{}</div>"#,
        escape_html(&change_message(language))
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Show (or refresh) the language-change toast.
///
/// The toast element is created and attached once; later calls find it by id
/// and overwrite its content. Fails when the toast capability is unavailable.
pub fn show_language_change_message(
    document: &dyn Document,
    toast: &dyn ToastDisplay,
    language: &LanguageCode,
) -> Result<ElementRef, SwitchError> {
    let element = document.element_by_id_or_create(
        TOAST_ELEMENT_ID,
        "div",
        &[("class", TOAST_CLASS), ("style", TOAST_STYLE)],
    );

    document.set_inner_html(element, &toast_markup(language));
    toast.show(document, element)?;

    Ok(element)
}
