//! Page-ready wiring: seed the current language, hook up the language
//! selector and expose the manual `changeLanguageLive` trigger.
//!
//! Events travel over a typed channel to a dispatcher task. Each accepted
//! event runs its update flow in its own task, so a second change does not
//! wait for the first.

use crate::backend::LanguageBackend;
use crate::i18n::LanguageCode;
use crate::page::Page;
use crate::switcher::{LanguageSwitcher, UpdateOutcome};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

/// Id of the optional language selector control.
pub const LANGUAGE_SELECT_ID: &str = "language-select";

/// Something the page asks the switcher to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The selector's value changed to the given code.
    SelectorChanged(String),
    /// `changeLanguageLive(code)` was called.
    ChangeLanguageLive(LanguageCode),
}

/// Handle to a bootstrapped page.
pub struct SwitcherHandle<B> {
    switcher: Arc<LanguageSwitcher<B>>,
    events: mpsc::UnboundedSender<PageEvent>,
    dispatcher: JoinHandle<Vec<UpdateOutcome>>,
    selector_attached: bool,
}

/// Wire the switcher to `page`.
///
/// `injected_language` is the server-rendered current language, if the page
/// provides one. Must be called from within a tokio runtime.
pub fn bootstrap<B>(backend: B, page: Page, injected_language: Option<String>) -> SwitcherHandle<B>
where
    B: LanguageBackend + 'static,
{
    let initial = injected_language
        .filter(|code| !code.is_empty())
        .map(LanguageCode::from)
        .unwrap_or_default();

    let selector_attached = page.document.element_by_id(LANGUAGE_SELECT_ID).is_some();
    if !selector_attached {
        debug!("No #{} element, selector changes are ignored", LANGUAGE_SELECT_ID);
    }

    let switcher = Arc::new(LanguageSwitcher::new(backend, page, initial));
    let (events, receiver) = mpsc::unbounded_channel();
    let dispatcher = tokio::spawn(dispatch(switcher.clone(), receiver, selector_attached));

    info!(
        "Language switcher ready (current '{}', selector {})",
        switcher.current_language(),
        if selector_attached { "attached" } else { "absent" }
    );

    SwitcherHandle {
        switcher,
        events,
        dispatcher,
        selector_attached,
    }
}

async fn dispatch<B>(
    switcher: Arc<LanguageSwitcher<B>>,
    mut receiver: mpsc::UnboundedReceiver<PageEvent>,
    selector_attached: bool,
) -> Vec<UpdateOutcome>
where
    B: LanguageBackend + 'static,
{
    let mut flows: JoinSet<Option<UpdateOutcome>> = JoinSet::new();
    let mut outcomes = Vec::new();

    loop {
        tokio::select! {
            event = receiver.recv() => {
                let Some(event) = event else { break };
                let switcher = switcher.clone();
                match event {
                    PageEvent::SelectorChanged(value) if selector_attached => {
                        flows.spawn(async move { switcher.handle_selector_change(&value).await });
                    }
                    PageEvent::SelectorChanged(value) => {
                        debug!("Ignoring selector change to '{}' without a selector", value);
                    }
                    PageEvent::ChangeLanguageLive(language) => {
                        flows.spawn(async move { Some(switcher.change_language_live(language).await) });
                    }
                }
            }
            Some(finished) = flows.join_next(), if !flows.is_empty() => {
                record(finished, &mut outcomes);
            }
        }
    }

    while let Some(finished) = flows.join_next().await {
        record(finished, &mut outcomes);
    }

    outcomes
}

fn record(
    finished: Result<Option<UpdateOutcome>, tokio::task::JoinError>,
    outcomes: &mut Vec<UpdateOutcome>,
) {
    match finished {
        Ok(Some(outcome)) => outcomes.push(outcome),
        Ok(None) => {}
        Err(e) => warn!("Language update task failed: {}", e),
    }
}

impl<B: LanguageBackend + 'static> SwitcherHandle<B> {
    pub fn switcher(&self) -> &LanguageSwitcher<B> {
        &self.switcher
    }

    pub fn selector_attached(&self) -> bool {
        self.selector_attached
    }

    pub fn current_language(&self) -> LanguageCode {
        self.switcher.current_language()
    }

    /// Deliver an event to the dispatcher. Returns false once the handle is
    /// finishing.
    pub fn dispatch(&self, event: PageEvent) -> bool {
        self.events.send(event).is_ok()
    }

    /// The selector's change event.
    pub fn selector_changed(&self, value: impl Into<String>) -> bool {
        self.dispatch(PageEvent::SelectorChanged(value.into()))
    }

    /// The global `changeLanguageLive(language)` entry point.
    pub fn change_language_live(&self, language: impl Into<LanguageCode>) -> bool {
        self.dispatch(PageEvent::ChangeLanguageLive(language.into()))
    }

    /// Stop accepting events and wait for every in-flight update, returning
    /// their outcomes in completion order.
    pub async fn finish(self) -> Vec<UpdateOutcome> {
        drop(self.events);
        match self.dispatcher.await {
            Ok(outcomes) => outcomes,
            Err(e) => {
                warn!("Language event dispatcher failed: {}", e);
                Vec::new()
            }
        }
    }
}
