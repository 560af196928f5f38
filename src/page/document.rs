//! The live document the switcher reads and rewrites.
//!
//! `Document` is the seam to the page: a browser binding implements it over
//! the real DOM, `InMemoryDocument` implements it headlessly. All methods take
//! `&self`; implementations synchronize internally so concurrent update flows
//! can share one document.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Non-owning handle to an element of a `Document`.
///
/// A handle stays valid only as long as the element does. Reads through a
/// stale handle return `None`; writes through it are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementRef(usize);

/// The DOM operations the switcher relies on.
pub trait Document: Send + Sync {
    /// Attached elements carrying `attribute`, in document order.
    fn query_by_attribute(&self, attribute: &str) -> Vec<ElementRef>;

    /// First attached element whose `id` attribute equals `id`.
    fn element_by_id(&self, id: &str) -> Option<ElementRef>;

    /// The attached element with `id`, or a new `tag` element carrying `id`
    /// and `attributes` appended to the body.
    ///
    /// Lookup and creation happen as one step: concurrent callers asking for
    /// the same id all receive the same element.
    fn element_by_id_or_create(
        &self,
        id: &str,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> ElementRef;

    fn attribute(&self, element: ElementRef, name: &str) -> Option<String>;

    fn set_attribute(&self, element: ElementRef, name: &str, value: &str);

    fn text_content(&self, element: ElementRef) -> Option<String>;

    /// Replace all content of `element` with plain text.
    fn set_text_content(&self, element: ElementRef, text: &str);

    /// Replace all content of `element` with markup.
    fn set_inner_html(&self, element: ElementRef, html: &str);
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    content: Content,
    attached: bool,
}

#[derive(Debug, Clone)]
enum Content {
    Text(String),
    Markup(String),
}

/// Headless `Document`: a flat list of body children.
///
/// Markup set through `set_inner_html` is stored verbatim and not parsed;
/// `text_content` returns it unchanged.
#[derive(Debug, Default)]
pub struct InMemoryDocument {
    nodes: Mutex<Vec<Node>>,
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    fn nodes(&self) -> MutexGuard<'_, Vec<Node>> {
        self.nodes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an element with the given attributes and text to the body.
    pub fn append(&self, tag: &str, attributes: &[(&str, &str)], text: &str) -> ElementRef {
        let mut nodes = self.nodes();
        nodes.push(Node {
            tag: tag.to_string(),
            attributes: attributes
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            content: Content::Text(text.to_string()),
            attached: true,
        });
        ElementRef(nodes.len() - 1)
    }

    /// Detach `element` from the body. Its handle becomes stale.
    pub fn remove(&self, element: ElementRef) {
        if let Some(node) = self.nodes().get_mut(element.0) {
            node.attached = false;
        }
    }

    /// Number of attached elements with the given `id`.
    pub fn count_with_id(&self, id: &str) -> usize {
        self.nodes()
            .iter()
            .filter(|node| node.attached && node.attributes.get("id").map(String::as_str) == Some(id))
            .count()
    }

    /// Serialize an attached element, e.g. `<h1 data-i18n-key="k">Text</h1>`.
    ///
    /// Text content is written as-is, without entity escaping.
    pub fn outer_html(&self, element: ElementRef) -> Option<String> {
        let nodes = self.nodes();
        let node = nodes.get(element.0).filter(|node| node.attached)?;

        let attributes: String = node
            .attributes
            .iter()
            .map(|(name, value)| format!(" {}=\"{}\"", name, value))
            .collect();
        let content = match &node.content {
            Content::Text(text) | Content::Markup(text) => text,
        };

        Some(format!("<{0}{1}>{2}</{0}>", node.tag, attributes, content))
    }
}

impl Document for InMemoryDocument {
    fn query_by_attribute(&self, attribute: &str) -> Vec<ElementRef> {
        self.nodes()
            .iter()
            .enumerate()
            .filter(|(_, node)| node.attached && node.attributes.contains_key(attribute))
            .map(|(index, _)| ElementRef(index))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        self.nodes()
            .iter()
            .position(|node| node.attached && node.attributes.get("id").map(String::as_str) == Some(id))
            .map(ElementRef)
    }

    fn element_by_id_or_create(
        &self,
        id: &str,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> ElementRef {
        let mut nodes = self.nodes();
        if let Some(index) = nodes
            .iter()
            .position(|node| node.attached && node.attributes.get("id").map(String::as_str) == Some(id))
        {
            return ElementRef(index);
        }

        let mut node_attributes: BTreeMap<String, String> = attributes
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        node_attributes.insert("id".to_string(), id.to_string());
        nodes.push(Node {
            tag: tag.to_string(),
            attributes: node_attributes,
            content: Content::Text(String::new()),
            attached: true,
        });
        ElementRef(nodes.len() - 1)
    }

    fn attribute(&self, element: ElementRef, name: &str) -> Option<String> {
        self.nodes()
            .get(element.0)
            .filter(|node| node.attached)
            .and_then(|node| node.attributes.get(name).cloned())
    }

    fn set_attribute(&self, element: ElementRef, name: &str, value: &str) {
        if let Some(node) = self.nodes().get_mut(element.0) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn text_content(&self, element: ElementRef) -> Option<String> {
        self.nodes()
            .get(element.0)
            .filter(|node| node.attached)
            .map(|node| match &node.content {
                Content::Text(text) | Content::Markup(text) => text.clone(),
            })
    }

    fn set_text_content(&self, element: ElementRef, text: &str) {
        if let Some(node) = self.nodes().get_mut(element.0).filter(|node| node.attached) {
            node.content = Content::Text(text.to_string());
        }
    }

    fn set_inner_html(&self, element: ElementRef, html: &str) {
        if let Some(node) = self.nodes().get_mut(element.0) {
            node.content = Content::Markup(html.to_string());
        }
    }
}
