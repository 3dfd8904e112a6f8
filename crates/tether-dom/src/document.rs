//! Document
//!
//! A `DomTree` plus the listeners attached to its nodes. Event dispatch
//! lives here because listeners receive the whole document.

use crate::{DomTree, Event, EventListenerRegistry, Listener, ListenerId, NodeId, SimpleSelector};

/// The `<html>`, `<head>` and `<body>` elements, `NONE` when absent
#[derive(Debug, Clone, Copy)]
struct Landmarks {
    html: NodeId,
    head: NodeId,
    body: NodeId,
}

impl Landmarks {
    const MISSING: Self = Self {
        html: NodeId::NONE,
        head: NodeId::NONE,
        body: NodeId::NONE,
    };
}

pub struct Document {
    pub tree: DomTree,
    url: String,
    listeners: EventListenerRegistry,
    landmarks: Landmarks,
}

impl Document {
    /// Document with an empty html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut doc = Self::empty(url);
        let tree = &mut doc.tree;

        let [html, head, body] = ["html", "head", "body"].map(|tag| tree.create_element(tag));
        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        doc.landmarks = Landmarks { html, head, body };
        doc
    }

    /// Document holding only the document node
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            listeners: EventListenerRegistry::new(),
            landmarks: Landmarks::MISSING,
        }
    }

    /// Re-locate the landmark elements once the tree was built by hand
    pub fn finalize(&mut self) {
        let html = self.child_with_tag(self.tree.root(), "html");
        self.landmarks = if html.is_valid() {
            Landmarks {
                html,
                head: self.child_with_tag(html, "head"),
                body: self.child_with_tag(html, "body"),
            }
        } else {
            Landmarks::MISSING
        };
    }

    fn child_with_tag(&self, parent: NodeId, tag: &str) -> NodeId {
        self.tree
            .children(parent)
            .map(|(id, _)| id)
            .find(|&id| self.tree.tag_name(id) == Some(tag))
            .unwrap_or(NodeId::NONE)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Trimmed text of `<head><title>`, empty when there is none
    pub fn title(&self) -> String {
        let head = self.landmarks.head;
        if !head.is_valid() {
            return String::new();
        }

        Some(self.child_with_tag(head, "title"))
            .filter(|title| title.is_valid())
            .map(|title| self.tree.text_content(title).trim().to_string())
            .unwrap_or_default()
    }

    /// The `<html>` element
    pub fn document_element(&self) -> NodeId {
        self.landmarks.html
    }

    pub fn head(&self) -> NodeId {
        self.landmarks.head
    }

    pub fn body(&self) -> NodeId {
        self.landmarks.body
    }

    /// First element whose `id` attribute equals `id`
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.select_first(self.tree.root(), &SimpleSelector::Id(id.to_string()))
    }

    /// First element in the document matching `selector`
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let selector = SimpleSelector::parse(selector)?;
        self.tree.select_first(self.tree.root(), &selector)
    }

    /// All elements in the document matching `selector`
    ///
    /// An unparsable selector matches nothing.
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        match SimpleSelector::parse(selector) {
            Some(selector) => self.tree.select_all(self.tree.root(), &selector),
            None => {
                tracing::debug!("Ignoring unsupported selector {:?}", selector);
                Vec::new()
            }
        }
    }

    /// Attach a listener for `event_type` on `node`
    pub fn add_event_listener(&mut self, node: NodeId, event_type: &str, listener: Listener) -> ListenerId {
        self.listeners.add_listener(node, event_type, listener)
    }

    /// Number of listeners for `event_type` on `node`
    pub fn listener_count(&self, node: NodeId, event_type: &str) -> usize {
        self.listeners.count(node, event_type)
    }

    /// Dispatch an event at `target`
    ///
    /// Listeners on the target run first, then (for bubbling events) those
    /// on each ancestor up to the document node. Returns false if a
    /// listener prevented the default action.
    pub fn dispatch_event(&mut self, target: NodeId, mut event: Event) -> bool {
        event.target = target;

        let mut path = vec![target];
        if event.bubbles {
            let mut cursor = target;
            while let Some(parent) = self.tree.parent(cursor) {
                path.push(parent);
                cursor = parent;
            }
        }

        for node in path {
            // Clone handles first so listeners can borrow the document mutably
            let listeners = self.listeners.get_listeners(node, &event.event_type);
            if listeners.is_empty() {
                continue;
            }

            event.current_target = node;
            for listener in listeners {
                listener(self, &mut event);
            }
            if event.is_propagation_stopped() {
                break;
            }
        }

        event.current_target = NodeId::NONE;
        !event.is_default_prevented()
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("url", &self.url)
            .field("nodes", &self.tree.len())
            .field("listeners", &self.listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_new_document_structure() {
        let doc = Document::new("https://example.com");
        assert_eq!(doc.url(), "https://example.com");
        assert_eq!(doc.tree().tag_name(doc.document_element()), Some("html"));
        assert_eq!(doc.tree().tag_name(doc.head()), Some("head"));
        assert_eq!(doc.tree().tag_name(doc.body()), Some("body"));
        assert_eq!(doc.title(), "");
    }

    #[test]
    fn test_finalize_empty_document() {
        let mut doc = Document::empty("about:blank");
        doc.finalize();
        assert!(!doc.body().is_valid());
        assert_eq!(doc.title(), "");
    }

    #[test]
    fn test_dispatch_bubbles_to_ancestors() {
        let mut doc = Document::default();
        let button = doc.tree.create_element("button");
        let body = doc.body();
        doc.tree.append_child(body, button);

        let seen = Rc::new(Cell::new(0));
        let on_body = Rc::clone(&seen);
        doc.add_event_listener(body, "click", Rc::new(move |_: &mut Document, event: &mut Event| {
            assert_eq!(event.current_target, body);
            on_body.set(on_body.get() + 10);
        }));
        let on_button = Rc::clone(&seen);
        doc.add_event_listener(button, "click", Rc::new(move |_: &mut Document, event: &mut Event| {
            assert_eq!(event.target, button);
            on_button.set(on_button.get() + 1);
        }));

        assert!(doc.dispatch_event(button, Event::click()));
        assert_eq!(seen.get(), 11);

        // Non-bubbling events stay on the target
        doc.dispatch_event(button, Event::new("click"));
        assert_eq!(seen.get(), 12);
    }

    #[test]
    fn test_stop_propagation_and_prevent_default() {
        let mut doc = Document::default();
        let button = doc.tree.create_element("button");
        let body = doc.body();
        doc.tree.append_child(body, button);

        let reached_body = Rc::new(Cell::new(false));
        let flag = Rc::clone(&reached_body);
        doc.add_event_listener(body, "click", Rc::new(move |_: &mut Document, _: &mut Event| {
            flag.set(true);
        }));
        doc.add_event_listener(button, "click", Rc::new(|_: &mut Document, event: &mut Event| {
            event.prevent_default();
            event.stop_propagation();
        }));

        assert!(!doc.dispatch_event(button, Event::click()));
        assert!(!reached_body.get());
    }

    #[test]
    fn test_listener_can_mutate_document() {
        let mut doc = Document::default();
        let out = doc.tree.create_element("p");
        let body = doc.body();
        doc.tree.append_child(body, out);

        doc.add_event_listener(out, "click", Rc::new(move |doc: &mut Document, _: &mut Event| {
            doc.tree_mut().set_text_content(out, "clicked");
        }));

        doc.dispatch_event(out, Event::click());
        assert_eq!(doc.tree().text_content(out), "clicked");
    }

    #[test]
    fn test_query_selector() {
        let mut doc = Document::default();
        let a = doc.tree.create_element("div");
        let body = doc.body();
        doc.tree.append_child(body, a);
        doc.tree.set_attribute(a, "id", "main");
        doc.tree.set_attribute(a, "data-controller", "greeter clock");

        assert_eq!(doc.get_element_by_id("main"), Some(a));
        assert_eq!(doc.query_selector("[data-controller]"), Some(a));
        assert_eq!(doc.query_selector_all("div"), vec![a]);
        assert!(doc.query_selector_all("div p").is_empty());
    }
}
