//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it into the tether arena DOM.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use tether_dom::{Document, DomTree, Node, NodeData, NodeId};

use crate::HtmlError;

/// HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, HtmlError> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a base URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document, HtmlError> {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        let mut document = Document::empty(url);
        self.convert(&dom.document, document.tree_mut());
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }

    /// Convert an RcDom subtree, depth-first, without recursion
    ///
    /// Deeply nested markup would otherwise overflow the stack.
    fn convert(&self, document: &Handle, tree: &mut DomTree) {
        let mut stack: Vec<(Handle, NodeId)> = document
            .children
            .borrow()
            .iter()
            .rev()
            .map(|child| (child.clone(), tree.root()))
            .collect();

        while let Some((handle, parent)) = stack.pop() {
            let Some(id) = self.convert_node(&handle, tree) else {
                continue;
            };
            tree.append_child(parent, id);

            if tree.get(id).is_some_and(Node::is_element) {
                for child in handle.children.borrow().iter().rev() {
                    stack.push((child.clone(), id));
                }
            }
        }
    }

    /// Convert a single node; returns None for nodes that are dropped
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree) -> Option<NodeId> {
        match &handle.data {
            RcNodeData::Document | RcNodeData::ProcessingInstruction { .. } => None,
            RcNodeData::Doctype { name, public_id, system_id } => {
                Some(tree.push(Node::new(NodeData::Doctype {
                    name: name.to_string(),
                    public_id: public_id.to_string(),
                    system_id: system_id.to_string(),
                })))
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow();
                // Inter-element whitespace carries no meaning for bindings
                if text.trim().is_empty() {
                    None
                } else {
                    Some(tree.create_text(&text))
                }
            }
            RcNodeData::Comment { contents } => Some(tree.create_comment(contents)),
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    tree.set_attribute(id, &attr.name.local, &attr.value);
                }
                Some(id)
            }
        }
    }
}
