//! Arena nodes
//!
//! Nodes refer to their neighbours by `NodeId` index, so a whole document
//! is one `Vec<Node>` and ids stay stable while it grows.

use crate::{InternedString, NodeId};

/// One slot in the arena
#[derive(Debug)]
pub struct Node {
    pub parent: NodeId,
    pub first_child: NodeId,
    /// Kept so `append_child` never walks the sibling chain
    pub last_child: NodeId,
    pub prev_sibling: NodeId,
    pub next_sibling: NodeId,
    pub data: NodeData,
}

impl Node {
    /// Detached node carrying `data`
    pub fn new(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    pub fn element(name: InternedString) -> Self {
        Self::new(NodeData::Element(ElementData::new(name)))
    }

    pub fn text(content: String) -> Self {
        Self::new(NodeData::Text(content))
    }

    pub fn document() -> Self {
        Self::new(NodeData::Document)
    }

    pub fn is_element(&self) -> bool {
        self.as_element().is_some()
    }

    pub fn is_text(&self) -> bool {
        self.as_text().is_some()
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        if let NodeData::Element(elem) = &self.data { Some(elem) } else { None }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        if let NodeData::Element(elem) = &mut self.data { Some(elem) } else { None }
    }

    pub fn as_text(&self) -> Option<&str> {
        if let NodeData::Text(text) = &self.data { Some(text) } else { None }
    }
}

/// What a node is
#[derive(Debug)]
pub enum NodeData {
    /// The single document node at `NodeId::ROOT`
    Document,
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
    Element(ElementData),
    Text(String),
    Comment(String),
}

/// Tag name plus attributes of an element
///
/// `id` and `classes` mirror the `id` and `class` attributes so selector
/// matching does not rescan `attrs`.
#[derive(Debug)]
pub struct ElementData {
    /// Lowercase local name
    pub name: InternedString,
    /// Source order
    pub attrs: Vec<Attribute>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl ElementData {
    pub fn new(name: InternedString) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            id: None,
            classes: Vec::new(),
        }
    }

    pub fn get_attr(&self, name: InternedString) -> Option<&str> {
        self.attrs
            .iter()
            .find_map(|attr| (attr.name == name).then_some(attr.value.as_str()))
    }

    /// Presence check; an empty value still counts
    pub fn has_attr(&self, name: InternedString) -> bool {
        self.attrs.iter().any(|attr| attr.name == name)
    }

    /// Set or replace an attribute
    ///
    /// `local` is the resolved form of `name`, used to refresh the id and
    /// class mirrors without a lookup.
    pub fn set_attr(&mut self, name: InternedString, local: &str, value: String) {
        match local {
            "id" => self.id = Some(value.clone()),
            "class" => self.classes = value.split_whitespace().map(str::to_string).collect(),
            _ => {}
        }

        match self.attrs.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = value,
            None => self.attrs.push(Attribute { name, value }),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: InternedString,
    pub value: String,
}
