//! Element Query
//!
//! querySelector / querySelectorAll over a single simple selector:
//! `*`, `tag`, `.class`, `#id`, `[attr]` and `[attr=value]`.

use crate::{DomTree, NodeId};

/// Simple selector for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Universal,
    Tag(String),
    Class(String),
    Id(String),
    /// `[name]` or `[name=value]`
    Attribute { name: String, value: Option<String> },
}

impl SimpleSelector {
    /// Parse a simple selector string
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if s == "*" {
            Some(Self::Universal)
        } else if let Some(id) = s.strip_prefix('#') {
            (!id.is_empty()).then(|| Self::Id(id.to_string()))
        } else if let Some(class) = s.strip_prefix('.') {
            (!class.is_empty()).then(|| Self::Class(class.to_string()))
        } else if let Some(inner) = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            Self::parse_attribute(inner)
        } else if s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            Some(Self::Tag(s.to_ascii_lowercase()))
        } else {
            None
        }
    }

    fn parse_attribute(inner: &str) -> Option<Self> {
        let (name, value) = match inner.split_once('=') {
            Some((name, value)) => {
                let value = value.trim();
                let value = value
                    .strip_prefix('"').and_then(|v| v.strip_suffix('"'))
                    .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                    .unwrap_or(value);
                (name.trim(), Some(value.to_string()))
            }
            None => (inner.trim(), None),
        };

        if name.is_empty() || name.contains(char::is_whitespace) {
            return None;
        }
        Some(Self::Attribute { name: name.to_ascii_lowercase(), value })
    }

    /// Selector matching any element that carries `name`
    pub fn has_attribute(name: impl Into<String>) -> Self {
        Self::Attribute { name: name.into(), value: None }
    }

    /// Check an element against this selector
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some(elem) = tree.get(node).and_then(|n| n.as_element()) else {
            return false;
        };

        match self {
            Self::Universal => true,
            Self::Tag(tag) => tree.resolve(elem.name) == tag,
            Self::Class(class) => elem.has_class(class),
            Self::Id(id) => elem.id.as_deref() == Some(id.as_str()),
            Self::Attribute { name, value } => match tree.attribute(node, name) {
                Some(actual) => value.as_deref().is_none_or(|v| v == actual),
                None => false,
            },
        }
    }
}

impl DomTree {
    /// All element descendants of `root` matching `selector`, in document order
    pub fn select_all(&self, root: NodeId, selector: &SimpleSelector) -> Vec<NodeId> {
        // Names that were never interned cannot be on any element
        if let SimpleSelector::Attribute { name, .. } = selector {
            if self.interner().lookup(name).is_none() {
                return Vec::new();
            }
        }

        self.descendants(root)
            .map(|(id, _)| id)
            .filter(|&id| selector.matches(self, id))
            .collect()
    }

    /// First element descendant of `root` matching `selector`
    pub fn select_first(&self, root: NodeId, selector: &SimpleSelector) -> Option<NodeId> {
        self.descendants(root)
            .map(|(id, _)| id)
            .find(|&id| selector.matches(self, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_selector_parse() {
        assert_eq!(SimpleSelector::parse("div"), Some(SimpleSelector::Tag("div".into())));
        assert_eq!(SimpleSelector::parse(".card"), Some(SimpleSelector::Class("card".into())));
        assert_eq!(SimpleSelector::parse("#main"), Some(SimpleSelector::Id("main".into())));
        assert_eq!(SimpleSelector::parse("*"), Some(SimpleSelector::Universal));
        assert_eq!(
            SimpleSelector::parse("[data-action]"),
            Some(SimpleSelector::has_attribute("data-action"))
        );
        assert_eq!(
            SimpleSelector::parse("[data-greeter-target=\"name\"]"),
            Some(SimpleSelector::Attribute {
                name: "data-greeter-target".into(),
                value: Some("name".into()),
            })
        );
    }

    #[test]
    fn test_invalid_selectors() {
        assert_eq!(SimpleSelector::parse(""), None);
        assert_eq!(SimpleSelector::parse("#"), None);
        assert_eq!(SimpleSelector::parse("[]"), None);
        assert_eq!(SimpleSelector::parse("[a b]"), None);
        assert_eq!(SimpleSelector::parse("div > p"), None);
    }

    #[test]
    fn test_select_by_attribute() {
        let mut tree = DomTree::new();
        let root = tree.create_element("div");
        let a = tree.create_element("button");
        let b = tree.create_element("button");
        tree.append_child(tree.root(), root);
        tree.append_child(root, a);
        tree.append_child(root, b);
        tree.set_attribute(a, "data-action", "click->x#y");
        tree.set_attribute(b, "data-action", "");

        let any = SimpleSelector::has_attribute("data-action");
        assert_eq!(tree.select_all(root, &any), vec![a, b]);

        let exact = SimpleSelector::parse("[data-action='click->x#y']").unwrap();
        assert_eq!(tree.select_all(root, &exact), vec![a]);

        let missing = SimpleSelector::has_attribute("data-missing");
        assert!(tree.select_all(root, &missing).is_empty());

        assert_eq!(tree.select_first(tree.root(), &SimpleSelector::Tag("button".into())), Some(a));
    }
}
