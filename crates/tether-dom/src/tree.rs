//! DOM Tree (arena-based allocation)

use crate::{InternedString, Node, NodeData, NodeId, StringInterner};

/// Arena-based DOM tree for memory efficiency
///
/// Index 0 is always the document node.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        let mut nodes = Vec::with_capacity(64);
        nodes.push(Node::document());
        Self {
            nodes,
            interner: StringInterner::new(),
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree (document node included)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Name interner
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Resolve an interned name
    #[inline]
    pub fn resolve(&self, id: InternedString) -> &str {
        self.interner.get(id)
    }

    /// Push a detached node and return its ID
    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let name = self.interner.intern(&tag.to_ascii_lowercase());
        self.push(Node::element(name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::new(NodeData::Comment(content.to_string())))
    }

    /// Append `child` as the last child of `parent`
    ///
    /// Returns false if either ID is unknown, `child` is already attached,
    /// is the document node, or is an ancestor of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if child == NodeId::ROOT || self.get(parent).is_none() {
            return false;
        }
        match self.get(child) {
            Some(node) if !node.parent.is_valid() => {}
            _ => return false,
        }
        if self.is_inclusive_ancestor(child, parent) {
            return false;
        }

        let last = self.nodes[parent.index()].last_child;
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }

        let node = &mut self.nodes[child.index()];
        node.parent = parent;
        node.prev_sibling = last;

        self.nodes[parent.index()].last_child = child;
        true
    }

    /// Set an attribute on an element
    ///
    /// Returns false if `node` is not an element.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> bool {
        let name_id = self.interner.intern(name);
        match self.nodes.get_mut(node.index()).and_then(Node::as_element_mut) {
            Some(elem) => {
                elem.set_attr(name_id, name, value.to_string());
                true
            }
            None => false,
        }
    }

    /// Get an attribute value from an element
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        let name_id = self.interner.lookup(name)?;
        self.get(node)?.as_element()?.get_attr(name_id)
    }

    /// Check if an element carries an attribute
    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Iterate an element's attributes as resolved (name, value) pairs
    pub fn attributes(&self, node: NodeId) -> impl Iterator<Item = (&str, &str)> {
        self.get(node)
            .and_then(Node::as_element)
            .into_iter()
            .flat_map(|elem| elem.attrs.iter())
            .map(|attr| (self.resolve(attr.name), attr.value.as_str()))
    }

    /// Tag name of an element
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        let elem = self.get(node)?.as_element()?;
        Some(self.resolve(elem.name))
    }

    /// Parent of a node, if attached
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Iterate over direct children
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        let first = self.get(parent).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, current: first }
    }

    /// Iterate over all descendants of `root` in document order
    ///
    /// `root` itself is not yielded.
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let first = self.get(root).map_or(NodeId::NONE, |n| n.first_child);
        Descendants { tree: self, root, next: first }
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, node: NodeId) -> String {
        if let Some(text) = self.get(node).and_then(Node::as_text) {
            return text.to_string();
        }
        self.descendants(node)
            .filter_map(|(_, n)| n.as_text())
            .collect()
    }

    /// Replace an element's children with a single text node
    ///
    /// Old children are unlinked but stay in the arena.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) -> bool {
        if self.get(node).is_none_or(|n| !n.is_element()) {
            return false;
        }

        let mut child = self.nodes[node.index()].first_child;
        while child.is_valid() {
            let c = &mut self.nodes[child.index()];
            let next = c.next_sibling;
            c.parent = NodeId::NONE;
            c.prev_sibling = NodeId::NONE;
            c.next_sibling = NodeId::NONE;
            child = next;
        }
        let parent = &mut self.nodes[node.index()];
        parent.first_child = NodeId::NONE;
        parent.last_child = NodeId::NONE;

        if !text.is_empty() {
            let id = self.create_text(text);
            self.append_child(node, id);
        }
        true
    }

    /// True if `ancestor` is `node` or lies on its parent chain
    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = node;
        while cursor.is_valid() {
            if cursor == ancestor {
                return true;
            }
            cursor = self.get(cursor).map_or(NodeId::NONE, |n| n.parent);
        }
        false
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    current: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current;
        let node = self.tree.get(id)?;
        self.current = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order iterator over a subtree, excluding its root
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            // Climb until a sibling is found or we are back at the root
            let mut cursor = id;
            let mut successor = NodeId::NONE;
            while cursor != self.root {
                let Some(current) = self.tree.get(cursor) else { break };
                if current.next_sibling.is_valid() {
                    successor = current.next_sibling;
                    break;
                }
                cursor = current.parent;
            }
            successor
        };

        Some((id, node))
    }
}
