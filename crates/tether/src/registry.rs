//! Controller Registry
//!
//! Owns the document and turns `register(identifier, factory)` calls into
//! bound controller instances.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use tether_dom::{Document, Event, NodeId, SimpleSelector};

use crate::controller::{Context, Instance};
use crate::{BindError, Config, Controller, ControllerHandle, DuplicatePolicy, ElementBinder};

/// Process-wide set of controllers bound to one document
#[derive(Debug)]
pub struct Registry {
    document: Document,
    config: Config,
    /// Identifier -> number of successful registrations
    registered: HashMap<String, usize>,
}

impl Registry {
    /// Create a registry over `document` with the default configuration
    pub fn new(document: Document) -> Self {
        Self::with_config(document, Config::default())
    }

    pub fn with_config(document: Document, config: Config) -> Self {
        Self {
            document,
            config,
            registered: HashMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Give the document back; bound listeners stay attached to it
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Register a controller under `identifier`
    ///
    /// Locates the single element whose controller attribute lists
    /// `identifier`, scans it for targets and actions, builds the
    /// controller with `factory`, attaches its listeners and finally calls
    /// `Controller::connect`. The factory is not called when the root
    /// cannot be located or the markup is invalid.
    pub fn register<C, F>(&mut self, identifier: &str, factory: F) -> Result<ControllerHandle<C>, BindError>
    where
        C: Controller,
        F: FnOnce(&str) -> C,
    {
        if identifier.is_empty() || identifier.contains(char::is_whitespace) {
            return Err(BindError::InvalidIdentifier(identifier.to_string()));
        }

        if self.config.on_duplicate == DuplicatePolicy::Reject && self.is_registered(identifier) {
            return Err(BindError::AlreadyRegistered(identifier.to_string()));
        }

        let root = self.locate_root(identifier)?;
        let binder = ElementBinder::new(&self.config, identifier);
        let plan = binder.plan(&self.document, root, &C::actions())?;

        let instance = Rc::new(RefCell::new(Instance {
            context: Context::new(identifier, root),
            controller: factory(identifier),
        }));

        let listeners = binder.attach(&plan.actions, &mut self.document, &instance);
        {
            let mut guard = instance.borrow_mut();
            let Instance { context, controller } = &mut *guard;
            context.bind(plan.targets);
            controller.connect(context, &mut self.document);
        }

        *self.registered.entry(identifier.to_string()).or_default() += 1;
        tracing::debug!(
            "Registered {} on {} with {} listener(s)",
            identifier,
            root,
            listeners.len()
        );

        Ok(ControllerHandle::new(instance, plan.warnings))
    }

    /// Find the unique element declaring `identifier`
    fn locate_root(&self, identifier: &str) -> Result<NodeId, BindError> {
        let attribute = self.config.controller_attribute();
        let tree = self.document.tree();
        let candidates = tree.select_all(tree.root(), &SimpleSelector::has_attribute(attribute.as_str()));

        if candidates.is_empty() {
            return Err(BindError::ControllerNotFound {
                identifier: identifier.to_string(),
                attribute,
            });
        }

        let declared = move |node: NodeId| tree.attribute(node, &attribute).unwrap_or_default().split_whitespace();

        let roots: Vec<NodeId> = candidates
            .iter()
            .copied()
            .filter(|&node| declared(node).any(|id| id == identifier))
            .collect();

        match roots.len() {
            1 => Ok(roots[0]),
            0 => {
                let declared: BTreeSet<&str> = candidates.iter().flat_map(|&node| declared(node)).collect();
                Err(BindError::IdentifierNotDeclared {
                    identifier: identifier.to_string(),
                    declared: declared.into_iter().map(str::to_string).collect(),
                })
            }
            _ => Err(BindError::AmbiguousRoot {
                identifier: identifier.to_string(),
                roots,
            }),
        }
    }

    /// Check if `identifier` has been registered at least once
    pub fn is_registered(&self, identifier: &str) -> bool {
        self.registered.contains_key(identifier)
    }

    /// How many times `identifier` was registered successfully
    pub fn registrations(&self, identifier: &str) -> usize {
        self.registered.get(identifier).copied().unwrap_or(0)
    }

    /// Registered identifiers, sorted
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.registered.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Dispatch an event into the document
    pub fn dispatch(&mut self, target: NodeId, event: Event) -> bool {
        self.document.dispatch_event(target, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;
    impl Controller for Noop {}

    fn doc_with_roots(values: &[&str]) -> Document {
        let mut doc = Document::default();
        let body = doc.body();
        for value in values {
            let div = doc.tree_mut().create_element("div");
            doc.tree_mut().append_child(body, div);
            doc.tree_mut().set_attribute(div, "data-controller", value);
        }
        doc
    }

    #[test]
    fn test_invalid_identifier() {
        let mut registry = Registry::new(doc_with_roots(&["a"]));
        assert_eq!(
            registry.register("", |_| Noop).err(),
            Some(BindError::InvalidIdentifier(String::new()))
        );
        assert!(matches!(
            registry.register("a b", |_| Noop),
            Err(BindError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_declared_list_is_sorted_and_unique() {
        let mut registry = Registry::new(doc_with_roots(&["menu greeter", "greeter"]));
        match registry.register("clock", |_| Noop) {
            Err(BindError::IdentifierNotDeclared { declared, .. }) => {
                assert_eq!(declared, vec!["greeter".to_string(), "menu".to_string()]);
            }
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_ambiguous_root() {
        let mut registry = Registry::new(doc_with_roots(&["menu greeter", "greeter"]));
        assert!(matches!(
            registry.register("greeter", |_| Noop),
            Err(BindError::AmbiguousRoot { roots, .. }) if roots.len() == 2
        ));
        assert!(registry.register("menu", |_| Noop).is_ok());
        assert_eq!(registry.identifiers(), vec!["menu"]);
    }

    #[test]
    fn test_identifier_matches_whole_tokens() {
        let mut registry = Registry::new(doc_with_roots(&["greeter-list"]));
        assert!(matches!(
            registry.register("greeter", |_| Noop),
            Err(BindError::IdentifierNotDeclared { .. })
        ));
    }
}
