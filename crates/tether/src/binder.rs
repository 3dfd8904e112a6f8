//! Element Binder
//!
//! Scans a controller's root element for action and target declarations.
//! Planning only reads the document; `attach` is the single step that
//! mutates it, so a fatal error during planning leaves no listeners behind.

use std::cell::RefCell;
use std::rc::Rc;

use tether_dom::{Document, Event, Listener, ListenerId, NodeId, SimpleSelector};

use crate::controller::{Action, ActionMethod, Actions, Instance, Targets};
use crate::{ActionDescriptor, BindError, BindWarning, Config};

/// One (event, method, element) binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBinding {
    pub event: String,
    pub method: String,
    pub node: NodeId,
}

/// A binding whose method resolved in the controller's table
pub struct ResolvedAction<C> {
    pub binding: ActionBinding,
    pub method: ActionMethod<C>,
}

/// Result of scanning a root: what to attach and what to store
pub struct BindPlan<C> {
    pub actions: Vec<ResolvedAction<C>>,
    pub targets: Targets,
    pub warnings: Vec<BindWarning>,
}

impl<C> BindPlan<C> {
    /// The planned (event, method, element) triples
    pub fn bindings(&self) -> impl Iterator<Item = &ActionBinding> {
        self.actions.iter().map(|a| &a.binding)
    }
}

/// Scans one root element on behalf of one controller identifier
#[derive(Debug, Clone, Copy)]
pub struct ElementBinder<'a> {
    config: &'a Config,
    identifier: &'a str,
}

impl<'a> ElementBinder<'a> {
    pub fn new(config: &'a Config, identifier: &'a str) -> Self {
        Self { config, identifier }
    }

    /// Scan targets and actions below `root`
    pub fn plan<C>(&self, document: &Document, root: NodeId, table: &Actions<C>) -> Result<BindPlan<C>, BindError> {
        let (targets, mut warnings) = self.collect_targets(document, root)?;
        let actions = self.resolve_actions(document, root, table, &mut warnings);

        tracing::debug!(
            "Planned {} for {}: {} action(s), {} target(s), {} warning(s)",
            root,
            self.identifier,
            actions.len(),
            targets.len(),
            warnings.len()
        );

        Ok(BindPlan { actions, targets, warnings })
    }

    /// Collect `data-<identifier>-target` elements below `root`
    ///
    /// Names are taken verbatim. The first element declaring a name wins;
    /// an empty value is fatal.
    pub fn collect_targets(&self, document: &Document, root: NodeId) -> Result<(Targets, Vec<BindWarning>), BindError> {
        let attribute = self.config.target_attribute(self.identifier);
        let tree = document.tree();

        let mut targets = Targets::new();
        let mut warnings = Vec::new();

        for node in tree.select_all(root, &SimpleSelector::has_attribute(attribute.as_str())) {
            let name = tree.attribute(node, &attribute).unwrap_or_default();
            if name.is_empty() {
                return Err(BindError::EmptyTargetName {
                    identifier: self.identifier.to_string(),
                    node,
                });
            }

            if let Err(first) = targets.try_insert(name, node) {
                let warning = BindWarning::DuplicateTarget {
                    identifier: self.identifier.to_string(),
                    name: name.to_string(),
                    first,
                    node,
                };
                tracing::warn!("{}", warning);
                warnings.push(warning);
            }
        }

        Ok((targets, warnings))
    }

    /// Parse `data-action` descriptors below `root` and resolve their methods
    ///
    /// Descriptors naming another controller are skipped silently; they are
    /// bound when that controller registers.
    pub fn resolve_actions<C>(
        &self,
        document: &Document,
        root: NodeId,
        table: &Actions<C>,
        warnings: &mut Vec<BindWarning>,
    ) -> Vec<ResolvedAction<C>> {
        let attribute = self.config.action_attribute();
        let tree = document.tree();
        let mut resolved = Vec::new();

        for node in tree.select_all(root, &SimpleSelector::has_attribute(attribute.as_str())) {
            let value = tree.attribute(node, &attribute).unwrap_or_default();

            for (token, parsed) in ActionDescriptor::parse_all(value) {
                let descriptor = match parsed {
                    Ok(descriptor) => descriptor,
                    Err(reason) => {
                        let warning = BindWarning::MalformedAction {
                            node,
                            descriptor: token.to_string(),
                            reason,
                        };
                        tracing::warn!("{}", warning);
                        warnings.push(warning);
                        continue;
                    }
                };

                if descriptor.identifier != self.identifier {
                    continue;
                }

                let Some(method) = table.get(&descriptor.method) else {
                    let warning = BindWarning::UnresolvedMethod {
                        node,
                        identifier: self.identifier.to_string(),
                        event: descriptor.event,
                        method: descriptor.method,
                    };
                    tracing::warn!("{}", warning);
                    warnings.push(warning);
                    continue;
                };

                resolved.push(ResolvedAction {
                    binding: ActionBinding {
                        event: descriptor.event,
                        method: descriptor.method,
                        node,
                    },
                    method,
                });
            }
        }

        resolved
    }

    /// Attach one listener per resolved action
    ///
    /// Each listener closes over the shared instance, so the method always
    /// runs against the controller, never the element.
    pub(crate) fn attach<C: 'static>(
        &self,
        actions: &[ResolvedAction<C>],
        document: &mut Document,
        instance: &Rc<RefCell<Instance<C>>>,
    ) -> Vec<ListenerId> {
        actions
            .iter()
            .map(|action| {
                let listener = action_listener(instance, action.method, action.binding.node);
                tracing::debug!(
                    "Binding {}->{}#{} on {}",
                    action.binding.event,
                    self.identifier,
                    action.binding.method,
                    action.binding.node
                );
                document.add_event_listener(action.binding.node, &action.binding.event, listener)
            })
            .collect()
    }
}

fn action_listener<C: 'static>(instance: &Rc<RefCell<Instance<C>>>, method: ActionMethod<C>, node: NodeId) -> Listener {
    let instance = Rc::clone(instance);

    Rc::new(move |document: &mut Document, event: &mut Event| {
        // An action dispatching into its own controller would alias it
        let Ok(mut guard) = instance.try_borrow_mut() else {
            tracing::warn!(
                "Skipping re-entrant {} action on {}: controller is busy",
                event.event_type,
                node
            );
            return;
        };

        let Instance { context, controller } = &mut *guard;
        method(controller, Action {
            event,
            node,
            context,
            document,
        });
    })
}
