//! Controllers
//!
//! A controller is a plain Rust value plus a table of named action methods.
//! The framework keeps the value together with its `Context` (identifier,
//! root element, targets) inside a shared instance that bound listeners
//! close over.

use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tether_dom::{Document, Event, NodeId};

use crate::BindWarning;

/// Signature of an action method
pub type ActionMethod<C> = fn(&mut C, Action<'_>);

/// Everything an action method receives besides `self`
pub struct Action<'a> {
    /// The triggering event
    pub event: &'a mut Event,
    /// The element carrying the `data-action` that fired
    pub node: NodeId,
    /// The controller's identifier, root element and targets
    pub context: &'a Context,
    /// The live document
    pub document: &'a mut Document,
}

/// Name -> method capability table
///
/// Built once per registration from `Controller::actions`; markup refers
/// to methods only by these names.
pub struct Actions<C> {
    methods: HashMap<&'static str, ActionMethod<C>>,
}

impl<C> Actions<C> {
    pub fn new() -> Self {
        Self { methods: HashMap::new() }
    }

    /// Builder form of `insert`
    pub fn with(mut self, name: &'static str, method: ActionMethod<C>) -> Self {
        self.insert(name, method);
        self
    }

    /// Register `method` under `name`, replacing any previous entry
    pub fn insert(&mut self, name: &'static str, method: ActionMethod<C>) {
        self.methods.insert(name, method);
    }

    /// Resolve a method by name
    pub fn get(&self, name: &str) -> Option<ActionMethod<C>> {
        self.methods.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Method names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.methods.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl<C> Default for Actions<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for Actions<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actions").field("methods", &self.names()).finish()
    }
}

/// Behavior attached to a DOM subtree
///
/// ```rust,ignore
/// struct Greeter { output: String }
///
/// impl Greeter {
///     fn say_hello(&mut self, _action: Action<'_>) {
///         self.output = "hi".into();
///     }
/// }
///
/// impl Controller for Greeter {
///     fn actions() -> Actions<Self> {
///         Actions::new().with("sayHello", Self::say_hello)
///     }
/// }
/// ```
pub trait Controller: Sized + 'static {
    /// Methods callable from `data-action` descriptors
    fn actions() -> Actions<Self> {
        Actions::new()
    }

    /// Called once, after actions and targets are bound
    fn connect(&mut self, _context: &Context, _document: &mut Document) {}
}

/// Binding state of a controller instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, listeners and targets not yet installed
    Unbound,
    /// Listeners attached and targets populated
    Bound,
}

/// Named target elements of one controller, first declaration wins
#[derive(Debug, Clone, Default)]
pub struct Targets {
    by_name: HashMap<String, NodeId>,
    order: Vec<String>,
}

impl Targets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the name is taken; returns the existing node otherwise
    pub(crate) fn try_insert(&mut self, name: &str, node: NodeId) -> Result<(), NodeId> {
        if let Some(&first) = self.by_name.get(name) {
            return Err(first);
        }
        self.by_name.insert(name.to_string(), node);
        self.order.push(name.to_string());
        Ok(())
    }

    /// Element registered under `name`
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn has(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// (name, element) pairs in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.order.iter().map(|name| (name.as_str(), self.by_name[name]))
    }
}

/// Framework-owned state of a controller instance
#[derive(Debug, Clone)]
pub struct Context {
    identifier: String,
    element: NodeId,
    targets: Targets,
    lifecycle: Lifecycle,
}

impl Context {
    pub(crate) fn new(identifier: &str, element: NodeId) -> Self {
        Self {
            identifier: identifier.to_string(),
            element,
            targets: Targets::new(),
            lifecycle: Lifecycle::Unbound,
        }
    }

    /// Identifier the controller was registered under
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Root element declaring the controller
    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    /// Shorthand for `targets().get(name)`
    pub fn target(&self, name: &str) -> Option<NodeId> {
        self.targets.get(name)
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Install targets and move to Bound; there is no way back
    pub(crate) fn bind(&mut self, targets: Targets) {
        debug_assert_eq!(self.lifecycle, Lifecycle::Unbound);
        self.targets = targets;
        self.lifecycle = Lifecycle::Bound;
    }
}

/// A controller value together with its context
pub(crate) struct Instance<C> {
    pub(crate) context: Context,
    pub(crate) controller: C,
}

/// Shared handle to a registered controller
///
/// Listeners hold clones of the same instance, so state changed by actions
/// is visible here.
pub struct ControllerHandle<C> {
    instance: Rc<RefCell<Instance<C>>>,
    warnings: Rc<[BindWarning]>,
}

impl<C: Controller> ControllerHandle<C> {
    pub(crate) fn new(instance: Rc<RefCell<Instance<C>>>, warnings: Vec<BindWarning>) -> Self {
        Self {
            instance,
            warnings: warnings.into(),
        }
    }

    /// Borrow the controller value
    ///
    /// Panics if called from inside one of this controller's own actions.
    pub fn controller(&self) -> Ref<'_, C> {
        Ref::map(self.instance.borrow(), |i| &i.controller)
    }

    /// Borrow the controller's context
    pub fn context(&self) -> Ref<'_, Context> {
        Ref::map(self.instance.borrow(), |i| &i.context)
    }

    /// Run `f` with mutable access to the controller value
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut C, &Context) -> R) -> R {
        let mut guard = self.instance.borrow_mut();
        let Instance { context, controller } = &mut *guard;
        f(controller, context)
    }

    /// Element registered under target `name`
    pub fn target(&self, name: &str) -> Option<NodeId> {
        self.instance.borrow().context.target(name)
    }

    pub fn identifier(&self) -> String {
        self.instance.borrow().context.identifier.clone()
    }

    /// Root element
    pub fn element(&self) -> NodeId {
        self.instance.borrow().context.element
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.instance.borrow().context.lifecycle
    }

    /// Non-fatal problems found while binding
    pub fn warnings(&self) -> &[BindWarning] {
        &self.warnings
    }
}

impl<C> Clone for ControllerHandle<C> {
    fn clone(&self) -> Self {
        Self {
            instance: Rc::clone(&self.instance),
            warnings: Rc::clone(&self.warnings),
        }
    }
}

impl<C> fmt::Debug for ControllerHandle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ControllerHandle");
        match self.instance.try_borrow() {
            Ok(instance) => s.field("context", &instance.context),
            Err(_) => s.field("context", &"<borrowed>"),
        };
        s.field("warnings", &self.warnings.len()).finish()
    }
}
