//! Binding errors and warnings

use tether_dom::NodeId;

/// Fatal registration error
///
/// Structural problems with the markup (or the call) that leave nothing
/// sensible to bind. Returned from `Registry::register`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("Invalid controller identifier {0:?}: must be non-empty and contain no whitespace")]
    InvalidIdentifier(String),

    #[error("Cannot instantiate the {identifier} controller: no element carries a {attribute} attribute")]
    ControllerNotFound { identifier: String, attribute: String },

    #[error("Could not find controller for {identifier} (declared controllers: {})", .declared.join(", "))]
    IdentifierNotDeclared { identifier: String, declared: Vec<String> },

    #[error("Controller {identifier} is declared on {} elements; exactly one root is required", .roots.len())]
    AmbiguousRoot { identifier: String, roots: Vec<NodeId> },

    #[error("Target of {identifier} on element {node} has an empty name")]
    EmptyTargetName { identifier: String, node: NodeId },

    #[error("Controller {0} is already registered")]
    AlreadyRegistered(String),
}

/// Why an action descriptor failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("missing `->` between event and controller")]
    MissingArrow,

    #[error("missing `#` between controller and method")]
    MissingHash,

    #[error("event name is empty")]
    EmptyEvent,

    #[error("controller identifier is empty")]
    EmptyIdentifier,

    #[error("method name is empty")]
    EmptyMethod,
}

/// Non-fatal binding problem
///
/// The offending element is skipped and binding carries on with the rest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindWarning {
    #[error("Malformed action {descriptor:?} on element {node}: {reason}")]
    MalformedAction { node: NodeId, descriptor: String, reason: DescriptorError },

    #[error("Action {event}->{method} on element {node} could not be bound: {identifier} has no such method")]
    UnresolvedMethod { node: NodeId, identifier: String, event: String, method: String },

    #[error("Target {name} is already bound to {identifier} (element {first}); skipping element {node}")]
    DuplicateTarget { identifier: String, name: String, first: NodeId, node: NodeId },
}
