//! tether
//!
//! Attach behavior to DOM elements through data attributes.
//!
//! A root element names the controllers it hosts, descendants declare
//! actions and targets for them:
//!
//! ```html
//! <div data-controller="greeter">
//!   <input data-greeter-target="name">
//!   <button data-action="click->greeter#greet">Greet</button>
//!   <span data-greeter-target="output"></span>
//! </div>
//! ```
//!
//! `Registry::register("greeter", ...)` finds that root, collects the
//! `name` and `output` targets, wires the click to the controller's
//! `greet` method and calls `Controller::connect`.
//!
//! # Example
//! ```rust,ignore
//! use tether::{Action, Actions, Controller, Registry};
//!
//! let mut registry = Registry::new(tether_html::parse(html)?);
//! let greeter = registry.register("greeter", |_| Greeter::default())?;
//! ```

mod action;
mod binder;
mod config;
mod controller;
mod error;
mod registry;

pub use action::ActionDescriptor;
pub use binder::{ActionBinding, BindPlan, ElementBinder, ResolvedAction};
pub use config::{Config, DuplicatePolicy};
pub use controller::{Action, ActionMethod, Actions, Context, Controller, ControllerHandle, Lifecycle, Targets};
pub use error::{BindError, BindWarning, DescriptorError};
pub use registry::Registry;

// The DOM types appear throughout the public API
pub use tether_dom as dom;
pub use tether_dom::{Document, Event, NodeId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
