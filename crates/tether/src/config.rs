//! Registry Configuration

/// What `Registry::register` does when an identifier is registered twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail with `BindError::AlreadyRegistered`
    #[default]
    Reject,
    /// Bind again; every action then has one listener per registration
    Allow,
}

/// Registry configuration options
#[derive(Debug, Clone)]
pub struct Config {
    /// Prefix shared by every attribute the binder reads
    pub attribute_prefix: String,

    /// Policy for repeated registration of one identifier
    pub on_duplicate: DuplicatePolicy,
}

impl Config {
    /// Attribute listing the identifiers an element roots (`data-controller`)
    pub fn controller_attribute(&self) -> String {
        format!("{}-controller", self.attribute_prefix)
    }

    /// Attribute holding action descriptors (`data-action`)
    pub fn action_attribute(&self) -> String {
        format!("{}-action", self.attribute_prefix)
    }

    /// Attribute naming a target of `identifier` (`data-<identifier>-target`)
    pub fn target_attribute(&self, identifier: &str) -> String {
        format!("{}-{}-target", self.attribute_prefix, identifier)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            attribute_prefix: "data".to_string(),
            on_duplicate: DuplicatePolicy::Reject,
        }
    }
}
