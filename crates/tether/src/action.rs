//! Action descriptors
//!
//! The `data-action` micro-syntax: `event->identifier#method`. An attribute
//! may hold several descriptors separated by whitespace.

use std::fmt;
use std::str::FromStr;

use crate::DescriptorError;

/// One parsed `event->identifier#method` descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub event: String,
    pub identifier: String,
    pub method: String,
}

impl ActionDescriptor {
    /// Parse a single descriptor
    pub fn parse(s: &str) -> Result<Self, DescriptorError> {
        let s = s.trim();
        let (event, rest) = s.split_once("->").ok_or(DescriptorError::MissingArrow)?;
        let (identifier, method) = rest.split_once('#').ok_or(DescriptorError::MissingHash)?;

        let (event, identifier, method) = (event.trim(), identifier.trim(), method.trim());
        if event.is_empty() {
            return Err(DescriptorError::EmptyEvent);
        }
        if identifier.is_empty() {
            return Err(DescriptorError::EmptyIdentifier);
        }
        if method.is_empty() {
            return Err(DescriptorError::EmptyMethod);
        }

        Ok(Self {
            event: event.to_string(),
            identifier: identifier.to_string(),
            method: method.to_string(),
        })
    }

    /// Parse every whitespace-separated descriptor in an attribute value
    ///
    /// Yields the raw token alongside its result so failures can be
    /// reported verbatim.
    pub fn parse_all(value: &str) -> impl Iterator<Item = (&str, Result<Self, DescriptorError>)> {
        value.split_whitespace().map(|token| (token, Self::parse(token)))
    }
}

impl FromStr for ActionDescriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}#{}", self.event, self.identifier, self.method)
    }
}
