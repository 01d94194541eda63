//! Resource and action descriptors
//!
//! Immutable values describing the path shape of a resource and the actions
//! it exposes. A nested resource holds an `Arc` to its parent descriptor, so
//! the nesting chain is acyclic and fixed at construction.

use super::actions::descriptors_for;
use super::client::ResourceClient;
use super::path::singularize;
use crate::http::HttpMethod;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default parameter key identifying a resource instance
pub const DEFAULT_ID_ATTRIBUTE: &str = "id";

/// Whether an action addresses one instance or the resource as a whole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Member,
    Collection,
}

/// Where an action comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionKind {
    /// One of the built-in CRUD actions
    Standard,
    /// A declared non-RESTful action; its name becomes a trailing path segment
    #[default]
    Custom,
}

/// Action definition, as declared by callers or manifests
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActionDescriptor {
    pub method: HttpMethod,
    pub name: String,
    #[serde(rename = "on")]
    pub scope: Scope,
    #[serde(skip)]
    pub kind: ActionKind,
}

impl ActionDescriptor {
    /// Declare a custom action
    pub fn custom(method: HttpMethod, name: impl Into<String>, scope: Scope) -> Self {
        Self {
            method,
            name: name.into(),
            scope,
            kind: ActionKind::Custom,
        }
    }

    pub(crate) fn standard(method: HttpMethod, name: &str, scope: Scope) -> Self {
        Self {
            method,
            name: name.to_string(),
            scope,
            kind: ActionKind::Standard,
        }
    }

    /// Trailing path segment contributed by this action
    pub fn path_suffix(&self) -> Option<&str> {
        match self.kind {
            ActionKind::Standard => None,
            ActionKind::Custom => Some(&self.name),
        }
    }
}

/// Options accepted when generating a resource
#[derive(Debug, Clone, Default)]
pub struct ResourceOptions {
    pub singular: bool,
    pub id_attribute: Option<String>,
    pub namespace: Option<String>,
    pub nest_under: Option<Arc<ResourceDescriptor>>,
    pub parent_param: Option<String>,
}

impl ResourceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singular(mut self, singular: bool) -> Self {
        self.singular = singular;
        self
    }

    pub fn id_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.id_attribute = Some(attribute.into());
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Nest every path of the new resource under `parent`'s instance path
    pub fn nest_under(mut self, parent: &ResourceClient) -> Self {
        self.nest_under = Some(parent.descriptor_arc());
        self
    }

    /// Override the key nested children use to address this resource
    pub fn parent_param(mut self, key: impl Into<String>) -> Self {
        self.parent_param = Some(key.into());
        self
    }
}

/// Immutable description of one resource type
#[derive(Debug, Clone)]
pub struct ResourceDescriptor {
    name: String,
    singular: bool,
    id_attribute: String,
    namespace: Option<String>,
    parent: Option<Arc<ResourceDescriptor>>,
    parent_param: Option<String>,
    actions: Vec<ActionDescriptor>,
}

impl ResourceDescriptor {
    pub fn new(
        name: impl Into<String>,
        options: ResourceOptions,
        custom_actions: &[ActionDescriptor],
    ) -> Self {
        let ResourceOptions {
            singular,
            id_attribute,
            namespace,
            nest_under,
            parent_param,
        } = options;

        Self {
            name: name.into(),
            singular,
            id_attribute: id_attribute.unwrap_or_else(|| DEFAULT_ID_ATTRIBUTE.to_string()),
            namespace: namespace.filter(|ns| !ns.is_empty()),
            parent: nest_under,
            parent_param,
            actions: descriptors_for(singular, custom_actions),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_singular(&self) -> bool {
        self.singular
    }

    pub fn id_attribute(&self) -> &str {
        &self.id_attribute
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn parent(&self) -> Option<&ResourceDescriptor> {
        self.parent.as_deref()
    }

    pub fn actions(&self) -> &[ActionDescriptor] {
        &self.actions
    }

    pub fn action(&self, name: &str) -> Option<&ActionDescriptor> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Ancestors of this resource, outermost first
    pub fn ancestors(&self) -> Vec<&ResourceDescriptor> {
        let mut chain = Vec::new();
        let mut current = self.parent();
        while let Some(ancestor) = current {
            chain.push(ancestor);
            current = ancestor.parent();
        }
        chain.reverse();
        chain
    }

    /// Parameter key nested children use to address an instance of this resource
    ///
    /// `rooms` with the default id attribute gives `roomId`; `slug` as the id
    /// attribute gives `roomSlug`.
    pub fn param_key(&self) -> String {
        if let Some(key) = &self.parent_param {
            return key.clone();
        }

        format!("{}{}", singularize(&self.name), capitalize(&self.id_attribute))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
