//! Resource Manifest
//!
//! Declares many resources at once in a YAML or JSON file and builds them
//! into a registry of clients, resolving `nest_under` references by name.
//!
//! ```yaml
//! host: http://api.example.com/v1
//! fetch_opts:
//!   credentials: include
//! resources:
//!   rooms: {}
//!   users:
//!     nest_under: rooms
//!     actions:
//!       - { method: post, name: login, on: collection }
//!   profile:
//!     path: user
//!     singular: true
//!     namespace: admin
//! ```

use crate::error::{ClientError, Result};
use crate::factory::{ResourceFactory, ResourceFactoryBuilder};
use crate::resource::{ActionDescriptor, ResourceClient, ResourceOptions};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// One resource entry of a manifest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceDef {
    /// Path segment, when it differs from the entry's key
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub singular: bool,
    #[serde(default)]
    pub id_attribute: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    /// Key of the parent entry
    #[serde(default)]
    pub nest_under: Option<String>,
    #[serde(default)]
    pub parent_param: Option<String>,
    #[serde(default)]
    pub actions: Vec<ActionDescriptor>,
}

impl ResourceDef {
    fn options(&self) -> ResourceOptions {
        ResourceOptions {
            singular: self.singular,
            id_attribute: self.id_attribute.clone(),
            namespace: self.namespace.clone(),
            nest_under: None,
            parent_param: self.parent_param.clone(),
        }
    }
}

/// Root structure of a manifest file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub fetch_opts: Option<Value>,
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceDef>,
}

impl Manifest {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| ClientError::Config(format!("Failed to parse manifest YAML: {}", e)))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| ClientError::Config(format!("Failed to parse manifest JSON: {}", e)))
    }

    /// Load a manifest; `.json` files are read as JSON, anything else as YAML
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("Failed to read manifest {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Factory builder seeded with this manifest's host and fetch options
    ///
    /// `host` overrides the manifest's own host.
    pub fn factory_builder(&self, host: Option<&str>) -> Result<ResourceFactoryBuilder> {
        let host = host
            .map(str::to_string)
            .or_else(|| self.host.clone())
            .ok_or_else(|| ClientError::Config("No host configured".to_string()))?;

        let mut builder = ResourceFactory::builder(host);
        if let Some(options) = &self.fetch_opts {
            builder = builder.fetch_opts(options.clone());
        }
        Ok(builder)
    }

    /// Generate a client for every entry
    pub fn build(&self, factory: &ResourceFactory) -> Result<ResourceRegistry> {
        let mut registry = ResourceRegistry::default();
        let mut visiting = Vec::new();

        for key in self.resources.keys() {
            self.build_entry(key, factory, &mut registry, &mut visiting)?;
        }

        tracing::debug!("Built {} resources from manifest", registry.len());
        Ok(registry)
    }

    fn build_entry(
        &self,
        key: &str,
        factory: &ResourceFactory,
        registry: &mut ResourceRegistry,
        visiting: &mut Vec<String>,
    ) -> Result<ResourceClient> {
        if let Some(client) = registry.get(key) {
            return Ok(client.clone());
        }

        let Some(def) = self.resources.get(key) else {
            return Err(ClientError::Config(format!("Unknown resource \"{}\"", key)));
        };

        if visiting.iter().any(|k| k == key) {
            return Err(ClientError::Config(format!(
                "Nesting cycle through resource \"{}\"",
                key
            )));
        }
        visiting.push(key.to_string());

        let mut options = def.options();
        if let Some(parent_key) = &def.nest_under {
            if !self.resources.contains_key(parent_key) {
                return Err(ClientError::Config(format!(
                    "Resource \"{}\" is nested under unknown resource \"{}\"",
                    key, parent_key
                )));
            }
            let parent = self.build_entry(parent_key, factory, registry, visiting)?;
            options = options.nest_under(&parent);
        }

        visiting.pop();

        let name = def.path.as_deref().unwrap_or(key);
        let client = factory.generate(name, options, &def.actions);
        registry.clients.insert(key.to_string(), client.clone());
        Ok(client)
    }
}

/// Clients built from a manifest, by entry key
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    clients: BTreeMap<String, ResourceClient>,
}

impl ResourceRegistry {
    pub fn get(&self, key: &str) -> Option<&ResourceClient> {
        self.clients.get(key)
    }

    /// Entry keys, sorted (for help output and autocomplete)
    pub fn names(&self) -> Vec<&str> {
        self.clients.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
