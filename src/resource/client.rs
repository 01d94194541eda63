//! Resource Client
//!
//! The object handed back by [`ResourceFactory::generate`]: a resource
//! descriptor plus its generated actions.
//!
//! [`ResourceFactory::generate`]: crate::factory::ResourceFactory::generate

use super::actions::{generate, Action, ActionSet};
use super::descriptor::ResourceDescriptor;
use crate::error::{ClientError, Result};
use crate::factory::FactoryConfig;
use crate::http::Headers;
use serde_json::Value;
use std::sync::Arc;

/// Client for one REST resource
#[derive(Debug, Clone)]
pub struct ResourceClient {
    descriptor: Arc<ResourceDescriptor>,
    actions: ActionSet,
}

impl ResourceClient {
    pub(crate) fn new(descriptor: ResourceDescriptor, config: Arc<FactoryConfig>) -> Self {
        let descriptor = Arc::new(descriptor);
        let actions = generate(Arc::clone(&descriptor), config);
        Self {
            descriptor,
            actions,
        }
    }

    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    pub(crate) fn descriptor_arc(&self) -> Arc<ResourceDescriptor> {
        Arc::clone(&self.descriptor)
    }

    pub fn actions(&self) -> &ActionSet {
        &self.actions
    }

    /// Look up an action by name
    pub fn action(&self, name: &str) -> Result<&Action> {
        self.actions.get(name).ok_or_else(|| ClientError::UnknownAction {
            resource: self.name().to_string(),
            action: name.to_string(),
        })
    }

    pub async fn call(&self, action: &str, params: Value) -> Result<Value> {
        self.action(action)?.call(params).await
    }

    pub async fn call_with_headers(
        &self,
        action: &str,
        params: Value,
        headers: Headers,
    ) -> Result<Value> {
        self.action(action)?.call_with_headers(params, headers).await
    }

    // =========================================================================
    // Standard actions
    // =========================================================================

    /// GET the collection (not available on singular resources)
    pub async fn get_collection(&self, params: Value) -> Result<Value> {
        self.call("getCollection", params).await
    }

    pub async fn get(&self, params: Value) -> Result<Value> {
        self.call("get", params).await
    }

    pub async fn post(&self, params: Value) -> Result<Value> {
        self.call("post", params).await
    }

    /// Alias of [`post`](Self::post)
    pub async fn create(&self, params: Value) -> Result<Value> {
        self.call("create", params).await
    }

    pub async fn put(&self, params: Value) -> Result<Value> {
        self.call("put", params).await
    }

    pub async fn patch(&self, params: Value) -> Result<Value> {
        self.call("patch", params).await
    }

    /// Alias of [`patch`](Self::patch)
    pub async fn update(&self, params: Value) -> Result<Value> {
        self.call("update", params).await
    }

    pub async fn delete(&self, params: Value) -> Result<Value> {
        self.call("delete", params).await
    }

    /// Alias of [`delete`](Self::delete)
    pub async fn destroy(&self, params: Value) -> Result<Value> {
        self.call("destroy", params).await
    }
}
