//! Action Generator
//!
//! Expands a resource descriptor into its set of callable actions. Each
//! [`Action`] closes over the resource descriptor and the factory
//! configuration and runs the full pipeline when called:
//! path resolution, `params_transform`, serialization, transport, then the
//! response side of the hook chain.

use super::descriptor::{ActionDescriptor, ActionKind, ResourceDescriptor, Scope};
use super::path::{self, Resolved};
use crate::error::{ClientError, Result};
use crate::factory::FactoryConfig;
use crate::http::{to_body, to_query_string, Headers, HttpMethod, Params, Request};
use serde_json::Value;
use std::sync::Arc;

/// Ordered action list for a resource: standard CRUD first, custom actions after
///
/// A custom action sharing a standard action's name replaces it in place.
pub fn descriptors_for(singular: bool, custom: &[ActionDescriptor]) -> Vec<ActionDescriptor> {
    let mut actions = Vec::with_capacity(9 + custom.len());

    if !singular {
        actions.push(ActionDescriptor::standard(
            HttpMethod::Get,
            "getCollection",
            Scope::Collection,
        ));
    }

    actions.extend([
        ActionDescriptor::standard(HttpMethod::Get, "get", Scope::Member),
        ActionDescriptor::standard(HttpMethod::Post, "post", Scope::Collection),
        ActionDescriptor::standard(HttpMethod::Post, "create", Scope::Collection),
        ActionDescriptor::standard(HttpMethod::Put, "put", Scope::Member),
        ActionDescriptor::standard(HttpMethod::Patch, "patch", Scope::Member),
        ActionDescriptor::standard(HttpMethod::Patch, "update", Scope::Member),
        ActionDescriptor::standard(HttpMethod::Delete, "delete", Scope::Member),
        ActionDescriptor::standard(HttpMethod::Delete, "destroy", Scope::Member),
    ]);

    for declared in custom {
        let action = ActionDescriptor {
            kind: ActionKind::Custom,
            ..declared.clone()
        };

        match actions.iter_mut().find(|a| a.name == action.name) {
            Some(existing) => *existing = action,
            None => actions.push(action),
        }
    }

    actions
}

/// Build the callable actions of a resource
pub fn generate(resource: Arc<ResourceDescriptor>, config: Arc<FactoryConfig>) -> ActionSet {
    let actions = resource
        .actions()
        .iter()
        .map(|descriptor| Action {
            descriptor: descriptor.clone(),
            resource: Arc::clone(&resource),
            config: Arc::clone(&config),
        })
        .collect();

    ActionSet { actions }
}

/// Callable actions of one resource, in declaration order
#[derive(Debug, Clone)]
pub struct ActionSet {
    actions: Vec<Action>,
}

impl ActionSet {
    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(Action::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// One generated operation on a resource
#[derive(Debug, Clone)]
pub struct Action {
    descriptor: ActionDescriptor,
    resource: Arc<ResourceDescriptor>,
    config: Arc<FactoryConfig>,
}

impl Action {
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn method(&self) -> HttpMethod {
        self.descriptor.method
    }

    pub fn scope(&self) -> Scope {
        self.descriptor.scope
    }

    pub fn descriptor(&self) -> &ActionDescriptor {
        &self.descriptor
    }

    /// Build the outgoing request without sending it
    ///
    /// Everything that can fail before the network is reached fails here:
    /// invalid params, missing path ids and `params_transform` errors.
    pub fn prepare(&self, params: Value, headers: &Headers) -> Result<Request> {
        let params = into_params(params)?;

        let Resolved { path, remaining } = path::resolve(
            &self.resource,
            params,
            self.descriptor.scope,
            self.descriptor.path_suffix(),
        )?;

        let remaining = self.config.hooks().transform_params(remaining)?;

        let method = self.descriptor.method;
        let mut url = self.config.url_for(&path);

        let body = if method.is_read() {
            let query = to_query_string(&remaining);
            if !query.is_empty() {
                url.push('?');
                url.push_str(&query);
            }
            None
        } else if method == HttpMethod::Delete && remaining.is_empty() {
            None
        } else {
            Some(to_body(&remaining))
        };

        Ok(Request {
            method,
            url,
            headers: self.config.merge_headers(body.is_some(), headers),
            body,
            options: self.config.fetch_opts().clone(),
        })
    }

    pub async fn call(&self, params: Value) -> Result<Value> {
        self.call_with_headers(params, Headers::new()).await
    }

    /// Run the action; per-call headers win over configured ones
    pub async fn call_with_headers(&self, params: Value, headers: Headers) -> Result<Value> {
        let request = self.prepare(params, &headers)?;

        tracing::debug!(
            "{}.{}: {} {}",
            self.resource.name(),
            self.name(),
            request.method,
            request.url
        );

        let response = self.config.transport().send(request).await?;
        self.config.hooks().process_response(response)
    }
}

fn into_params(value: Value) -> Result<Params> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Params::new()),
        Value::Array(_) => Err(ClientError::InvalidParams("an array")),
        Value::String(_) => Err(ClientError::InvalidParams("a string")),
        Value::Number(_) => Err(ClientError::InvalidParams("a number")),
        Value::Bool(_) => Err(ClientError::InvalidParams("a boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::ResourceFactory;
    use crate::resource::ResourceOptions;
    use serde_json::json;

    fn names(actions: &[ActionDescriptor]) -> Vec<&str> {
        actions.iter().map(|a| a.name.as_str()).collect()
    }

    fn factory() -> ResourceFactory {
        ResourceFactory::new("http://api.example.com/v1").unwrap()
    }

    #[test]
    fn test_standard_actions() {
        let actions = descriptors_for(false, &[]);
        assert_eq!(
            names(&actions),
            vec![
                "getCollection",
                "get",
                "post",
                "create",
                "put",
                "patch",
                "update",
                "delete",
                "destroy"
            ]
        );
        assert!(actions.iter().all(|a| a.kind == ActionKind::Standard));
    }

    #[test]
    fn test_singular_has_no_collection() {
        let actions = descriptors_for(true, &[]);
        assert!(!names(&actions).contains(&"getCollection"));
        assert_eq!(actions.len(), 8);
    }

    #[test]
    fn test_custom_actions_are_appended() {
        let login = ActionDescriptor::custom(HttpMethod::Post, "login", Scope::Collection);
        let actions = descriptors_for(false, &[login]);
        assert_eq!(actions.last().unwrap().name, "login");
        assert_eq!(actions.last().unwrap().path_suffix(), Some("login"));
    }

    #[test]
    fn test_custom_action_replaces_standard_name() {
        let custom = ActionDescriptor::custom(HttpMethod::Delete, "destroy", Scope::Collection);
        let actions = descriptors_for(false, &[custom]);
        let destroy: Vec<_> = actions.iter().filter(|a| a.name == "destroy").collect();
        assert_eq!(destroy.len(), 1);
        assert_eq!(destroy[0].scope, Scope::Collection);
        assert_eq!(destroy[0].kind, ActionKind::Custom);
    }

    #[test]
    fn test_aliases_prepare_identical_requests() {
        let users = factory().generate("users", ResourceOptions::new(), &[]);
        let params = json!({"id": 1, "email": "e@x.com"});

        let patch = users
            .action("patch")
            .unwrap()
            .prepare(params.clone(), &Headers::new())
            .unwrap();
        let update = users
            .action("update")
            .unwrap()
            .prepare(params, &Headers::new())
            .unwrap();
        assert_eq!(patch, update);
        assert_eq!(patch.url, "http://api.example.com/v1/users/1");
        assert_eq!(patch.body, Some(json!({"email": "e@x.com"})));
    }

    #[test]
    fn test_get_puts_params_in_query() {
        let users = factory().generate("users", ResourceOptions::new(), &[]);
        let request = users
            .action("getCollection")
            .unwrap()
            .prepare(json!({"page": 1}), &Headers::new())
            .unwrap();
        assert_eq!(request.url, "http://api.example.com/v1/users?page=1");
        assert!(request.body.is_none());
        assert!(!request.headers.contains_key("content-type"));
    }

    #[test]
    fn test_delete_without_params_has_no_body() {
        let users = factory().generate("users", ResourceOptions::new(), &[]);
        let action = users.action("delete").unwrap();

        let request = action.prepare(json!({"id": 1}), &Headers::new()).unwrap();
        assert!(request.body.is_none());

        let request = action.prepare(json!({"id": 1, "someParam": 2}), &Headers::new()).unwrap();
        assert_eq!(request.body, Some(json!({"someParam": 2})));
    }

    #[test]
    fn test_post_always_sends_body() {
        let user = factory().generate("user", ResourceOptions::new().singular(true), &[]);
        let request = user.action("create").unwrap().prepare(json!({}), &Headers::new()).unwrap();
        assert_eq!(request.url, "http://api.example.com/v1/user");
        assert_eq!(request.body, Some(json!({})));
        assert_eq!(request.headers["content-type"], "application/json");
    }

    #[test]
    fn test_null_params_are_empty() {
        let users = factory().generate("users", ResourceOptions::new(), &[]);
        let request = users
            .action("getCollection")
            .unwrap()
            .prepare(Value::Null, &Headers::new())
            .unwrap();
        assert_eq!(request.url, "http://api.example.com/v1/users");
    }

    #[test]
    fn test_non_object_params_are_rejected() {
        let users = factory().generate("users", ResourceOptions::new(), &[]);
        let err = users
            .action("getCollection")
            .unwrap()
            .prepare(json!([1, 2]), &Headers::new())
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidParams("an array")));
    }
}
