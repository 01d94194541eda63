//! restmint - declarative REST API clients
//!
//! Describe a resource (name, nesting, namespace, singularity, id attribute,
//! custom actions) and get back a client whose actions build the right HTTP
//! request, send it through a pluggable transport and run the response
//! through configurable hooks.
//!
//! # Module Structure
//!
//! - [`factory`] - process-wide configuration and client generation
//! - [`resource`] - descriptors, path resolution and action generation
//! - [`hooks`] - the request/response hook chain
//! - [`http`] - serialization and the transport seam
//! - [`manifest`] - resources declared in YAML/JSON files
//!
//! # Example
//!
//! ```ignore
//! use restmint::{hooks, ActionDescriptor, HttpMethod, ResourceFactory, ResourceOptions, Scope};
//! use serde_json::json;
//!
//! async fn example() -> restmint::Result<()> {
//!     let factory = ResourceFactory::builder("http://api.example.com/v1")
//!         .before_error(hooks::reject_with_status_text)
//!         .build()?;
//!
//!     let login = ActionDescriptor::custom(HttpMethod::Post, "login", Scope::Collection);
//!     let users = factory.generate("users", ResourceOptions::new(), &[login]);
//!
//!     let token = users.call("login", json!({"email": "e@x.com", "password": "123"})).await?;
//!     let page = users.get_collection(json!({"page": 1})).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod factory;
pub mod hooks;
pub mod http;
pub mod manifest;
pub mod resource;

pub use error::{ClientError, Result};
pub use factory::{FactoryConfig, ResourceFactory, ResourceFactoryBuilder};
pub use hooks::Hooks;
pub use http::{FetchOptions, Headers, HttpMethod, Params, Request, Response, Transport};
pub use manifest::{Manifest, ResourceRegistry};
pub use resource::{
    Action, ActionDescriptor, ActionSet, ResourceClient, ResourceDescriptor, ResourceOptions,
    Scope,
};
