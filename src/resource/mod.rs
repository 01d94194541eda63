//! Resource abstraction layer
//!
//! Resources are described declaratively (name, nesting, namespace,
//! singularity, id attribute, custom actions) and expanded into clients whose
//! actions build and send the matching HTTP requests.
//!
//! # Architecture
//!
//! - [`descriptor`] - immutable resource and action descriptors
//! - [`path`] - resolves the URL path of a call, consuming id params
//! - [`actions`] - generates the callable actions of a resource
//! - [`client`] - the resource client handed to callers
//!
//! # Example
//!
//! ```ignore
//! use restmint::{ResourceFactory, ResourceOptions};
//! use serde_json::json;
//!
//! async fn rename(factory: &ResourceFactory) -> restmint::Result<serde_json::Value> {
//!     let rooms = factory.generate("rooms", ResourceOptions::new(), &[]);
//!     let users = factory.generate("users", ResourceOptions::new().nest_under(&rooms), &[]);
//!     // PATCH /rooms/1/users/1 with body {"user": {"name": "Alex"}}
//!     users.update(json!({"roomId": 1, "id": 1, "user": {"name": "Alex"}})).await
//! }
//! ```

pub mod actions;
pub mod client;
pub mod descriptor;
pub mod path;

pub use actions::{Action, ActionSet};
pub use client::ResourceClient;
pub use descriptor::{ActionDescriptor, ActionKind, ResourceDescriptor, ResourceOptions, Scope};
pub use path::{resolve, Resolved};
