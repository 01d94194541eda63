//! Path Resolver
//!
//! Builds the concrete URL path of a call from a resource descriptor and the
//! call params. Every param consumed as a path segment is removed from the
//! returned set so it does not leak into the query string or body.

use super::descriptor::{ResourceDescriptor, Scope};
use crate::error::{ClientError, Result};
use crate::http::Params;
use serde_json::Value;

/// Resolved path plus the params left for the query string or body
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub path: String,
    pub remaining: Params,
}

/// Resolve the path of an action on `descriptor`
///
/// Ancestors contribute `[/namespace]/name/<id>` outermost first, then the
/// resource itself contributes `[/namespace]/name`, its own id for
/// member-scope actions on non-singular resources, and finally the custom
/// action `suffix` if any.
pub fn resolve(
    descriptor: &ResourceDescriptor,
    params: Params,
    scope: Scope,
    suffix: Option<&str>,
) -> Result<Resolved> {
    let mut remaining = params;
    let mut path = String::new();

    for ancestor in descriptor.ancestors() {
        push_resource(&mut path, ancestor);

        if !ancestor.is_singular() {
            let id = take_id(&mut remaining, &ancestor.param_key())?;
            push_segment(&mut path, &urlencoding::encode(&id));
        }
    }

    push_resource(&mut path, descriptor);

    if scope == Scope::Member && !descriptor.is_singular() {
        let id = take_id(&mut remaining, descriptor.id_attribute())?;
        push_segment(&mut path, &urlencoding::encode(&id));
    }

    if let Some(suffix) = suffix {
        push_segment(&mut path, suffix);
    }

    Ok(Resolved { path, remaining })
}

/// Naive English singular, enough for conventional REST collection names
pub fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{}y", stem);
        }
    }

    for suffix in ["sses", "shes", "ches", "xes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }

    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }

    word.strip_suffix('s').unwrap_or(word).to_string()
}

fn push_resource(path: &mut String, descriptor: &ResourceDescriptor) {
    if let Some(namespace) = descriptor.namespace() {
        push_segment(path, namespace);
    }
    push_segment(path, descriptor.name());
}

fn push_segment(path: &mut String, segment: &str) {
    path.push('/');
    path.push_str(segment.trim_matches('/'));
}

fn take_id(params: &mut Params, key: &str) -> Result<String> {
    match params.shift_remove(key) {
        None | Some(Value::Null) => Err(ClientError::MissingParameter(key.to_string())),
        Some(Value::String(id)) => Ok(id),
        Some(id @ (Value::Number(_) | Value::Bool(_))) => Ok(id.to_string()),
        Some(_) => Err(ClientError::InvalidParameter {
            name: key.to_string(),
        }),
    }
}
