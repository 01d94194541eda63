//! Hook Chain
//!
//! Optional transforms applied at fixed points of every call:
//!
//! 1. `params_transform` - remaining params after path resolution
//! 2. `before_error` - classifies the raw response, rejecting failures
//! 3. `response_handler` - decodes the response body
//! 4. `before_success` - post-processes the decoded payload
//!
//! Unset hooks fall back to the defaults below, so the pipeline never has
//! to branch on whether a hook was configured.

use crate::error::{ClientError, Result};
use crate::http::{Params, Response};
use reqwest::StatusCode;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

pub type ParamsTransform = Arc<dyn Fn(Params) -> Result<Params> + Send + Sync>;
pub type BeforeError = Arc<dyn Fn(Response) -> Result<Response> + Send + Sync>;
pub type ResponseHandler = Arc<dyn Fn(&Response) -> Result<Value> + Send + Sync>;
pub type BeforeSuccess = Arc<dyn Fn(Value) -> Result<Value> + Send + Sync>;

/// The configured hooks of a factory
#[derive(Clone)]
pub struct Hooks {
    pub params_transform: ParamsTransform,
    pub before_error: BeforeError,
    pub response_handler: ResponseHandler,
    pub before_success: BeforeSuccess,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            params_transform: Arc::new(|params: Params| -> Result<Params> { Ok(params) }),
            before_error: Arc::new(reject_non_success),
            response_handler: Arc::new(Response::json),
            before_success: Arc::new(|data: Value| -> Result<Value> { Ok(data) }),
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks").finish_non_exhaustive()
    }
}

impl Hooks {
    pub(crate) fn transform_params(&self, params: Params) -> Result<Params> {
        tracing::trace!("hook: params_transform");
        (self.params_transform)(params)
    }

    /// Run the response side of the chain: classify, decode, post-process
    pub(crate) fn process_response(&self, response: Response) -> Result<Value> {
        tracing::trace!("hook: before_error (status {})", response.status());
        let response = (self.before_error)(response)?;

        tracing::trace!("hook: response_handler");
        let data = (self.response_handler)(&response)?;

        tracing::trace!("hook: before_success");
        (self.before_success)(data)
    }
}

/// Default classification: anything outside 2xx is a failure
pub fn reject_non_success(response: Response) -> Result<Response> {
    if response.is_success() {
        return Ok(response);
    }

    Err(ClientError::Status {
        status: response.status(),
        response: Box::new(response),
    })
}

/// Reject non-2xx responses with the status reason as the message
///
/// A 401 fails with `"Unauthorized"`; the raw response stays attached to the
/// error.
pub fn reject_with_status_text(response: Response) -> Result<Response> {
    if response.is_success() {
        return Ok(response);
    }

    let message = response.status_text();
    Err(ClientError::application(message, response))
}

/// Decode JSON, except for 204 which yields an empty object
pub fn empty_on_no_content(response: &Response) -> Result<Value> {
    if response.status() == StatusCode::NO_CONTENT {
        return Ok(Value::Object(Map::new()));
    }

    response.json()
}
