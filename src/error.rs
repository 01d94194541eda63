//! Client Errors
//!
//! Every failure a generated action can produce, from contract violations
//! caught before the request leaves the process to errors classified from
//! the server's response.

use crate::http::Response;
use reqwest::StatusCode;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors returned by resource clients and the factory
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A path parameter required by the action is absent from the call params
    #[error("You must provide \"{0}\" in params")]
    MissingParameter(String),

    /// A path parameter is present but cannot become a path segment
    #[error("Parameter \"{name}\" must be a string, number or boolean to be used in a path")]
    InvalidParameter { name: String },

    /// Call params were not a JSON object
    #[error("Params must be a JSON object, got {0}")]
    InvalidParams(&'static str),

    #[error("Unknown action \"{action}\" on resource \"{resource}\"")]
    UnknownAction { resource: String, action: String },

    #[error("Invalid host \"{host}\": {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The transport itself failed (connection refused, DNS, TLS...)
    #[error("Transport failure: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),

    /// Raised by an error-classifying hook
    #[error("{message}")]
    Application {
        message: String,
        response: Option<Box<Response>>,
    },

    /// Default classification of a non-2xx response
    #[error("Request failed with status {status}")]
    Status {
        status: StatusCode,
        response: Box<Response>,
    },

    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ClientError {
    /// Build an application error that keeps the raw response for inspection
    pub fn application(message: impl Into<String>, response: Response) -> Self {
        Self::Application {
            message: message.into(),
            response: Some(Box::new(response)),
        }
    }

    /// Wrap any transport-level error
    pub fn transport<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(error))
    }

    /// The response attached to this error, if the server answered at all
    pub fn response(&self) -> Option<&Response> {
        match self {
            Self::Application { response, .. } => response.as_deref(),
            Self::Status { response, .. } => Some(&**response),
            _ => None,
        }
    }

    /// HTTP status of the attached response
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(Response::status)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        Self::transport(error)
    }
}
