//! Resource Factory
//!
//! Holds the process-wide configuration (host, hooks, fetch options,
//! transport) and generates resource clients on demand. The configuration is
//! frozen behind an `Arc` once built and shared by every client.

use crate::error::{ClientError, Result};
use crate::hooks::Hooks;
use crate::http::{FetchOptions, Headers, Params, ReqwestTransport, Response, Transport};
use crate::resource::{ActionDescriptor, ResourceClient, ResourceDescriptor, ResourceOptions};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Immutable configuration shared by every client of a factory
pub struct FactoryConfig {
    host: String,
    hooks: Hooks,
    fetch_opts: FetchOptions,
    default_headers: Headers,
    transport: Arc<dyn Transport>,
}

impl FactoryConfig {
    /// Base URL every path is appended to, without a trailing slash
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    pub fn fetch_opts(&self) -> &FetchOptions {
        &self.fetch_opts
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    pub(crate) fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }

    /// JSON defaults, then `fetch_opts.headers`, then per-call headers
    ///
    /// Names are compared lowercased. Per-call names that differ only in case
    /// collapse in map order.
    pub(crate) fn merge_headers(&self, has_body: bool, call: &Headers) -> Headers {
        let mut headers = Headers::new();
        headers.insert("accept".to_string(), "application/json".to_string());
        if has_body {
            headers.insert("content-type".to_string(), "application/json".to_string());
        }

        headers.extend(self.default_headers.clone());
        headers.extend(
            call.iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value.clone())),
        );
        headers
    }
}

impl fmt::Debug for FactoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryConfig")
            .field("host", &self.host)
            .field("fetch_opts", &self.fetch_opts)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ResourceFactory`]
pub struct ResourceFactoryBuilder {
    host: String,
    hooks: Hooks,
    fetch_opts: Value,
    transport: Option<Arc<dyn Transport>>,
}

impl ResourceFactoryBuilder {
    /// Transform the params left after path resolution
    pub fn params_transform<F>(mut self, hook: F) -> Self
    where
        F: Fn(Params) -> Result<Params> + Send + Sync + 'static,
    {
        self.hooks.params_transform = Arc::new(hook);
        self
    }

    /// Post-process every successfully decoded payload
    pub fn before_success<F>(mut self, hook: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.hooks.before_success = Arc::new(hook);
        self
    }

    /// Classify raw responses; return `Err` to reject the call
    pub fn before_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(Response) -> Result<Response> + Send + Sync + 'static,
    {
        self.hooks.before_error = Arc::new(hook);
        self
    }

    /// Decode raw responses into the payload handed to `before_success`
    pub fn response_handler<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Response) -> Result<Value> + Send + Sync + 'static,
    {
        self.hooks.response_handler = Arc::new(hook);
        self
    }

    /// Options passed verbatim to the transport on every call
    ///
    /// A `headers` object inside is merged into every request below per-call
    /// headers.
    pub fn fetch_opts(mut self, options: Value) -> Self {
        self.fetch_opts = options;
        self
    }

    pub fn transport<T>(mut self, transport: T) -> Self
    where
        T: Transport + 'static,
    {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn build(self) -> Result<ResourceFactory> {
        let host = self.host.trim().trim_end_matches('/').to_string();

        let url = Url::parse(&host).map_err(|source| ClientError::InvalidHost {
            host: host.clone(),
            source,
        })?;
        if url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "host \"{}\" cannot be used as a base URL",
                host
            )));
        }

        let fetch_opts = match self.fetch_opts {
            Value::Object(map) => map,
            Value::Null => FetchOptions::new(),
            _ => {
                return Err(ClientError::Config(
                    "fetch_opts must be a JSON object".to_string(),
                ))
            },
        };
        let default_headers = headers_from_options(&fetch_opts)?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::from_options(&fetch_opts)?),
        };

        tracing::debug!("Resource factory configured for {}", host);

        Ok(ResourceFactory {
            config: Arc::new(FactoryConfig {
                host,
                hooks: self.hooks,
                fetch_opts,
                default_headers,
                transport,
            }),
        })
    }
}

/// Generates resource clients against a single host
#[derive(Debug, Clone)]
pub struct ResourceFactory {
    config: Arc<FactoryConfig>,
}

impl ResourceFactory {
    /// Factory with default hooks and the reqwest transport
    pub fn new(host: impl Into<String>) -> Result<Self> {
        Self::builder(host).build()
    }

    pub fn builder(host: impl Into<String>) -> ResourceFactoryBuilder {
        ResourceFactoryBuilder {
            host: host.into(),
            hooks: Hooks::default(),
            fetch_opts: Value::Null,
            transport: None,
        }
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    pub fn host(&self) -> &str {
        self.config.host()
    }

    /// Generate a client for the resource `name`
    pub fn generate(
        &self,
        name: &str,
        options: ResourceOptions,
        custom_actions: &[ActionDescriptor],
    ) -> ResourceClient {
        let descriptor = ResourceDescriptor::new(name, options, custom_actions);
        ResourceClient::new(descriptor, Arc::clone(&self.config))
    }
}

fn headers_from_options(options: &FetchOptions) -> Result<Headers> {
    let Some(value) = options.get("headers") else {
        return Ok(Headers::new());
    };

    let Value::Object(map) = value else {
        return Err(ClientError::Config(
            "fetch_opts.headers must be an object".to_string(),
        ));
    };

    map.iter()
        .map(|(name, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(_) | Value::Bool(_) => value.to_string(),
                _ => {
                    return Err(ClientError::Config(format!(
                        "fetch_opts header \"{}\" must be a string",
                        name
                    )))
                },
            };
            Ok((name.to_ascii_lowercase(), value))
        })
        .collect()
}
