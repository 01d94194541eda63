//! HTTP layer
//!
//! - [`method`] - verbs an action can use
//! - [`query`] - query string and body serialization
//! - [`transport`] - the transport trait and the default reqwest transport

pub mod method;
pub mod query;
pub mod transport;

pub use method::HttpMethod;
pub use query::{to_body, to_query_pairs, to_query_string, Params};
pub use transport::{FetchOptions, Headers, ReqwestTransport, Request, Response, Transport};
