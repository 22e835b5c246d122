//! # Action Client
//!
//! Request/response plumbing to the two controller endpoints. Every call is
//! a form-encoded POST carrying an `action` key; every reply is a JSON object.

pub mod http;
pub mod poller;
pub mod transport;
pub mod types;

pub use http::{DEFAULT_APPLIANCE_URL, DEFAULT_SYSTEM_URL, HttpActionClient};
pub use transport::ActionTransport;
pub use types::{
    ACTION_KEY, ActionRequest, ActionResponse, ERROR_KEY, Endpoint, Params, Scalar, TransportError, param,
};
