//! Client for the remote experiment API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` is the seam each frontend implements (`gloo-net` in the
//! browser, `reqwest` in the CLI). `client` turns experiment operations into
//! transport requests and decodes the responses.

mod client;
mod transport;

pub use client::{ApiError, ExperimentClient};
pub use transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};
