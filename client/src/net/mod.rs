//! Networking: the browser transport for the experiment API.

pub mod api;
