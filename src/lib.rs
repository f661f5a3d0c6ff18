//! # cloudlab
//!
//! Shared core for the CloudLab experiment workbench.
//!
//! The Differential Evolution engine runs behind a remote HTTP API. This crate
//! owns everything the frontends need to talk to it: the experiment data model,
//! the response envelope decoder, an API client generic over a [`api::Transport`],
//! the identity context, and the per-view workflow state machines. It performs
//! no I/O of its own; the browser client plugs in a `gloo-net` transport and the
//! CLI a `reqwest` one.

pub mod api;
pub mod config;
pub mod envelope;
pub mod identity;
pub mod model;
pub mod workflow;

#[cfg(test)]
mod testing;

pub use api::{ApiError, ApiRequest, ApiResponse, ExperimentClient, Method, Transport, TransportError};
pub use config::{ApiConfig, ConfigError};
pub use identity::{AuthError, Identity, IdentityProvider, Session};
pub use model::{AdvanceRequest, AdvanceResponse, Experiment, Goal, NewExperiment, Population, Variable, VariableKind};
