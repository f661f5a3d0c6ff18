//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped workflow state in an `RwSignal`, drives its
//! network calls with `spawn_local`, and delegates rendering details to
//! `components`.

pub mod experiments;
pub mod landing;
pub mod login;
pub mod new_experiment;
pub mod ongoing;
