//! Identity context shared by every user-scoped view.
//!
//! DESIGN
//! ======
//! Identity is an explicit value handed to views instead of ambient global
//! state. The shell resolves it once on mount through an [`IdentityProvider`]
//! and invalidates it on sign-out; views ask the [`Session`] for an identity
//! right before issuing a user-scoped request.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Static message shown whenever identity resolution fails.
pub const IDENTITY_UNAVAILABLE: &str = "Could not identify user. Please sign in again.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("no signed-in user")]
    NotSignedIn,
    #[error("identity is missing a user id")]
    Incomplete,
    #[error("identity provider failed: {0}")]
    Provider(String),
}

/// A resolved user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Identity {
    /// Build an identity, rejecting blank user ids.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Incomplete`] when `user_id` is empty after trimming.
    pub fn new(user_id: &str) -> Result<Self, AuthError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(AuthError::Incomplete);
        }
        Ok(Self { user_id: user_id.to_owned(), display_name: None })
    }

    #[must_use]
    pub fn with_display_name(mut self, name: &str) -> Self {
        let name = name.trim();
        self.display_name = (!name.is_empty()).then(|| name.to_owned());
        self
    }

    /// Display name when known, otherwise the user id.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.user_id)
    }
}

/// Source of the current identity (browser storage, CLI flags, ...).
#[async_trait(?Send)]
pub trait IdentityProvider {
    async fn current_identity(&self) -> Result<Identity, AuthError>;
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Identity fixed at construction time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticIdentity {
    user_id: Option<String>,
}

impl StaticIdentity {
    #[must_use]
    pub fn new(user_id: Option<String>) -> Self {
        Self { user_id }
    }
}

#[async_trait(?Send)]
impl IdentityProvider for StaticIdentity {
    async fn current_identity(&self) -> Result<Identity, AuthError> {
        match self.user_id.as_deref() {
            Some(user_id) => Identity::new(user_id),
            None => Err(AuthError::NotSignedIn),
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }
}

/// Lifecycle of the identity context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Unresolved,
    Resolving,
    Resolved(Identity),
    Failed(AuthError),
}

impl Session {
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Resolved(identity) => Some(identity),
            _ => None,
        }
    }

    /// The identity a user-scoped request must carry.
    ///
    /// # Errors
    ///
    /// Returns the resolution error, or [`AuthError::NotSignedIn`] while
    /// resolution has not finished.
    pub fn require(&self) -> Result<&Identity, AuthError> {
        match self {
            Self::Resolved(identity) => Ok(identity),
            Self::Failed(error) => Err(error.clone()),
            Self::Unresolved | Self::Resolving => Err(AuthError::NotSignedIn),
        }
    }

    /// Resolution has finished, successfully or not.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Resolved(_) | Self::Failed(_))
    }

    /// Gated routes send the user to the login page once resolution finished
    /// without an identity.
    #[must_use]
    pub fn should_redirect_to_login(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn begin_resolve(&mut self) {
        *self = Self::Resolving;
    }

    pub fn finish_resolve(&mut self, result: Result<Identity, AuthError>) {
        *self = match result {
            Ok(identity) => {
                tracing::debug!(user_id = %identity.user_id, "identity resolved");
                Self::Resolved(identity)
            }
            Err(error) => {
                tracing::info!(%error, "identity unavailable");
                Self::Failed(error)
            }
        };
    }

    /// Resolve through `provider`, replacing any previous state.
    pub async fn resolve<P: IdentityProvider + ?Sized>(&mut self, provider: &P) {
        self.begin_resolve();
        let result = provider.current_identity().await;
        self.finish_resolve(result);
    }

    /// Drop the identity after sign-out.
    pub fn invalidate(&mut self) {
        *self = Self::Failed(AuthError::NotSignedIn);
    }
}
