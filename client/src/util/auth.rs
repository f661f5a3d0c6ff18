//! Browser identity provider and shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The signed-in identity is kept in `localStorage` by the login page and
//! cleared on sign-out. Gated route components apply identical redirect
//! behavior through [`install_unauth_redirect`].

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use async_trait::async_trait;
use cloudlab::{AuthError, Identity, IdentityProvider, Session};
use leptos::prelude::*;
use leptos_router::NavigateOptions;

use super::storage;

/// `localStorage` key holding the signed-in identity.
pub const IDENTITY_KEY: &str = "cloudlab.identity";

/// Identity provider backed by browser storage.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalIdentity;

impl LocalIdentity {
    /// Persist a freshly entered identity.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Incomplete`] for a blank user id and
    /// [`AuthError::Provider`] when storage rejects the write.
    pub fn sign_in(user_id: &str, display_name: &str) -> Result<Identity, AuthError> {
        let identity = Identity::new(user_id)?.with_display_name(display_name);
        storage::save_json(IDENTITY_KEY, &identity).map_err(AuthError::Provider)?;
        Ok(identity)
    }
}

/// Validate whatever was found in storage.
fn identity_from_stored(stored: Option<Identity>) -> Result<Identity, AuthError> {
    let stored = stored.ok_or(AuthError::NotSignedIn)?;
    let identity = Identity::new(&stored.user_id)?;
    Ok(match stored.display_name {
        Some(name) => identity.with_display_name(&name),
        None => identity,
    })
}

#[async_trait(?Send)]
impl IdentityProvider for LocalIdentity {
    async fn current_identity(&self) -> Result<Identity, AuthError> {
        identity_from_stored(storage::load_json(IDENTITY_KEY))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        storage::remove(IDENTITY_KEY);
        Ok(())
    }
}

/// Whether a gated route should send the user to `/login`.
pub fn should_redirect_unauth(session: &Session) -> bool {
    session.should_redirect_to_login()
}

/// Redirect to `/login` whenever resolution has finished without an identity.
pub fn install_unauth_redirect<F>(session: RwSignal<Session>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if session.with(should_redirect_unauth) {
            navigate("/login", NavigateOptions::default());
        }
    });
}

/// Resolve the session from storage. Called once by the shell on mount.
pub fn resolve_session(session: RwSignal<Session>) {
    session.update(Session::begin_resolve);
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let result = LocalIdentity.current_identity().await;
        if let Err(error) = &result {
            leptos::logging::log!("identity unavailable: {error}");
        }
        session.update(|s| s.finish_resolve(result));
    });
    #[cfg(not(feature = "csr"))]
    session.update(|s| s.finish_resolve(Err(AuthError::NotSignedIn)));
}

/// Clear the stored identity and invalidate the session.
pub fn sign_out(session: RwSignal<Session>) {
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        if let Err(error) = LocalIdentity.sign_out().await {
            leptos::logging::warn!("sign-out failed: {error}");
        }
        session.update(Session::invalidate);
    });
    #[cfg(not(feature = "csr"))]
    session.update(Session::invalidate);
}
