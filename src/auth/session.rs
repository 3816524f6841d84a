//! Session management: the current user identity and the login, signup and
//! logout flows backing it.
//!
//! Expected authentication failures (wrong password, taken email) come back
//! as outcome values, never as errors: the UI renders a message and moves on.
//! Transport and backend failures are logged and collapsed into the generic
//! failure outcome.

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::{Role, User};

use super::intent::IntentStore;
use super::tokens::TokenStore;

/// Result of a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    /// Wrong email or password. Deliberately not more specific, so the UI
    /// cannot leak which field was wrong.
    InvalidCredentials,
    /// Transport or backend failure; worth retrying later.
    Failed,
}

/// Result of a signup attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupOutcome {
    Success,
    /// The email is already registered; shown distinctly from other failures.
    AlreadyExists,
    Failed,
}

#[derive(Clone)]
pub struct SessionManager {
    api: ApiClient,
    tokens: TokenStore,
    intents: IntentStore,
    user: Arc<Mutex<Option<User>>>,
}

impl SessionManager {
    pub fn new(api: ApiClient, tokens: TokenStore, intents: IntentStore) -> Self {
        Self {
            api,
            tokens,
            intents,
            user: Arc::new(Mutex::new(None)),
        }
    }

    /// Authenticate with the backend, store the issued credential pair and
    /// fetch the user identity.
    pub async fn login(&self, email: &str, password: &str) -> LoginOutcome {
        let pair = match self.api.login(email, password).await {
            Ok(pair) => pair,
            Err(ApiError::Unauthorized) => return LoginOutcome::InvalidCredentials,
            Err(ApiError::Api { status, .. }) if (400..=422).contains(&status) => {
                return LoginOutcome::InvalidCredentials;
            }
            Err(e) => {
                warn!(error = %e, "Login request failed");
                return LoginOutcome::Failed;
            }
        };

        self.tokens.set(&pair.access_token, pair.refresh_token.as_deref());

        match self.api.me().await {
            Ok(resp) => {
                *self.user.lock().expect("session lock poisoned") = Some(resp.into());
                LoginOutcome::Success
            }
            Err(e) => {
                warn!(error = %e, "Fetching user after login failed");
                self.tokens.clear();
                LoginOutcome::Failed
            }
        }
    }

    /// Create an account, then log in with the same credentials. The
    /// username is derived from the email local part, as the storefront
    /// collects only email and password.
    pub async fn signup(&self, email: &str, password: &str) -> SignupOutcome {
        let username = email.split('@').next().unwrap_or(email);

        match self.api.create_user(email, username, password).await {
            Ok(_) => {}
            Err(e) if is_already_exists(&e) => return SignupOutcome::AlreadyExists,
            Err(e) => {
                warn!(error = %e, "Signup request failed");
                return SignupOutcome::Failed;
            }
        }

        match self.login(email, password).await {
            LoginOutcome::Success => SignupOutcome::Success,
            _ => SignupOutcome::Failed,
        }
    }

    /// Tear down the session. Backend revocation is best-effort; local state
    /// (credentials, user, any pending intent) is always cleared.
    pub async fn logout(&self) {
        if self.tokens.access().is_some() {
            if let Err(e) = self.api.logout().await {
                debug!(error = %e, "Backend logout failed, continuing local teardown");
            }
            if let Err(e) = self.api.logout_refresh().await {
                debug!(error = %e, "Refresh revocation failed, continuing local teardown");
            }
        }
        self.tokens.clear();
        *self.user.lock().expect("session lock poisoned") = None;
        self.intents.clear();
    }

    /// Rehydrate the session from persisted credentials, e.g. after a
    /// reload. Returns whether a session is now present. Stale credentials
    /// are cleared silently.
    pub async fn restore(&self) -> bool {
        if self.tokens.access().is_none() && self.tokens.refresh().is_none() {
            return false;
        }
        match self.api.me().await {
            Ok(resp) => {
                *self.user.lock().expect("session lock poisoned") = Some(resp.into());
                true
            }
            Err(ApiError::Unauthorized) => {
                debug!("Persisted credentials no longer valid");
                self.tokens.clear();
                false
            }
            Err(e) => {
                warn!(error = %e, "Session restore failed");
                false
            }
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.lock().expect("session lock poisoned").clone()
    }

    /// Derived, never independently settable.
    pub fn is_authenticated(&self) -> bool {
        self.user.lock().expect("session lock poisoned").is_some()
    }

    /// Derived: a session is present and its role is admin.
    pub fn is_admin(&self) -> bool {
        self.user
            .lock()
            .expect("session lock poisoned")
            .as_ref()
            .map(|u| u.role == Role::Admin)
            .unwrap_or(false)
    }

    pub(crate) fn intents(&self) -> &IntentStore {
        &self.intents
    }
}

/// The backend reports a taken email as a 409, but older deployments answer
/// with a 400 and a prose detail; accept both shapes.
fn is_already_exists(error: &ApiError) -> bool {
    let ApiError::Api {
        status,
        reason,
        body,
    } = error
    else {
        return false;
    };
    if *status == 409 {
        return true;
    }
    if !(400..500).contains(status) {
        return false;
    }
    let mut text = reason.to_lowercase();
    if let Some(body) = body {
        text.push_str(&body.to_string().to_lowercase());
    }
    text.contains("already")
}
