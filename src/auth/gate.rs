//! The auth gate: the checkpoint in front of actions that need a session.
//!
//! Gated actions call `require_auth`. Authenticated users pass straight
//! through; anonymous users get their action parked in the intent store and
//! a sign-in prompt raised. The prompt is a two-state machine:
//!
//! ```text
//! Idle -> Shown(context)   on require_auth while anonymous
//! Shown -> Idle            on confirm (intent kept) or cancel (intent dropped)
//! ```
//!
//! The context tag only selects prompt copy; it never influences what happens
//! after authentication.

use std::sync::{Arc, Mutex};

use crate::nav::Route;

use super::intent::{Intent, IntentStore};
use super::session::SessionManager;

/// What the prompt is about, for copy selection only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptContext {
    Cart,
    Profile,
    Favorite,
    Upload,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    Idle,
    Shown(PromptContext),
}

/// Outcome of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// A session exists; the caller performs the action immediately.
    Allowed,
    /// The action was parked and a prompt raised; the caller stops here.
    Deferred,
}

/// Headline and message for the sign-in prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptCopy {
    pub headline: &'static str,
    pub message: &'static str,
}

#[derive(Clone)]
pub struct AuthGate {
    session: SessionManager,
    intents: IntentStore,
    state: Arc<Mutex<PromptState>>,
}

impl AuthGate {
    pub fn new(session: SessionManager, intents: IntentStore) -> Self {
        Self {
            session,
            intents,
            state: Arc::new(Mutex::new(PromptState::Idle)),
        }
    }

    /// Check whether `intent` may run now. If not, park it and raise the
    /// prompt with the given context.
    pub fn require_auth(&self, intent: Intent, context: PromptContext) -> GateDecision {
        if self.session.is_authenticated() {
            return GateDecision::Allowed;
        }
        self.intents.set(intent);
        *self.state.lock().expect("gate lock poisoned") = PromptState::Shown(context);
        GateDecision::Deferred
    }

    /// The user chose to sign in: hide the prompt, keep the parked intent,
    /// and hand back the route to the authentication entry point.
    pub fn confirm_prompt(&self) -> Route {
        *self.state.lock().expect("gate lock poisoned") = PromptState::Idle;
        Route::Login
    }

    /// The user dismissed the prompt: hide it and drop the parked intent so
    /// it cannot resurface after a later, unrelated login.
    pub fn cancel_prompt(&self) {
        *self.state.lock().expect("gate lock poisoned") = PromptState::Idle;
        self.intents.clear();
    }

    pub fn prompt(&self) -> PromptState {
        *self.state.lock().expect("gate lock poisoned")
    }

    /// Prompt copy for a context.
    pub fn prompt_copy(context: PromptContext) -> PromptCopy {
        match context {
            PromptContext::Cart => PromptCopy {
                headline: "Sign in to save this piece",
                message: "Create an account or sign in to add pieces to your bag.",
            },
            PromptContext::Profile => PromptCopy {
                headline: "Sign in to view your profile",
                message: "Access your profile, orders, and saved pieces.",
            },
            PromptContext::Favorite => PromptCopy {
                headline: "Sign in to save this piece",
                message: "Create an account or sign in to save pieces for later.",
            },
            PromptContext::Upload => PromptCopy {
                headline: "Create an account to sell your piece",
                message: "Join our curated community of sellers and share your pieces.",
            },
            PromptContext::Message => PromptCopy {
                headline: "Sign in to contact the seller",
                message: "Create an account or sign in to message sellers.",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::transport::scripted::ScriptedTransport;
    use crate::api::ApiClient;
    use crate::auth::tokens::TokenStore;

    const LOGIN_OK: &str = r#"{"access_token":"acc-1","refresh_token":"ref-1"}"#;
    const ME_OK: &str = r#"{
        "id": "auth-user-001",
        "email": "anna.larsson@example.com",
        "username": "anna.larsson",
        "role": "user",
        "is_active": true,
        "created_at": "2023-09-12T08:00:00Z",
        "updated_at": "2024-01-05T10:30:00Z"
    }"#;

    fn gate_with(transport: Arc<ScriptedTransport>) -> (AuthGate, SessionManager, IntentStore) {
        let tokens = TokenStore::in_memory();
        let api = ApiClient::with_transport("http://test", tokens.clone(), transport);
        let intents = IntentStore::new();
        let session = SessionManager::new(api, tokens, intents.clone());
        let gate = AuthGate::new(session.clone(), intents.clone());
        (gate, session, intents)
    }

    #[test]
    fn test_anonymous_action_is_deferred() {
        let (gate, _, intents) = gate_with(Arc::new(ScriptedTransport::new()));

        let decision = gate.require_auth(
            Intent::AddToCart {
                product_id: "vtg-001".to_string(),
            },
            PromptContext::Cart,
        );
        assert_eq!(decision, GateDecision::Deferred);
        assert_eq!(gate.prompt(), PromptState::Shown(PromptContext::Cart));
        assert!(intents.is_pending());
    }

    #[tokio::test]
    async fn test_authenticated_action_passes_through() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push(200, LOGIN_OK);
        transport.push(200, ME_OK);
        let (gate, session, intents) = gate_with(transport);
        session.login("anna.larsson@example.com", "secret1").await;

        let decision = gate.require_auth(Intent::VisitProfile, PromptContext::Profile);
        assert_eq!(decision, GateDecision::Allowed);
        assert_eq!(gate.prompt(), PromptState::Idle);
        assert!(!intents.is_pending());
    }

    #[test]
    fn test_cancel_clears_intent() {
        let (gate, _, intents) = gate_with(Arc::new(ScriptedTransport::new()));
        gate.require_auth(Intent::VisitProfile, PromptContext::Profile);

        gate.cancel_prompt();
        assert_eq!(gate.prompt(), PromptState::Idle);
        assert_eq!(intents.take(), None);
    }

    #[test]
    fn test_confirm_keeps_intent_and_routes_to_login() {
        let (gate, _, intents) = gate_with(Arc::new(ScriptedTransport::new()));
        gate.require_auth(Intent::UploadPiece, PromptContext::Upload);

        let route = gate.confirm_prompt();
        assert_eq!(route, Route::Login);
        assert_eq!(gate.prompt(), PromptState::Idle);
        assert_eq!(intents.take(), Some(Intent::UploadPiece));
    }

    #[test]
    fn test_prompt_copy_varies_by_context() {
        let cart = AuthGate::prompt_copy(PromptContext::Cart);
        let upload = AuthGate::prompt_copy(PromptContext::Upload);
        assert_ne!(cart.message, upload.message);
        assert_eq!(upload.headline, "Create an account to sell your piece");
    }
}
