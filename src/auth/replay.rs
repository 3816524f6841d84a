//! Intent replay: after a successful login or signup, perform the action the
//! user was interrupted in.
//!
//! `execute` consumes the pending intent (take-once, so exactly one branch
//! runs per stored intent) and either finishes the action locally or routes
//! the user to where it continues. With nothing pending, the user lands on
//! the home page.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::nav::{Navigator, Route};

use super::intent::{Intent, IntentStore};

pub struct IntentReplayEngine {
    intents: IntentStore,
    catalog: Arc<Catalog>,
    cart: Cart,
    navigator: Arc<dyn Navigator>,
}

impl IntentReplayEngine {
    pub fn new(
        intents: IntentStore,
        catalog: Arc<Catalog>,
        cart: Cart,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            intents,
            catalog,
            cart,
            navigator,
        }
    }

    /// Invoked once per successful authentication event.
    pub fn execute(&self) {
        match self.intents.take() {
            Some(Intent::AddToCart { product_id }) => {
                match self.catalog.product(&product_id) {
                    Some(product) => self.cart.add(product.clone()),
                    // The piece may have left the catalog while the user was
                    // signing in; still land them on its page.
                    None => warn!(product_id, "Deferred add-to-cart for unknown piece"),
                }
                self.navigator.navigate(Route::Piece(product_id));
            }
            Some(Intent::Favorite { product_id }) => {
                // Favorite persistence lives with the piece page; replaying
                // just brings the user back to it.
                self.navigator.navigate(Route::Piece(product_id));
            }
            Some(Intent::VisitProfile) => self.navigator.navigate(Route::Profile),
            Some(Intent::UploadPiece) => self.navigator.navigate(Route::Upload),
            Some(Intent::MessageSeller { seller_id }) => {
                self.navigator.navigate(Route::Messages(seller_id));
            }
            None => {
                debug!("No pending intent after authentication");
                self.navigator.navigate(Route::Home);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::scripted::ScriptedTransport;
    use crate::api::ApiClient;
    use crate::auth::gate::{AuthGate, GateDecision, PromptContext, PromptState};
    use crate::auth::session::{LoginOutcome, SessionManager};
    use crate::auth::tokens::TokenStore;
    use crate::nav::RecordingNavigator;

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

    struct Storefront {
        session: SessionManager,
        gate: AuthGate,
        cart: Cart,
        nav: RecordingNavigator,
        replay: IntentReplayEngine,
    }

    /// Wire the whole client core together the way a front-end would.
    fn storefront(transport: Arc<ScriptedTransport>) -> Storefront {
        let tokens = TokenStore::in_memory();
        let api = ApiClient::with_transport("http://test", tokens.clone(), transport);
        let intents = IntentStore::new();
        let session = SessionManager::new(api, tokens, intents.clone());
        let gate = AuthGate::new(session.clone(), intents.clone());
        let cart = Cart::new();
        let nav = RecordingNavigator::new();
        let replay = IntentReplayEngine::new(
            intents,
            Arc::new(Catalog::builtin()),
            cart.clone(),
            Arc::new(nav.clone()),
        );
        Storefront {
            session,
            gate,
            cart,
            nav,
            replay,
        }
    }

    #[test]
    fn test_replay_without_intent_goes_home() {
        let app = storefront(Arc::new(ScriptedTransport::new()));
        app.replay.execute();
        assert_eq!(app.nav.history(), vec![Route::Home]);
        assert!(app.cart.is_empty());
    }

    #[test]
    fn test_replay_routes() {
        let app = storefront(Arc::new(ScriptedTransport::new()));

        let cases = [
            (Intent::VisitProfile, Route::Profile),
            (Intent::UploadPiece, Route::Upload),
            (
                Intent::Favorite {
                    product_id: "vtg-003".to_string(),
                },
                Route::Piece("vtg-003".to_string()),
            ),
            (
                Intent::MessageSeller {
                    seller_id: "user-002".to_string(),
                },
                Route::Messages("user-002".to_string()),
            ),
        ];
        for (intent, route) in cases {
            app.session.intents().set(intent);
            app.replay.execute();
            assert_eq!(app.nav.last(), Some(route));
        }
        // Favorite does not touch the cart
        assert!(app.cart.is_empty());
    }

    #[test]
    fn test_replay_unknown_piece_still_navigates() {
        let app = storefront(Arc::new(ScriptedTransport::new()));
        app.session.intents().set(Intent::AddToCart {
            product_id: "vtg-999".to_string(),
        });
        app.replay.execute();
        assert!(app.cart.is_empty());
        assert_eq!(app.nav.last(), Some(Route::Piece("vtg-999".to_string())));
    }

    #[tokio::test]
    async fn test_anonymous_add_to_cart_replayed_after_login() {
        let transport = Arc::new(ScriptedTransport::new());
        let app = storefront(transport.clone());

        // Anonymous user taps "add to bag" on vtg-002
        let decision = app.gate.require_auth(
            Intent::AddToCart {
                product_id: "vtg-002".to_string(),
            },
            PromptContext::Cart,
        );
        assert_eq!(decision, GateDecision::Deferred);
        assert_eq!(app.gate.prompt(), PromptState::Shown(PromptContext::Cart));
        assert!(app.cart.is_empty());

        // They continue to sign-in and submit valid credentials
        assert_eq!(app.gate.confirm_prompt(), Route::Login);
        transport.push(200, LOGIN_OK);
        transport.push(200, ME_OK);
        let outcome = app.session.login("anna.larsson@example.com", "secret1").await;
        assert_eq!(outcome, LoginOutcome::Success);

        // The deferred action runs exactly once
        app.replay.execute();
        let items = app.cart.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product.id, "vtg-002");
        assert_eq!(items[0].quantity, 1);
        assert_eq!(
            app.nav.last().unwrap().path(),
            "/pieces/vtg-002"
        );

        // A second authentication event finds nothing to replay
        app.replay.execute();
        assert_eq!(app.cart.item_count(), 1);
        assert_eq!(app.nav.last(), Some(Route::Home));
    }

    #[tokio::test]
    async fn test_cancelled_intent_does_not_leak_into_later_login() {
        let transport = Arc::new(ScriptedTransport::new());
        let app = storefront(transport.clone());

        // Anonymous user clicks the account icon, then dismisses the prompt
        app.gate
            .require_auth(Intent::VisitProfile, PromptContext::Profile);
        app.gate.cancel_prompt();
        assert_eq!(app.nav.history(), Vec::<Route>::new());

        // A later, unrelated login must land on home, not the profile
        transport.push(200, LOGIN_OK);
        transport.push(200, ME_OK);
        let outcome = app.session.login("anna.larsson@example.com", "secret1").await;
        assert_eq!(outcome, LoginOutcome::Success);
        app.replay.execute();
        assert_eq!(app.nav.history(), vec![Route::Home]);
    }

    #[tokio::test]
    async fn test_logout_invalidates_pending_intent() {
        let transport = Arc::new(ScriptedTransport::new());
        let app = storefront(transport.clone());

        app.gate.require_auth(
            Intent::MessageSeller {
                seller_id: "user-003".to_string(),
            },
            PromptContext::Message,
        );
        // No tokens stored, so logout skips backend revocation
        app.session.logout().await;

        app.replay.execute();
        assert_eq!(app.nav.last(), Some(Route::Home));
    }
}
