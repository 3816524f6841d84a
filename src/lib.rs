//! Patina storefront client core.
//!
//! This crate is the headless half of the Patina curated resale storefront:
//! the API client, session and credential management, the client-side
//! shopping bag, and the auth-gate/intent-replay coordination that lets an
//! anonymous user's action survive the sign-in detour. Rendering front-ends
//! consume this crate and supply the `Navigator` and storage capabilities.

pub mod api;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod forms;
pub mod models;
pub mod nav;
pub mod storage;

pub use api::{ApiClient, ApiError};
pub use auth::{
    AuthGate, GateDecision, Intent, IntentReplayEngine, IntentStore, LoginOutcome, PromptContext,
    PromptState, SessionManager, SignupOutcome, TokenStore,
};
pub use cart::{Cart, CartItem};
pub use catalog::Catalog;
pub use config::Config;
pub use models::{Product, Role, User};
pub use nav::{Navigator, RecordingNavigator, Route};
