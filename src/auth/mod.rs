//! Authentication and intent-replay coordination.
//!
//! This module provides:
//! - `TokenStore`: persisted access/refresh credential pair
//! - `SessionManager`: current user state and the login/signup/logout flows
//! - `IntentStore`: the one-slot, take-once store for deferred actions
//! - `AuthGate`: the checkpoint that defers gated actions behind a prompt
//! - `IntentReplayEngine`: re-executes the deferred action after sign-in

pub mod gate;
pub mod intent;
pub mod replay;
pub mod session;
pub mod tokens;

pub use gate::{AuthGate, GateDecision, PromptContext, PromptCopy, PromptState};
pub use intent::{Intent, IntentStore};
pub use replay::IntentReplayEngine;
pub use session::{LoginOutcome, SessionManager, SignupOutcome};
pub use tokens::TokenStore;
