//! Pending intent storage.
//!
//! When an anonymous user triggers a gated action, the action is parked here
//! until authentication completes. The slot holds at most one intent and is
//! write-once-read-once: `take` returns the value and clears it atomically,
//! so a stored intent can never be replayed twice.

use std::sync::{Arc, Mutex};

/// A deferred user action awaiting authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    AddToCart { product_id: String },
    Favorite { product_id: String },
    VisitProfile,
    UploadPiece,
    MessageSeller { seller_id: String },
}

#[derive(Clone, Default)]
pub struct IntentStore {
    slot: Arc<Mutex<Option<Intent>>>,
}

impl IntentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a pending intent, overwriting any previous one.
    pub fn set(&self, intent: Intent) {
        *self.slot.lock().expect("intent lock poisoned") = Some(intent);
    }

    /// Take the pending intent, leaving the slot empty.
    pub fn take(&self) -> Option<Intent> {
        self.slot.lock().expect("intent lock poisoned").take()
    }

    pub fn clear(&self) {
        *self.slot.lock().expect("intent lock poisoned") = None;
    }

    /// Whether an intent is parked, without consuming it.
    pub fn is_pending(&self) -> bool {
        self.slot.lock().expect("intent lock poisoned").is_some()
    }
}
