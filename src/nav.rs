//! Navigation seam between the core and whatever renders it.
//!
//! The intent replay engine and auth gate decide *where* the user should go;
//! the front-end decides *how* to get there. `Navigator` is the capability a
//! front-end injects, and `Route` is the typed destination set.

use std::sync::{Arc, Mutex};

/// Client-side destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Piece(String),
    Profile,
    Upload,
    Messages(String),
    Login,
}

impl Route {
    /// Render the route as a URL path.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Piece(id) => format!("/pieces/{}", id),
            Route::Profile => "/profile".to_string(),
            Route::Upload => "/upload".to_string(),
            Route::Messages(seller_id) => format!("/messages/{}", seller_id),
            Route::Login => "/login".to_string(),
        }
    }
}

/// Injected navigation capability.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that records every destination. Useful for tests and for
/// headless consumers that drive navigation themselves.
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    history: Arc<Mutex<Vec<Route>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Route> {
        self.history.lock().expect("navigator lock poisoned").clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.history
            .lock()
            .expect("navigator lock poisoned")
            .last()
            .cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.history.lock().expect("navigator lock poisoned").push(route);
    }
}
