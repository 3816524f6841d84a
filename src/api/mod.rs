//! Backend API layer: error taxonomy, transport seam, and the client.

pub mod client;
pub mod error;
pub mod transport;

pub use client::{ApiClient, TokenPair};
pub use error::{ApiError, ValidationDetail};
pub use transport::{HttpTransport, Transport, WireRequest, WireResponse};
