//! Data models for Patina storefront entities.
//!
//! This module contains the data structures used across the client:
//!
//! - `Product`, `Condition`, `Category`: catalog pieces
//! - `User`, `Role`: the authenticated session identity
//! - `Seller`, `Rating`: public seller profiles shown on piece pages
//! - `UserResponse`: the backend user payload from `/auth/me` and `/users/`

pub mod product;
pub mod user;

pub use product::{Category, Condition, Product};
pub use user::{Rating, Role, Seller, User, UserResponse};
