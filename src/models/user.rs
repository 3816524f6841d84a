use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend role for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// User payload returned by `GET /auth/me`, `POST /users/` and `GET /users/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Seller rating summary shown on piece pages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub average: f64,
    pub count: u32,
}

/// The authenticated identity held by the session manager.
///
/// This is the session-facing view of an account: identity plus the
/// verification/rating metadata the storefront renders next to the name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub verified_seller: bool,
    #[serde(default)]
    pub rating: Option<Rating>,
}

impl From<UserResponse> for User {
    fn from(resp: UserResponse) -> Self {
        Self {
            id: resp.id,
            name: resp.username,
            email: resp.email,
            role: resp.role,
            verified_seller: false,
            rating: None,
        }
    }
}

/// Public seller profile from the catalog data layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seller {
    pub id: String,
    pub name: String,
    pub bio: String,
    pub location: String,
    pub member_since: String,
    pub verified_seller: bool,
    pub rating: Rating,
    pub total_sales: u32,
}
