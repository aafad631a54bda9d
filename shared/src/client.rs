//! Client-related types shared between server and client
//!
//! Request/response bodies of the auth endpoints.

use serde::{Deserialize, Serialize};

use crate::models::{Role, User};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Register request
///
/// A `role` sent by the client is not part of the payload: self-registered
/// accounts are always regular users.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Bootstrap admin request (development only)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BootstrapAdminRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Register / login / bootstrap response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    /// Unix millis
    pub expires_at: i64,
    pub user: UserInfo,
}

/// User information without credentials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: u64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub role: Role,
    pub created_at: i64,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Plain acknowledgement body (`{"message": "..."}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
