/// User and identity types
use super::ids::UserId;
use crate::error::{MusifyError, Result};
use serde::{Deserialize, Serialize};

/// Registered user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Subject id issued by the identity provider
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    pub created_at: String,
}

/// Registration payload; registering an existing id updates it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUser {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Caller identity resolved from a bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl Identity {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            email: None,
            is_admin: false,
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }

    /// Fail with `PermissionDenied` unless the identity carries the admin claim
    pub fn require_admin(&self) -> Result<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(MusifyError::permission_denied("Admin access required"))
        }
    }

    /// Display name used when posting comments
    pub fn display_name(&self) -> String {
        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .filter(|name| !name.is_empty())
            .map_or_else(|| self.user_id.to_string(), str::to_string)
    }
}
