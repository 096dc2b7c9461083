//! Wire DTOs for the SEC backend.
//!
//! DESIGN
//! ======
//! Services pass JSON through untouched; these types exist for callers that
//! want typed access via [`crate::net::ApiResponse::json`] or a typed payload
//! to hand to a service. Absent lists and optional fields default so partial
//! documents from the backend still decode.

#[cfg(test)]
#[path = "models_test.rs"]
mod models_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// AUTH
// =============================================================================

/// Body of `POST /auth/sign-in`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/sign-up`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Successful sign-in reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInResponse {
    #[serde(default)]
    pub message: String,
    pub user_id: String,
    pub name: String,
    pub role: String,
    /// Bearer token, when the backend issues one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl SignInResponse {
    /// Token to store in the session: the issued token if non-empty, else the
    /// user id.
    #[must_use]
    pub fn session_token(&self) -> &str {
        match self.token.as_deref() {
            Some(token) if !token.is_empty() => token,
            _ => &self.user_id,
        }
    }
}

/// Successful sign-up reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Account roles accepted at sign-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Principal,
    Teacher,
    Student,
    Parent,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Principal => "principal",
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::Parent => "parent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}' (expected principal, teacher, student or parent)")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "principal" => Ok(Self::Principal),
            "teacher" => Ok(Self::Teacher),
            "student" => Ok(Self::Student),
            "parent" => Ok(Self::Parent),
            _ => Err(UnknownRole(s.to_owned())),
        }
    }
}

// =============================================================================
// LEARNING
// =============================================================================

/// An educational institution with its embedded classes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub classes: Vec<Class>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInstitution {
    pub name: String,
    pub address: String,
}

/// A class inside an institution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub id: String,
    pub name: String,
    pub teacher_id: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClass {
    pub name: String,
    pub teacher_id: String,
}

/// Learning material attached to a class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub file_ids: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResource {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub file_ids: Vec<String>,
}

/// A comment posted on a class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub author_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub content: String,
    pub author_id: String,
}
