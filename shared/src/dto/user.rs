use serde::{Deserialize, Serialize};
use validator::Validate;

/// Portal role; each role gets its own dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Partner,
    Judge,
    Mentor,
    Student,
    Chapter,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Partner => "partner",
            Role::Judge => "judge",
            Role::Mentor => "mentor",
            Role::Student => "student",
            Role::Chapter => "chapter",
        }
    }
}

/// The signed-in user as returned by `/api/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 100))]
    pub display_name: String,

    #[serde(default)]
    pub roles: Vec<Role>,
}

impl UserDto {
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }

    /// Admins pass every role check.
    pub fn has_any_role(&self, allowed: &[Role]) -> bool {
        self.is_admin() || self.roles.iter().any(|role| allowed.contains(role))
    }
}

/// Request for user login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8))]
    pub password: String,
}

/// Response for a successful login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserDto,
    pub session_id: String,
}
