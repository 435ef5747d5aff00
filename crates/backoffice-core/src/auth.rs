// Sign-in DTOs

use serde::{Deserialize, Serialize};

use crate::user::User;

/// Credentials posted by the sign-in form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Successful sign-in: bearer token plus the signed-in user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub token: String,
    pub user: User,
}
