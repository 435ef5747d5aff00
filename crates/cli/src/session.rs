// Signed-in session
//
// Passed explicitly to whatever needs identity or logout. Storing the
// session between runs is left to the environment (BACKOFFICE_API_TOKEN and
// BACKOFFICE_USER_ID).

use backoffice_core::{SignInResponse, User};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
    user_id: Option<String>,
}

impl Session {
    #[cfg(test)]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session restored from a bearer token. Only the user's id can come
    /// along with it; the full user arrives with a sign-in response.
    pub fn from_token(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            ..Self::default()
        }
    }

    pub fn with_user_id(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id.filter(|id| !id.trim().is_empty());
        self
    }

    pub fn sign_in(&mut self, response: SignInResponse) {
        self.token = Some(response.token);
        self.user_id = Some(response.user.id.clone());
        self.user = Some(response.user);
    }

    /// Drop the token and user. Returns whether anything was removed.
    pub fn logout(&mut self) -> bool {
        let had_session = self.token.is_some() || self.user.is_some();
        self.token = None;
        self.user = None;
        self.user_id = None;
        had_session
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Id of the signed-in user, from the sign-in response or restored
    pub fn user_id(&self) -> Option<&str> {
        self.user
            .as_ref()
            .map(|user| user.id.as_str())
            .or(self.user_id.as_deref())
    }

    pub fn display_name(&self) -> String {
        match (&self.user, &self.token) {
            (Some(user), _) => user.display_name(),
            (None, Some(_)) => "Staff".to_string(),
            (None, None) => "Guest".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoffice_core::UserRole;
    use chrono::Utc;

    fn response() -> SignInResponse {
        SignInResponse {
            token: "tok".to_string(),
            user: User {
                id: "u1".to_string(),
                username: "jdoe".to_string(),
                email: "jdoe@example.com".to_string(),
                first_name: Some("Jane".to_string()),
                last_name: Some("Doe".to_string()),
                role: UserRole::Editor,
                enabled: true,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        }
    }

    #[test]
    fn test_sign_in_then_logout() {
        let mut session = Session::anonymous();
        assert_eq!(session.display_name(), "Guest");

        session.sign_in(response());
        assert!(session.is_authenticated());
        assert_eq!(session.display_name(), "Jane Doe");

        assert_eq!(session.user_id(), Some("u1"));

        assert!(session.logout());
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(session.user_id().is_none());
        assert!(!session.logout());
    }

    #[test]
    fn test_restored_session_keeps_user_id() {
        let session = Session::from_token(Some("tok".to_string()))
            .with_user_id(Some("u1".to_string()));
        assert!(session.is_authenticated());
        assert_eq!(session.user_id(), Some("u1"));
        assert!(session.user().is_none());

        let session = Session::from_token(Some("tok".to_string())).with_user_id(Some(" ".to_string()));
        assert!(session.user_id().is_none());
    }

    #[test]
    fn test_empty_token_is_anonymous() {
        assert!(!Session::from_token(Some(String::new())).is_authenticated());
        assert_eq!(
            Session::from_token(Some("t".to_string())).display_name(),
            "Staff"
        );
    }
}
