// Sign-in form shell

use backoffice_core::SignInRequest;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Email is required")]
    MissingEmail,

    #[error("Email address is not valid")]
    InvalidEmail,

    #[error("Password is required")]
    MissingPassword,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    email: String,
    password: String,
}

impl SignInForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Vec<FormError> {
        let mut errors = Vec::new();
        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FormError::MissingEmail);
        } else if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            errors.push(FormError::InvalidEmail);
        }
        if self.password.is_empty() {
            errors.push(FormError::MissingPassword);
        }
        errors
    }

    /// Credentials ready to post, or every validation error
    pub fn submit(&self) -> Result<SignInRequest, Vec<FormError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(SignInRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    pub fn render(&self) -> Vec<String> {
        vec![
            format!("Email:    {}", self.email),
            format!("Password: {}", "•".repeat(self.password.chars().count())),
            "[ Sign in ]".to_string(),
        ]
    }
}
