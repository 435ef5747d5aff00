// Sign-in page and action

use anyhow::Result;
use backoffice_client::ApiClient;
use backoffice_core::SignInResponse;
use serde_json::json;

use super::Document;
use crate::components::{PageMeta, SignInForm};

pub fn sign_in_page(form: &SignInForm) -> Document {
    let meta = PageMeta::new("Sign in").with_description("Staff access only");
    Document::new(meta, form.render(), json!({ "signedIn": false }))
}

/// Validate the form locally, then post the credentials.
/// Validation failures never reach the network.
pub async fn sign_in(client: &ApiClient, form: &SignInForm) -> Result<SignInResponse> {
    let request = form.submit().map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::anyhow!(messages.join("; "))
    })?;
    Ok(client.auth().sign_in(&request).await?)
}

/// Shown after a successful sign-in
pub fn signed_in_page(response: &SignInResponse) -> Document {
    let meta = PageMeta::new("Signed in")
        .with_description(format!("Welcome, {}", response.user.display_name()));
    let lines = vec![
        "Keep the session for later commands with:".to_string(),
        format!("  export BACKOFFICE_API_TOKEN={}", response.token),
        format!("  export BACKOFFICE_USER_ID={}", response.user.id),
    ];
    let data = json!({ "signedIn": true, "token": response.token, "user": response.user });
    Document::new(meta, lines, data)
}
