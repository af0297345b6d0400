//! Authentication endpoints and session lifecycle.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::http::ApiClient;
use crate::session::{Session, UserProfile};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
    user: UserProfile,
    #[serde(default)]
    store_id: Option<String>,
}

/// Signs in and persists the session write-through.
///
/// The store id from the response replaces the session's; when the response
/// carries none, the previous one is kept.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<UserProfile> {
    let response: LoginResponse = client
        .post("/auth/login", &LoginRequest { email, password })
        .await?;

    let previous_store = client.session().await.store_id;
    let session = Session {
        auth_token: Some(response.access_token),
        store_id: response.store_id.or(previous_store),
        user: Some(response.user.clone()),
    };
    client.replace_session(session).await?;

    Ok(response.user)
}

/// Fetches the signed-in user's profile.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn profile(client: &ApiClient) -> Result<UserProfile> {
    Ok(client.get("/users/me").await?)
}

/// Signs out locally, clearing the persisted session.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn logout(client: &ApiClient) -> Result<()> {
    client.clear_session().await
}
