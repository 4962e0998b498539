use chrono::Utc;
use reqwest::Client;

use crate::types::{AccessTokenResponse, Credentials, Token};

use super::{RedditError, client::check_response};

/// Obtains a bearer token from `/api/v1/access_token`.
///
/// With only client id and secret the application-only grant
/// (`client_credentials`) is used, which gives read-only access. When the
/// credentials also carry a username and password the legacy `password`
/// grant logs in as that account.
pub async fn request_token(
    http: &Client,
    auth_url: &str,
    credentials: &Credentials,
) -> Result<Token, RedditError> {
    let token_url = format!("{}/api/v1/access_token", auth_url.trim_end_matches('/'));

    let form: Vec<(&str, &str)> = match (&credentials.username, &credentials.password) {
        (Some(username), Some(password)) => vec![
            ("grant_type", "password"),
            ("username", username.as_str()),
            ("password", password.as_str()),
        ],
        _ => vec![("grant_type", "client_credentials")],
    };

    let response = http
        .post(&token_url)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(&form)
        .send()
        .await?;
    let response = check_response(response).await?;

    let body: AccessTokenResponse = response.json().await?;
    if let Some(error) = body.error {
        return Err(RedditError::api(
            &error.to_uppercase(),
            "Reddit rejected the supplied credentials",
        ));
    }

    let access_token = body
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| RedditError::Transport("token response without access_token".into()))?;

    Ok(Token {
        access_token,
        expires_in: body.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
