use chrono::Utc;
use reqwest::Client;

use crate::{
    reddit::{RedditError, auth::request_token},
    types::{Credentials, Token},
};

/// Seconds before the reported expiry at which a token is renewed.
const EXPIRY_MARGIN: u64 = 60;

/// Holds the bearer token for the lifetime of the process.
///
/// Nothing is written to disk; every run starts without a token and asks
/// Reddit for one on the first request.
#[derive(Debug, Default)]
pub struct TokenManager {
    token: Option<Token>,
}

impl TokenManager {
    pub async fn get_valid_token(
        &mut self,
        http: &Client,
        auth_url: &str,
        credentials: &Credentials,
    ) -> Result<String, RedditError> {
        if let Some(token) = self.token.as_ref().filter(|t| !Self::is_expired(t)) {
            return Ok(token.access_token.clone());
        }

        let token = request_token(http, auth_url, credentials).await?;
        let access_token = token.access_token.clone();
        self.token = Some(token);
        Ok(access_token)
    }

    fn is_expired(token: &Token) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= token
            .obtained_at
            .saturating_add(token.expires_in)
            .saturating_sub(EXPIRY_MARGIN)
    }
}
