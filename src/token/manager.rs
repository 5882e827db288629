use std::time::Duration;

use anyhow::Context;
use chrono::{
    DateTime,
    Utc,
};
use derivative::Derivative;
use reqwest::{
    Client,
    Url,
};
use tokio::sync::RwLock;

use crate::token::errors::AuthError;

/// Lifetime assumed when the token endpoint omits `expires_in`.
const DEFAULT_LIFETIME_SECS: i64 = 3600;
/// Safety margin subtracted from the provider-supplied lifetime so a
/// token is refreshed before the provider actually rejects it.
const EXPIRY_MARGIN_SECS: i64 = 300;

/// The credential presented to the upstream campaign API.
///
/// A `None` expiry means the expiry is unknown (e.g. a seeded initial
/// token) and the token is treated as fresh until a refresh replaces it.
#[derive(Clone, Debug)]
pub struct AccessToken {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(value: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { value, expires_at }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now >= expires_at,
            None => false,
        }
    }
}

/// Where access tokens come from.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub enum TokenSource {
    /// A fixed credential, never refreshed and never considered expired.
    Static {
        #[derivative(Debug = "ignore")]
        token: String,
    },
    /// OAuth refresh-token exchange against the provider token endpoint.
    Refreshable {
        client_id: String,
        #[derivative(Debug = "ignore")]
        client_secret: String,
        #[derivative(Debug = "ignore")]
        refresh_token: String,
    },
}

/// Produces a non-expired access token on demand, refreshing it through
/// the OAuth provider when the held one is absent or expired.
///
/// Constructed once at startup and shared across request handlers. The
/// lock around the held token is never kept across the network exchange:
/// concurrent calls near expiry may each refresh and the last write wins,
/// which is acceptable because a refresh is idempotent for the provider.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct TokenManager {
    http_client: Client,
    token_url: Url,
    source: Option<TokenSource>,
    #[derivative(Debug = "ignore")]
    current: RwLock<Option<AccessToken>>,
}

#[derive(serde::Deserialize)]
struct TokenEndpointResponse {
    access_token: Option<String>,
    expires_in: Option<i64>,
}

impl TokenManager {
    pub fn new(
        token_url: Url,
        source: Option<TokenSource>,
        initial_token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, anyhow::Error> {
        let initial = initial_token.map(|value| AccessToken::new(value, None));
        Ok(Self {
            http_client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .context(format!(
                    "Error creating token client with:\ntoken_url: {}\ntimeout_secs: {}",
                    token_url, timeout_secs
                ))?,
            token_url,
            source,
            current: RwLock::new(initial),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.source.is_some()
    }

    pub fn can_refresh(&self) -> bool {
        matches!(self.source, Some(TokenSource::Refreshable { .. }))
    }

    /// Return the held token unless it is absent or expired, in which
    /// case a refresh is performed first.
    pub async fn valid_token(&self) -> Result<String, AuthError> {
        match &self.source {
            None => Err(AuthError::Unconfigured),
            Some(TokenSource::Static { token }) => Ok(token.clone()),
            Some(TokenSource::Refreshable { .. }) => {
                let now = Utc::now();
                if let Some(token) = self.current.read().await.as_ref() {
                    if !token.is_expired_at(now) {
                        return Ok(token.value().to_string());
                    }
                }
                self.refresh().await
            }
        }
    }

    /// Exchange the refresh token for a new access token and publish it.
    ///
    /// Failures are not retried here; the caller decides whether to retry.
    pub async fn refresh(&self) -> Result<String, AuthError> {
        let (client_id, client_secret, refresh_token) = match &self.source {
            Some(TokenSource::Refreshable {
                client_id,
                client_secret,
                refresh_token,
            }) => (client_id, client_secret, refresh_token),
            Some(TokenSource::Static { .. }) => return Err(AuthError::RefreshUnsupported),
            None => return Err(AuthError::Unconfigured),
        };

        let response = self
            .http_client
            .post(self.token_url.clone())
            .form(&[
                ("refresh_token", refresh_token.as_str()),
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::Http {
                status: response.status().as_u16(),
            });
        }

        let payload: TokenEndpointResponse = response
            .json()
            .await
            .map_err(|_| AuthError::MalformedResponse)?;
        let value = payload.access_token.ok_or(AuthError::MalformedResponse)?;
        let lifetime = payload.expires_in.unwrap_or(DEFAULT_LIFETIME_SECS);
        let expires_at = Utc::now() + chrono::Duration::seconds(lifetime - EXPIRY_MARGIN_SECS);

        *self.current.write().await = Some(AccessToken::new(value.clone(), Some(expires_at)));
        Ok(value)
    }

    /// Seconds until the held token expires, if one is held and its
    /// expiry is known.
    pub async fn remaining_lifetime(&self) -> Option<i64> {
        self.current
            .read()
            .await
            .as_ref()
            .and_then(|token| token.expires_at)
            .map(|expires_at| (expires_at - Utc::now()).num_seconds())
    }
}
