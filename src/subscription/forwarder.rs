use std::convert::TryFrom;
use std::sync::Arc;

use reqwest::StatusCode;

use crate::campaign_client::{
    CampaignClient,
    UpstreamBody,
};
use crate::domain::SubscriberEmail;
use crate::subscription::result::{
    FailureKind,
    SubscriptionResult,
};
use crate::token::TokenManager;

/// At most one extra attempt, taken only after a 401 with refresh
/// credentials configured.
const MAX_AUTH_RETRIES: u8 = 1;

const MSG_INVALID_EMAIL: &str = "Please provide a valid email address.";
const MSG_LIST_NOT_CONFIGURED: &str = "The mailing list is not configured.";
const MSG_CREDENTIALS_NOT_CONFIGURED: &str = "Upstream credentials are not configured.";
const MSG_TRY_AGAIN_LATER: &str = "The subscription service is unavailable, try again later.";
const MSG_TIMEOUT: &str = "The subscription service timed out, try again later.";
const MSG_ALREADY_SUBSCRIBED: &str = "You are already subscribed to this newsletter.";
const MSG_EMAIL_REJECTED: &str = "The email address was rejected, please check it.";
const MSG_INTERNAL: &str = "Something went wrong, try again later.";

/// Validates one signup, forwards it upstream with a valid token and
/// normalizes the heterogeneous upstream reply into a
/// [`SubscriptionResult`].
///
/// Nothing escapes `subscribe` unhandled: every transport or upstream
/// failure is mapped to a failure category with a fixed user-facing
/// message.
#[derive(Debug)]
pub struct SubscriptionForwarder {
    campaign_client: CampaignClient,
    token_manager: Arc<TokenManager>,
}

impl SubscriptionForwarder {
    pub fn new(campaign_client: CampaignClient, token_manager: Arc<TokenManager>) -> Self {
        Self {
            campaign_client,
            token_manager,
        }
    }

    #[tracing::instrument(name = "forwarding subscription", skip(self))]
    pub async fn subscribe(&self, email: String) -> SubscriptionResult {
        let email = match SubscriberEmail::try_from(email) {
            Ok(email) => email,
            Err(e) => {
                tracing::warn!("{}", e);
                return SubscriptionResult::failure(FailureKind::InvalidInput, MSG_INVALID_EMAIL);
            }
        };

        let list_key = match self.campaign_client.list_key() {
            Some(list_key) => list_key.to_string(),
            None => {
                return SubscriptionResult::failure(FailureKind::Config, MSG_LIST_NOT_CONFIGURED)
            }
        };
        if !self.token_manager.is_configured() {
            return SubscriptionResult::failure(
                FailureKind::Config,
                MSG_CREDENTIALS_NOT_CONFIGURED,
            );
        }

        let mut token = match self.token_manager.valid_token().await {
            Ok(token) => token,
            Err(e) => {
                tracing::error!("token acquisition failed: {}", e);
                return SubscriptionResult::failure(FailureKind::Auth, MSG_TRY_AGAIN_LATER);
            }
        };

        let mut auth_retries_left = MAX_AUTH_RETRIES;
        loop {
            let response = match self
                .campaign_client
                .subscribe(&email, &list_key, &token)
                .await
            {
                Ok(response) => response,
                Err(e) => return classify_transport_error(e),
            };

            if response.status == StatusCode::UNAUTHORIZED
                && auth_retries_left > 0
                && self.token_manager.can_refresh()
            {
                auth_retries_left -= 1;
                token = match self.token_manager.refresh().await {
                    Ok(token) => token,
                    Err(e) => {
                        tracing::error!("token refresh after 401 failed: {}", e);
                        return SubscriptionResult::failure(
                            FailureKind::UpstreamUnavailable,
                            MSG_TRY_AGAIN_LATER,
                        );
                    }
                };
                continue;
            }

            if !response.status.is_success() {
                tracing::error!("upstream responded with status: {}", response.status);
                return SubscriptionResult::failure(
                    FailureKind::UpstreamUnavailable,
                    MSG_TRY_AGAIN_LATER,
                );
            }

            let after_auth_retry = auth_retries_left < MAX_AUTH_RETRIES;
            return classify_body(&response.body, after_auth_retry);
        }
    }
}

fn classify_transport_error(error: reqwest::Error) -> SubscriptionResult {
    tracing::error!("error submitting subscription upstream: {}", error);
    if error.is_timeout() {
        SubscriptionResult::failure(FailureKind::Timeout, MSG_TIMEOUT)
    } else if error.is_connect() {
        SubscriptionResult::failure(FailureKind::UpstreamUnavailable, MSG_TRY_AGAIN_LATER)
    } else {
        SubscriptionResult::failure(FailureKind::Internal, MSG_INTERNAL)
    }
}

fn classify_body(raw: &str, after_auth_retry: bool) -> SubscriptionResult {
    let (status, message) = match UpstreamBody::interpret(raw) {
        UpstreamBody::Parsed { status, message } => (status, message),
        UpstreamBody::Unrecognized => ("error".to_string(), "invalid format".to_string()),
    };

    if status == "success" {
        return SubscriptionResult::Success;
    }

    // a failed body after the auth retry is reported generically so no
    // upstream auth detail leaks out of the retry path
    if after_auth_retry {
        tracing::error!("retry after token refresh still failed: {}", message);
        return SubscriptionResult::failure(FailureKind::UpstreamUnavailable, MSG_TRY_AGAIN_LATER);
    }

    let lowered = message.to_lowercase();
    if lowered.contains("already exists") || lowered.contains("duplicate") {
        SubscriptionResult::failure(FailureKind::AlreadySubscribed, MSG_ALREADY_SUBSCRIBED)
    } else if lowered.contains("invalid email") || lowered.contains("email format") {
        SubscriptionResult::failure(FailureKind::InvalidEmailUpstream, MSG_EMAIL_REJECTED)
    } else if lowered.contains("authentication") || lowered.contains("token") {
        tracing::error!("upstream auth-related failure: {}", message);
        SubscriptionResult::failure(FailureKind::Auth, MSG_TRY_AGAIN_LATER)
    } else {
        tracing::warn!("unclassified upstream failure: {}", message);
        SubscriptionResult::failure(FailureKind::UpstreamUnavailable, MSG_TRY_AGAIN_LATER)
    }
}
