use std::time::Duration;

use anyhow::Context;
use derivative::Derivative;
use reqwest::{
    Client,
    StatusCode,
    Url,
};

use crate::campaign_client::request::ContactInfo;
use crate::domain::SubscriberEmail;

const SUBSCRIBE_PATH: &str = "api/v1.1/json/listsubscribe";

/// The raw upstream reply, before any interpretation.
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Client for the upstream list-subscribe endpoint.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct CampaignClient {
    http_client: Client,
    subscribe_url: Url,
    #[derivative(Debug = "ignore")]
    list_key: Option<String>,
}

impl CampaignClient {
    pub fn new(
        base_url: Url,
        list_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, anyhow::Error> {
        Ok(Self {
            http_client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .context(format!(
                    "Error creating campaign client with:\nbase_url: {}\ntimeout_secs: {}",
                    base_url, timeout_secs
                ))?,
            subscribe_url: base_url
                .join(SUBSCRIBE_PATH)
                .context(format!("Invalid subscribe url under base: {}", base_url))?,
            list_key,
        })
    }

    pub fn list_key(&self) -> Option<&str> {
        self.list_key.as_deref()
    }

    /// Submit one subscription and hand back status and body untouched.
    ///
    /// The caller interprets the body: the provider answers with JSON on
    /// most paths but with an XML-shaped payload on certain errors.
    pub async fn subscribe(
        &self,
        email: &SubscriberEmail,
        list_key: &str,
        token: &str,
    ) -> Result<RawResponse, reqwest::Error> {
        let contact_info = serde_json::json!(ContactInfo::new(email.as_ref())).to_string();
        let response = self
            .http_client
            .post(self.subscribe_url.clone())
            .header("Authorization", format!("Zoho-oauthtoken {}", token))
            .form(&[
                ("resfmt", "JSON"),
                ("listkey", list_key),
                ("contactinfo", contact_info.as_str()),
            ])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}
