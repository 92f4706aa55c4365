use async_trait::async_trait;
use serde::de::DeserializeOwned;
use slackmark_core::{Channel, ChannelType, User};
use tracing::{debug, info};

use crate::types::Envelope;
use crate::{AuthInfo, Page, Result, SlackApi, SlackError};

pub const DEFAULT_BASE_URL: &str = "https://slack.com/api";
pub const DEFAULT_PAGE_LIMIT: u32 = 1000;

/// HTTP client for the Slack Web API
pub struct SlackClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    page_limit: u32,
}

impl SlackClient {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SlackError::MissingToken);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("slackmark/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            token,
            page_limit: DEFAULT_PAGE_LIMIT,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit.max(1);
        self
    }

    async fn call(&self, method: &str, params: &[(&str, String)]) -> Result<Envelope> {
        let url = format!("{}/{}", self.base_url, method);
        debug!("GET {} {:?}", url, params);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SlackError::Status {
                method: method.to_string(),
                status: response.status().as_u16(),
            });
        }

        let envelope: Envelope = response.json().await?;
        if !envelope.ok {
            return Err(SlackError::Api {
                method: method.to_string(),
                code: envelope
                    .error
                    .clone()
                    .unwrap_or_else(|| "unknown_error".to_string()),
            });
        }

        Ok(envelope)
    }

    fn paged_params(&self, cursor: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = vec![("limit", self.page_limit.to_string())];
        if let Some(cursor) = cursor {
            params.push(("cursor", cursor.to_string()));
        }
        params
    }
}

fn take_field<T: DeserializeOwned>(envelope: &mut Envelope, method: &str, field: &str) -> Result<T> {
    let value = envelope
        .body
        .remove(field)
        .ok_or_else(|| SlackError::Malformed {
            method: method.to_string(),
            message: format!("missing field `{}`", field),
        })?;

    serde_json::from_value(value).map_err(|e| SlackError::Malformed {
        method: method.to_string(),
        message: e.to_string(),
    })
}

#[async_trait]
impl SlackApi for SlackClient {
    async fn auth_test(&self) -> Result<AuthInfo> {
        let envelope = self.call("auth.test", &[]).await?;
        let info: AuthInfo = serde_json::from_value(serde_json::Value::Object(envelope.body))
            .map_err(|e| SlackError::Malformed {
                method: "auth.test".to_string(),
                message: e.to_string(),
            })?;
        info!("Authenticated as {} in {} ({})", info.user, info.team, info.team_id);
        Ok(info)
    }

    async fn channels_page(&self, kind: ChannelType, cursor: Option<&str>) -> Result<Page<Channel>> {
        let method = "conversations.list";
        let mut params = self.paged_params(cursor);
        params.push(("types", kind.as_api_str().to_string()));

        let mut envelope = self.call(method, &params).await?;
        let next_cursor = envelope.next_cursor();
        let items = take_field(&mut envelope, method, "channels")?;
        Ok(Page { items, next_cursor })
    }

    async fn users_page(&self, cursor: Option<&str>) -> Result<Page<User>> {
        let method = "users.list";
        let params = self.paged_params(cursor);

        let mut envelope = self.call(method, &params).await?;
        let next_cursor = envelope.next_cursor();
        let items = take_field(&mut envelope, method, "members")?;
        Ok(Page { items, next_cursor })
    }
}
