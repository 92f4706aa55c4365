pub mod anonymize;
pub mod audit;
pub mod check_env;
pub mod export;

use anyhow::Result;
use slackmark_config::{Config, Credentials};
use slackmark_slack::SlackClient;

/// Client for the token in the environment, using the configured endpoint
pub fn slack_client(credentials: &Credentials, config: &Config) -> Result<SlackClient> {
    let token = credentials.require_token()?;
    Ok(SlackClient::new(token)?
        .with_base_url(&config.slack.api_base_url)
        .with_page_limit(config.slack.page_limit))
}
