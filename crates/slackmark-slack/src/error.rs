//! Error types for slackmark-slack

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SlackError>;

#[derive(Error, Debug)]
pub enum SlackError {
    #[error("Slack API token is empty")]
    MissingToken,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} from {method}")]
    Status { method: String, status: u16 },

    #[error("{method} failed: {code}")]
    Api { method: String, code: String },

    #[error("Malformed response from {method}: {message}")]
    Malformed { method: String, message: String },
}

impl SlackError {
    /// Slack's error code, when the API answered with `ok: false`
    pub fn code(&self) -> Option<&str> {
        match self {
            SlackError::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// What the user can do about it
    pub fn hint(&self) -> Option<&'static str> {
        match self.code()? {
            "not_allowed_token_type" => Some(
                "A user token (xoxp-...) is required; bot tokens (xoxb-...) cannot list these. \
                 Create one at https://api.slack.com/apps",
            ),
            "invalid_auth" | "not_authed" | "token_revoked" | "token_expired" => Some(
                "Authentication failed. Check that the token is valid and not expired, \
                 or reinstall the app to issue a new one",
            ),
            "missing_scope" => Some(
                "The token lacks a required scope (users:read, channels:read, groups:read). \
                 Add it under \"OAuth & Permissions\" and reinstall the app",
            ),
            _ => None,
        }
    }
}
