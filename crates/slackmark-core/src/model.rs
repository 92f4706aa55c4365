use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// A conversation as listed by `conversations.list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_private: bool,
}

impl Channel {
    pub fn new(id: impl Into<String>, name: impl Into<String>, is_private: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_private,
        }
    }

    /// Label shown in the bookmark bar
    pub fn label(&self) -> String {
        if self.is_private {
            format!("🔒 #{}", self.name)
        } else {
            format!("#{}", self.name)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A workspace member as listed by `users.list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub profile: Profile,
}

impl User {
    pub fn new(id: impl Into<String>, real_name: &str, display_name: &str) -> Self {
        Self {
            id: id.into(),
            deleted: false,
            is_bot: false,
            profile: Profile {
                real_name: Some(real_name.to_string()),
                display_name: Some(display_name.to_string()),
            },
        }
    }

    pub fn real_name(&self) -> &str {
        self.profile.real_name.as_deref().unwrap_or("")
    }

    pub fn display_name(&self) -> &str {
        self.profile.display_name.as_deref().unwrap_or("")
    }

    /// Humans only: bots and deactivated accounts get no DM bookmark
    pub fn is_regular(&self) -> bool {
        !self.is_bot && !self.deleted
    }

    /// Case-insensitive display name, falling back to the real name
    pub fn sort_key(&self) -> String {
        let name = if self.display_name().is_empty() {
            self.real_name()
        } else {
            self.display_name()
        };
        name.to_lowercase()
    }

    /// `real (@display)`, or just `real` when the two coincide
    pub fn label(&self) -> String {
        let real = self.real_name();
        let display = match self.display_name() {
            "" => real,
            name => name,
        };

        if display == real {
            real.to_string()
        } else {
            format!("{} (@{})", real, display)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelType {
    Public,
    Private,
}

impl ChannelType {
    /// Value of the `types` parameter for `conversations.list`
    pub fn as_api_str(&self) -> &'static str {
        match self {
            ChannelType::Public => "public_channel",
            ChannelType::Private => "private_channel",
        }
    }

    /// OAuth scope that `conversations.list` needs for this type
    pub fn required_scope(&self) -> &'static str {
        match self {
            ChannelType::Public => "channels:read",
            ChannelType::Private => "groups:read",
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelType::Public => write!(f, "public"),
            ChannelType::Private => write!(f, "private"),
        }
    }
}

impl FromStr for ChannelType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public_channel" | "public" => Ok(ChannelType::Public),
            "private_channel" | "private" => Ok(ChannelType::Private),
            other => Err(CoreError::UnknownChannelType(other.to_string())),
        }
    }
}
