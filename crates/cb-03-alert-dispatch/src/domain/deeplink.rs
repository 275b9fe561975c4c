//! Deep links for channels the user completes in another app.

use serde::Serialize;
use shared_types::{ChannelError, ChannelKind, RecipientChannel};
use std::fmt;

/// What the presentation layer should open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeepLinkKind {
    /// Phone dialer (`tel:`)
    Dial,
    /// Chat app with a prefilled message (`https://wa.me/`)
    Chat,
}

/// URI handed to the presentation layer for a dial or chat channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeepLink {
    pub kind: DeepLinkKind,
    pub uri: String,
}

impl DeepLink {
    /// `tel:<number>`, keeping a leading `+`.
    pub fn dial(channel: &RecipientChannel) -> Result<Self, ChannelError> {
        let number = channel.normalized_number()?;
        Ok(Self {
            kind: DeepLinkKind::Dial,
            uri: format!("tel:{number}"),
        })
    }

    /// `https://wa.me/<digits>?text=<body>`; the chat URL takes bare digits.
    pub fn chat(channel: &RecipientChannel, body: &str) -> Result<Self, ChannelError> {
        let number = channel.normalized_number()?;
        let digits = number.trim_start_matches('+');
        Ok(Self {
            kind: DeepLinkKind::Chat,
            uri: format!("https://wa.me/{digits}?text={}", urlencoding::encode(body)),
        })
    }

    /// Link for `channel`, or `None` for SMS which is sent directly.
    pub fn for_channel(
        channel: &RecipientChannel,
        body: &str,
    ) -> Result<Option<Self>, ChannelError> {
        match channel.kind {
            ChannelKind::Sms => Ok(None),
            ChannelKind::DirectDial => Self::dial(channel).map(Some),
            ChannelKind::ChatDeeplink => Self::chat(channel, body).map(Some),
        }
    }
}

impl fmt::Display for DeepLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}
