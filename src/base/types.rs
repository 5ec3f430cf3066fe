use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// A user referencing the bot in a channel message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionEvent {
    /// Raw message text, usually starting with `<@BOT_ID>`.
    pub text: String,
    /// The conversation the message arrived in.
    pub channel: String,
    /// Timestamp of the originating message; the reply is threaded under it.
    pub event_ts: String,
}

/// An outbound message for the chat client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub channel: String,
    pub thread_ts: Option<String>,
    pub text: String,
}

/// Transport-neutral view of an inbound request.
///
/// Header names are lower-case.
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl InboundRequest {
    /// Look up a header by its lower-case name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// A verified, decoded inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Slack's endpoint handshake; the challenge must be echoed back.
    UrlVerification { challenge: String },
    AppMention(MentionEvent),
    /// Anything else the bot does not act on.
    Ignored { kind: String },
}
