use std::sync::LazyLock;

use regex::Regex;
use tracing::{info, instrument};

use crate::{
    base::types::{MentionEvent, Reply, Void},
    service::chat::ChatClient,
};

/// Greeting line that opens every reply.
pub const GREETING: &str = "Hello! :wave:";

/// Matches a single `<@...>` token, only at the very start of the text.
static LEADING_MENTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<@[^>]+>").expect("mention pattern is valid"));

/// Removes one leading mention token and trims the remainder.
///
/// Mentions anywhere else in the text are left alone.
pub fn strip_leading_mention(text: &str) -> &str {
    let rest = match LEADING_MENTION.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    };

    rest.trim()
}

/// Builds the reply body: the greeting, then the stripped text as a quote.
pub fn compose_reply_text(text: &str) -> String {
    format!("{GREETING}\n> {}", strip_leading_mention(text))
}

/// Builds the threaded reply for a mention.
pub fn build_reply(event: &MentionEvent) -> Reply {
    Reply {
        channel: event.channel.clone(),
        thread_ts: Some(event.event_ts.clone()),
        text: compose_reply_text(&event.text),
    }
}

/// Replies once, in thread, to an app mention.
///
/// Send failures are returned as-is; nothing is retried here.
#[instrument(skip_all, fields(channel = %event.channel, event_ts = %event.event_ts))]
pub async fn handle_app_mention(event: &MentionEvent, chat: &ChatClient) -> Void {
    info!("Received app mention: {:?}", event);

    let reply = build_reply(event);

    chat.send_message(&reply).await
}
