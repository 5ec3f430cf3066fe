//! Slack Events API source.
//!
//! Verifies the `v0` request signature, then decodes the push event envelope.

use serde_json::Value;
use slack_morphism::{prelude::*, signature_verifier::SlackEventSignatureVerifier};
use tracing::{debug, instrument, warn};

use std::sync::Arc;

use crate::base::{
    config::Config,
    types::{InboundEvent, InboundRequest, MentionEvent},
};

use super::{EventError, EventSource, GenericEventSource};

impl EventSource {
    /// Creates a new Slack event source.
    pub fn slack(config: &Config) -> Self {
        Self::new(Arc::new(SlackEventSource::new(&config.slack_signing_secret)))
    }
}

/// Slack Events API request verifier and decoder.
pub struct SlackEventSource {
    verifier: SlackEventSignatureVerifier,
}

impl SlackEventSource {
    pub fn new(signing_secret: &str) -> Self {
        Self {
            verifier: SlackEventSignatureVerifier::new(&SlackSigningSecret(signing_secret.to_string())),
        }
    }

    fn verify(&self, request: &InboundRequest) -> Result<(), EventError> {
        let timestamp = request
            .header(SlackEventSignatureVerifier::SLACK_SIGNED_TIMESTAMP)
            .ok_or_else(|| EventError::Unauthorized("missing request timestamp".into()))?;
        let signature = request
            .header(SlackEventSignatureVerifier::SLACK_SIGNED_HASH_HEADER)
            .ok_or_else(|| EventError::Unauthorized("missing request signature".into()))?;

        // Screen the timestamp without arithmetic that can overflow; the verifier's own window check subtracts.
        let sent_at: i64 = timestamp.parse().map_err(|_| EventError::Unauthorized(format!("invalid request timestamp `{timestamp}`")))?;
        if chrono::Utc::now().timestamp().abs_diff(sent_at) > SlackEventSignatureVerifier::MAX_TIMESTAMP_AGE_SECONDS.unsigned_abs() {
            return Err(EventError::Unauthorized(format!("stale request timestamp `{timestamp}`")));
        }

        self.verifier.verify(signature, &request.body, timestamp).map_err(|e| EventError::Unauthorized(e.to_string()))
    }
}

impl GenericEventSource for SlackEventSource {
    #[instrument(skip_all)]
    fn receive(&self, request: &InboundRequest) -> Result<InboundEvent, EventError> {
        self.verify(request)?;
        decode_push_event(&request.body)
    }
}

/// Decodes an Events API body into the events this bot cares about.
fn decode_push_event(body: &str) -> Result<InboundEvent, EventError> {
    let value: Value = serde_json::from_str(body).map_err(|e| EventError::Malformed(format!("body is not JSON: {e}")))?;

    let envelope_type = value.get("type").and_then(Value::as_str).unwrap_or_default().to_string();
    let event_type = value.pointer("/event/type").and_then(Value::as_str).unwrap_or_default().to_string();

    // Only decode the envelopes we act on; other event shapes are acknowledged untouched.
    match (envelope_type.as_str(), event_type.as_str()) {
        ("url_verification", _) | ("event_callback", "app_mention") => {}
        ("event_callback", _) => {
            debug!("Ignoring `{}` event.", event_type);
            return Ok(InboundEvent::Ignored { kind: event_type });
        }
        _ => {
            warn!("Ignoring `{}` envelope.", envelope_type);
            return Ok(InboundEvent::Ignored { kind: envelope_type });
        }
    }

    let push_event: SlackPushEvent = match serde_json::from_value(value) {
        Ok(push_event) => push_event,
        // A signed callback we cannot type is still acknowledged, or Slack keeps redelivering it.
        Err(e) if envelope_type == "event_callback" => {
            warn!("Ignoring undecodable `{}` event: {}", event_type, e);
            return Ok(InboundEvent::Ignored { kind: event_type });
        }
        Err(e) => return Err(EventError::Malformed(format!("unexpected `{envelope_type}` payload: {e}"))),
    };

    match push_event {
        SlackPushEvent::UrlVerification(verification) => Ok(InboundEvent::UrlVerification { challenge: verification.challenge }),
        SlackPushEvent::EventCallback(callback) => match callback.event {
            SlackEventCallbackBody::AppMention(mention) => Ok(InboundEvent::AppMention(MentionEvent {
                text: mention.content.text.unwrap_or_default(),
                channel: mention.channel.0,
                // Slack sets `event_ts` equal to the message `ts` for mentions.
                event_ts: mention.origin.ts.0,
            })),
            _ => Ok(InboundEvent::Ignored { kind: event_type }),
        },
        _ => Ok(InboundEvent::Ignored { kind: envelope_type }),
    }
}

// Tests.
