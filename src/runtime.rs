//! Runtime services and request dispatch for the mention responder.

use lambda_runtime::{LambdaEvent, service_fn};
use tracing::{error, info, instrument, warn};

use crate::{
    base::{
        config::Config,
        types::{InboundEvent, Res, Void},
    },
    interaction::app_mention,
    service::{
        chat::ChatClient,
        events::EventSource,
        lambda::{GatewayRequest, GatewayResponse},
    },
};

/// Runtime service context that can be shared across invocations.
///
/// Built once at process start. It is designed to be trivially cloneable,
/// allowing it to be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// Verifies and decodes inbound requests.
    pub events: EventSource,
    /// The chat client used for replies.
    pub chat: ChatClient,
}

impl Runtime {
    /// Create a new runtime instance backed by Slack.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        let events = EventSource::slack(&config);
        let chat = ChatClient::slack(&config)?;

        Ok(Self { config, events, chat })
    }

    /// Serve Lambda invocations until the runtime shuts down.
    pub async fn start(&self) -> Void {
        let runtime = self.clone();

        lambda_runtime::run(service_fn(move |event: LambdaEvent<GatewayRequest>| {
            let runtime = runtime.clone();
            async move { Ok::<_, lambda_runtime::Error>(runtime.handle(event.payload).await) }
        }))
        .await
        .map_err(|e| anyhow::anyhow!("Lambda runtime failed: {}", e))
    }

    /// Handle one proxied request end to end.
    ///
    /// The reply is sent before returning, since the function may be frozen
    /// as soon as the response is handed back.
    #[instrument(skip_all)]
    pub async fn handle(&self, request: GatewayRequest) -> GatewayResponse {
        let request = match request.into_inbound() {
            Ok(request) => request,
            Err(err) => {
                warn!("Unable to decode request: {}", err);
                return GatewayResponse::status(400);
            }
        };

        if let Some(retry) = request.header("x-slack-retry-num") {
            warn!("Slack redelivery #{} ({}).", retry, request.header("x-slack-retry-reason").unwrap_or("unknown"));
        }

        let event = match self.events.receive(&request) {
            Ok(event) => event,
            Err(err) => {
                warn!("Rejected request: {}", err);
                return GatewayResponse::status(err.status_code());
            }
        };

        match event {
            InboundEvent::UrlVerification { challenge } => {
                info!("Answering URL verification ...");
                GatewayResponse::json(&serde_json::json!({ "challenge": challenge }))
            }
            InboundEvent::AppMention(mention) => {
                info!("Received app mention event ...");

                if let Err(err) = app_mention::handle_app_mention(&mention, &self.chat).await {
                    error!("Error while handling: {}", err);
                }

                GatewayResponse::ok()
            }
            InboundEvent::Ignored { kind } => {
                info!("Acknowledging unhandled `{}` event.", kind);
                GatewayResponse::ok()
            }
        }
    }
}
