//! Library root for `mention-responder`.
//!
//! A Slack bot, deployed as an AWS Lambda function, that answers app mentions:
//! - Verifies and decodes Slack Events API requests
//! - Strips the leading mention from the message text
//! - Replies in thread with a greeting and a quote of what was said
//!
//! Each external collaborator sits behind a trait, so the dispatch and reply
//! logic can be exercised without a network.

pub mod base;
pub mod interaction;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the Lambda runtime:
/// - Initializes the crypto provider
/// - Creates the runtime context with the event source and chat client
/// - Serves invocations until the runtime shuts down
pub async fn start(config: Config) -> Void {
    info!("Starting mention-responder ...");

    // Start the crypto provider.
    crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install the rustls crypto provider."))?;

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config)?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
