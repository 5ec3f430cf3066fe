//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for the services the responder uses:
//! - Chat services (e.g., Slack's Web API)
//! - Event sources (e.g., Slack's Events API)
//! - The AWS Lambda proxy integration
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod chat;
pub mod events;
pub mod lambda;
