//! Inbound event sources.
//!
//! An event source turns a raw inbound request into a verified `InboundEvent`.
//! Request authentication lives here, so the rest of the crate only ever sees
//! events that came from the chat platform.

pub mod slack;

use std::{ops::Deref, sync::Arc};

use thiserror::Error;

use crate::base::types::{InboundEvent, InboundRequest};

/// Why an inbound request was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventError {
    /// Missing, stale, or mismatched request signature.
    #[error("unauthorized request: {0}")]
    Unauthorized(String),
    /// The request was authentic but its body could not be understood.
    #[error("malformed request: {0}")]
    Malformed(String),
}

impl EventError {
    /// HTTP status code to answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            EventError::Unauthorized(_) => 401,
            EventError::Malformed(_) => 400,
        }
    }
}

// Traits.

/// Generic "event source" trait that platforms must implement.
pub trait GenericEventSource: Send + Sync + 'static {
    /// Verify and decode one inbound request.
    fn receive(&self, request: &InboundRequest) -> Result<InboundEvent, EventError>;
}

// Structs.

/// Event source for the application.
///
/// Trivially cloneable, like `ChatClient`.
#[derive(Clone)]
pub struct EventSource {
    inner: Arc<dyn GenericEventSource>,
}

impl Deref for EventSource {
    type Target = dyn GenericEventSource;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl EventSource {
    pub fn new(inner: Arc<dyn GenericEventSource>) -> Self {
        Self { inner }
    }
}
