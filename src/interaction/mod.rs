//! Event handling and user interactions for the mention responder.
//!
//! This module turns decoded chat events into replies.

pub mod app_mention;
