//! asthi-proxy
//!
//! Stateless forwarding of client requests to third-party vendors: AI chat
//! completion, ElevenLabs speech, Twilio SMS and SendGrid email. Each call
//! attaches a server-held credential, makes exactly one outbound request,
//! and normalizes the outcome into a value or a [`error::ProxyError`].
//! Nothing is retried and nothing is shared between calls.

pub mod chat;
pub mod config;
pub mod error;
#[cfg(feature = "mock")]
pub mod mock;
pub mod notify;
pub mod speech;
pub mod transport;
