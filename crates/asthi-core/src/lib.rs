//! asthi-core
//!
//! Shared vocabulary of the Asthi Care service: request languages, chat
//! transcripts, and patient notification requests. No I/O lives here.

pub mod error;
pub mod models;
