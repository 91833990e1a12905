//! top-songs web server.
//!
//! Exposes three endpoints that relay chart questions to a chat-completion
//! provider: two returning the model's text verbatim, one decoding the text
//! into a structured [`songs::TopSong`] record.

pub mod config;
pub mod error;
pub mod songs;
pub mod state;
