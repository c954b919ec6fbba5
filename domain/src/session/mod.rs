//! Conversation messages.
//!
//! - [`entities::Message`] — a single `{role, content}` message
//! - [`entities::Role`] — system, user or assistant

pub mod entities;
