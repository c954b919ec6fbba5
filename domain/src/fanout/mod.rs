//! Fan-out domain
//!
//! - [`value_objects::FanOutTarget`] — one requested output (e.g. a language code)
//! - [`value_objects::FanOutResult`] — the settled outcome for one target
//! - [`language::Language`] — the table used to resolve language targets

pub mod language;
pub mod value_objects;
