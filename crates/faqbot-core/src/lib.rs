//! # faqbot-core
//!
//! Core FAQ store logic for faqbot, the chat-driven FAQ bot.
//!
//! This crate is framework-agnostic and can be used by:
//! - HTTP daemon (via the invoke endpoint)
//! - Any chat integration that maps slash commands onto [`FaqCommand`]
//!
//! ## Key Concepts
//!
//! - **FaqStore**: The key → entry mapping, backed by one JSON file
//! - **FaqCommand**: A parsed chat command, executed against the store
//! - **Raw form**: Entry text with newlines/tabs as literal `\n`/`\t`,
//!   for single-line editing round-trips

pub mod commands;
pub mod escape;
pub mod persistence;
pub mod store;

// Re-export commonly used types
pub use commands::{CommandReply, FaqCommand, InvokeError};
pub use persistence::StoreError;
pub use store::{EntryField, FaqEntry, FaqStore, RESERVED_KEYS};
