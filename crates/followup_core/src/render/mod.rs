//! Protocol rendering and output payloads.
//!
//! # Responsibility
//! - Render documents into protocol text and its Markdown variant.
//! - Convert rendered text into HTML preview/clipboard fragments.
//! - Name exported files.

pub mod export;
pub mod preview;
pub mod protocol;
