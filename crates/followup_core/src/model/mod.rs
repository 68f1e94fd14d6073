//! Meeting-notes domain model.
//!
//! # Responsibility
//! - Define the plain records shared by normalizers, task extraction,
//!   rendering and storage.
//! - Keep the stored JSON shape stable for older saved documents.
//!
//! # Invariants
//! - Raw textarea strings are the source of truth; structured arrays are a
//!   cache that can always be re-derived from them.
//! - Tasks and text items never carry an empty title/text.

pub mod document;
