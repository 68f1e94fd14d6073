//! Use-case services over the document store.
//!
//! # Responsibility
//! - Orchestrate repository calls into save/trash/restore flows.
//! - Keep CLI callers decoupled from storage details.

pub mod document_service;
