//! Persistence contracts for saved meeting documents.
//!
//! # Invariants
//! - Repositories store whole `Document` payloads; no field is derived in SQL.
//! - Missing rows are reported as `NotFound` on mutating calls and as `None`
//!   on lookups.

pub mod doc_repo;
