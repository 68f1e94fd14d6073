//! Task detection and resolution.
//!
//! # Responsibility
//! - Detect `@name` assignees and loose due dates in free-text lines.
//! - Merge explicit task rows with auto-detected tasks.
//! - Collect known participant names from current and saved documents.
//!
//! # Invariants
//! - All functions are pure over their inputs; storage supplies history.

pub mod assignee;
pub mod dates;
pub mod extract;
pub mod names;
pub mod resolver;
