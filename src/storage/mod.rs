//! Storage layer for payday-budget
//!
//! Budget documents on disk, as JSON or YAML, written atomically.

pub mod document;
pub mod file_io;

pub use document::{BudgetDocument, DOCUMENT_SCHEMA_VERSION};
pub use file_io::{read_document, write_atomic, DocumentFormat};
