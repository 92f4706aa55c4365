//! Anonymization of generated bookmark and guide files
//!
//! Workspace, user and channel IDs, personal names, company names and
//! channel names are replaced with dummy values. Replacements are recorded
//! in a JSON sidecar so the same real value maps to the same dummy across
//! runs.

pub mod audit;
pub mod error;
pub mod generator;
pub mod mapping;
pub mod processor;
pub mod redactor;

pub use audit::{AuditReport, Finding, SecretScanner, Severity};
pub use error::{AnonymizeError, Result};
pub use generator::{IdKind, NameStyle};
pub use mapping::{Category, Mapper, MappingTable};
pub use processor::{FileProcessor, BATCH_PATTERNS};
pub use redactor::{Pass, RedactionInfo, Redactor};
