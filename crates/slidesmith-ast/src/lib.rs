//! slidesmith-ast - Document tree definitions
//!
//! This crate provides the read-only document tree consumed by slidesmith
//! when mapping a structured document into a slide deck. Upstream parsers
//! produce this tree; slidesmith never parses source markup itself, only
//! the inline fragments carried on leaf nodes.

pub mod block;
pub mod document;

// Re-exports
pub use block::{
    Admonition, AdmonitionBody, Block, Image, List, ListItem, ListKind, Listing, OpenBlock,
    OtherBlock, Paragraph, Row, Section, Table,
};
pub use document::{Document, DocumentMeta};

/// Crate version, re-exported for callers that report it
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
