//! # slidesmith-render
//!
//! Mutation request generation for slide decks.
//!
//! This crate turns a built [`SlideDeck`](slidesmith_core::SlideDeck)
//! into an ordered batch of presentation API requests. It owns no
//! network code: the caller fetches a [`Presentation`] snapshot,
//! applies the generated batches through its own API client, and
//! refetches between phases.
//!
//! ## Features
//!
//! - **Two-phase generation**: page setup first, content fill second
//! - **Body assignment**: heuristic distribution of content over
//!   multi-placeholder layouts
//! - **Image layout**: row packing, proportional fit, and centering
//!   inside the body bounding box
//! - **Styled text**: offset-accurate range styling, bullets, forced
//!   font sizes, paragraph spacing
//!
//! ## Example
//!
//! ```rust,ignore
//! use slidesmith_render::{Presentation, RequestGenerator};
//!
//! let snapshot: Presentation = client.fetch_presentation(id)?;
//! let generator = RequestGenerator::new(&snapshot);
//! client.batch_update(id, &generator.setup_requests(&deck))?;
//!
//! let refreshed = client.fetch_presentation(id)?;
//! let generator = RequestGenerator::new(&refreshed);
//! client.batch_update(id, &generator.content_requests(&deck))?;
//! ```

pub mod assign;
pub mod generator;
pub mod page;
pub mod requests;

// Re-exports
pub use assign::assign_content;
pub use generator::RequestGenerator;
pub use page::{
    body_box, ElementSize, ElementTransform, LayoutInfo, Page, PageElement, Placeholder,
    PlaceholderKind, Presentation,
};
pub use requests::{
    AffineTransform, BulletPreset, CreateImageRequest, CreateParagraphBulletsRequest,
    CreateSlideRequest, CreateTableRequest, DeleteObjectRequest, Dimension, InsertTextRequest,
    LayoutReference, Link, OpaqueColor, OptionalColor, PageElementProperties, ParagraphStyle,
    Range, RangeType, Request, RgbColor, Size, TableCellLocation, TextStyle, ThemeColor, Unit,
    UpdateParagraphStyleRequest, UpdateTextStyleRequest,
};
