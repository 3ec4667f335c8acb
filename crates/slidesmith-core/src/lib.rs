//! # slidesmith-core
//!
//! Document-to-presentation content mapping and layout core.
//!
//! This crate turns a parsed document tree into a normalized
//! [`SlideDeck`]: a flat sequence of slides carrying styled text
//! ranges, lists, code listings, tables, probed images, and structured
//! speaker notes. A renderer crate consumes the deck to derive the
//! mutation requests of a concrete presentation API.
//!
//! ## Features
//!
//! - **Inline Markup Parsing**: styled text ranges with cumulative
//!   roles and decoded-character offsets
//! - **Content Mapping**: total over arbitrary block trees, degrading
//!   unsupported content to diagnostics instead of failing
//! - **Section Flattening**: arbitrarily nested sections become one
//!   pre-order slide sequence
//! - **Layout Conventions**: `two-columns` and `notes` roles, title
//!   suppression via `"!"`, per-role layout overrides
//!
//! ## Example
//!
//! ```rust,ignore
//! use slidesmith_ast::Document;
//! use slidesmith_core::build_deck;
//! use slidesmith_probe::HttpProber;
//!
//! let document = Document::with_title("Intro to Graphs");
//! let built = build_deck(&document, &HttpProber::new())?;
//! println!("{} slides", built.deck.len());
//! for warning in built.diagnostics.iter() {
//!     eprintln!("{warning}");
//! }
//! ```

pub mod content;
pub mod deck;
pub mod diagnostics;
pub mod error;
pub mod inline;
pub mod mapper;
pub mod probe;

// Re-exports
pub use content::{
    CellStyle, Content, ImageContent, InlineToken, ListContent, ListType, ListingContent, Slide,
    SlideContents, SlideDeck, TableCell, TableContent, TableRow, TextContent, TextRange,
    TitleAndBodySlide, TitleAndTwoColumnsSlide, TitleOnlySlide,
};
pub use deck::{build_deck, BuiltDeck, DeckBuilder};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{DeckError, Result};
pub use inline::{decode_entities, parse_inline, parse_inline_at, InlineText};
pub use mapper::Mapper;
pub use probe::{ImageProber, ImageSize, ProbeError};

/// Mapping constants
pub mod constants {
    /// Non-printing line separator keeping a listing one paragraph
    pub const VERTICAL_TAB: &str = "\u{000b}";

    /// Zero-width joiner marking one nesting level during range parsing
    pub const DEPTH_MARKER: &str = "\u{200d}";

    /// Indent prefix per nesting level in final list text
    pub const DEPTH_INDENT: &str = "\t";

    /// Header line of a checklist answers speaker note
    pub const ANSWERS_HEADER: &str = "\nCorrect answer(s):\n";

    /// Default layout for a slide without body content
    pub const LAYOUT_TITLE_ONLY: &str = "TITLE_ONLY";

    /// Default layout for a slide with one body
    pub const LAYOUT_TITLE_AND_BODY: &str = "TITLE_AND_BODY";

    /// Default layout for a two-column slide
    pub const LAYOUT_TITLE_AND_TWO_COLUMNS: &str = "TITLE_AND_TWO_COLUMNS";
}
