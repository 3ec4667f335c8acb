//! Slide content data structures.
//!
//! This module defines the intermediate representation produced by the
//! mapping pass: normalized content units, styled text ranges, slide
//! variants, and the deck itself. Everything here is a build-once value
//! object; renderers read it to derive presentation API mutations.

use serde::{Deserialize, Serialize};

use crate::constants;

/// One styled run of plain text within a content item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InlineToken {
    /// Plain text with accumulated style roles
    Text {
        /// Decoded text of the run
        text: String,
        /// Style roles accumulated from enclosing markup tags
        roles: Vec<String>,
    },
    /// A hyperlink run carrying its target
    Anchor {
        /// Decoded text of the whole link
        text: String,
        /// Link target URL
        target: String,
        /// Style roles accumulated from enclosing markup tags
        roles: Vec<String>,
    },
}

impl InlineToken {
    /// Create a plain text token
    pub fn plain(text: impl Into<String>, roles: Vec<String>) -> Self {
        Self::Text {
            text: text.into(),
            roles,
        }
    }

    /// Create an anchor token
    pub fn anchor(text: impl Into<String>, target: impl Into<String>, roles: Vec<String>) -> Self {
        Self::Anchor {
            text: text.into(),
            target: target.into(),
            roles,
        }
    }

    /// The token's decoded text
    pub fn text(&self) -> &str {
        match self {
            Self::Text { text, .. } | Self::Anchor { text, .. } => text,
        }
    }

    /// The token's accumulated style roles
    pub fn roles(&self) -> &[String] {
        match self {
            Self::Text { roles, .. } | Self::Anchor { roles, .. } => roles,
        }
    }
}

/// A half-open character interval into the owning content's plain text
///
/// Offsets are character counts over the markup-stripped, entity-decoded
/// text, never byte positions into the marked-up source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRange {
    /// The styled run covering this interval
    pub token: InlineToken,
    /// Start offset (inclusive)
    pub start_index: usize,
    /// End offset (exclusive)
    pub end_index: usize,
}

impl TextRange {
    /// Create a new range
    pub fn new(token: InlineToken, start_index: usize, end_index: usize) -> Self {
        Self {
            token,
            start_index,
            end_index,
        }
    }

    /// Length of the range in characters
    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    /// Check if the range is empty
    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }
}

/// One normalized unit of slide body material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Content {
    /// Styled running text
    Text(TextContent),
    /// A bullet, numbered, or checklist list
    List(ListContent),
    /// A code listing rendered as one paragraph
    Listing(ListingContent),
    /// An image with probed pixel dimensions
    Image(ImageContent),
    /// A table with styled row groups
    Table(TableContent),
}

impl Content {
    /// Check if this content is an image
    pub fn is_image(&self) -> bool {
        matches!(self, Content::Image(_))
    }
}

/// Styled running text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextContent {
    /// Plain, markup-stripped text
    pub text: String,
    /// Styled ranges over `text`; empty when the source had no markup
    pub ranges: Vec<TextRange>,
    /// Roles inherited from the source node and its parent
    pub roles: Vec<String>,
    /// Forced font size in points, when the source requests one
    pub font_size: Option<u32>,
    /// Paragraph spacing below, in points
    pub space_below: Option<f64>,
}

impl TextContent {
    /// Create unstyled text content
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Set the roles
    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }
}

/// List rendering style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListType {
    /// Plain bullet list
    Bullet,
    /// Numbered list
    Ordered,
    /// Checkbox list
    Checklist,
}

/// A list flattened to newline-joined item text
///
/// Nested items are prefixed with one tab per nesting depth in `text`;
/// range tokens covering nested item heads carry zero-width joiners in
/// the same positions instead, a bookkeeping artifact of offset-aligned
/// range parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListContent {
    /// `\n`-joined item text, tab-indented by nesting depth
    pub text: String,
    /// Rendering style of the list
    pub list_type: ListType,
    /// Styled ranges over `text`
    pub ranges: Vec<TextRange>,
    /// Roles inherited from the source node and its parent
    pub roles: Vec<String>,
}

/// A code listing collapsed into one paragraph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingContent {
    /// Decoded listing text with line breaks replaced by U+000B
    pub text: String,
    /// Font size in points, derived from the longest source line
    pub font_size: u32,
}

impl ListingContent {
    /// One full-width monospace range covering the whole listing
    pub fn ranges(&self) -> Vec<TextRange> {
        vec![TextRange::new(
            InlineToken::plain(self.text.clone(), vec!["code".to_string()]),
            0,
            self.text.chars().count(),
        )]
    }
}

/// An image with probed pixel dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageContent {
    /// Absolute image URL
    pub url: String,
    /// Probed width in pixels
    pub width: u32,
    /// Probed height in pixels
    pub height: u32,
    /// Extra padding around this image, in layout units
    pub padding: f64,
    /// Horizontal placement fine-tuning offset
    pub offset_x: f64,
    /// Vertical placement fine-tuning offset
    pub offset_y: f64,
}

impl ImageContent {
    /// Create an image content with probed dimensions
    pub fn new(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            width,
            height,
            padding: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// Cell style by row group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStyle {
    Header,
    Body,
    Footer,
}

/// A single table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Decoded cell text
    pub text: String,
    /// Row-group style of the cell
    pub style: CellStyle,
}

/// A table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in column order
    pub cells: Vec<TableCell>,
}

/// A table with header, body, and footer rows flattened in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableContent {
    /// All rows: header group first, then body, then footer
    pub rows: Vec<TableRow>,
    /// Declared column count
    pub columns: u32,
    /// Roles inherited from the source node and its parent
    pub roles: Vec<String>,
}

/// An ordered group of content plus associated speaker notes
///
/// Speaker notes are themselves structured groups, so notes keep styled
/// ranges and list structure rather than degrading to flat strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SlideContents {
    /// Content units in order
    pub contents: Vec<Content>,
    /// Speaker-note groups accumulated while mapping
    pub speaker_notes: Vec<SlideContents>,
}

impl SlideContents {
    /// Create an empty group
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a group from content units
    pub fn from_contents(contents: Vec<Content>) -> Self {
        Self {
            contents,
            speaker_notes: Vec::new(),
        }
    }

    /// Append another group's contents and notes in order
    pub fn append(&mut self, other: SlideContents) {
        self.contents.extend(other.contents);
        self.speaker_notes.extend(other.speaker_notes);
    }

    /// Check if the group holds no content
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

/// A single slide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Slide {
    /// Title with no body
    TitleOnly(TitleOnlySlide),
    /// Title and one body group
    TitleAndBody(TitleAndBodySlide),
    /// Title and two independently mapped columns
    TitleAndTwoColumns(TitleAndTwoColumnsSlide),
}

/// A slide with no body content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleOnlySlide {
    /// Slide title; `None` when suppressed
    pub title: Option<String>,
    /// Speaker-note groups
    pub speaker_notes: Vec<SlideContents>,
    /// Resolved layout identifier
    pub layout_id: String,
}

/// A slide with a single body group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleAndBodySlide {
    /// Slide title; `None` when suppressed
    pub title: Option<String>,
    /// Body content group
    pub body: SlideContents,
    /// Speaker-note groups
    pub speaker_notes: Vec<SlideContents>,
    /// Resolved layout identifier
    pub layout_id: String,
}

/// A slide with two column groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleAndTwoColumnsSlide {
    /// Slide title; `None` when suppressed
    pub title: Option<String>,
    /// Left column group
    pub left_column: SlideContents,
    /// Right column group
    pub right_column: SlideContents,
    /// Speaker-note groups
    pub speaker_notes: Vec<SlideContents>,
    /// Resolved layout identifier
    pub layout_id: String,
}

impl Slide {
    /// Slide title, when not suppressed
    pub fn title(&self) -> Option<&str> {
        match self {
            Slide::TitleOnly(s) => s.title.as_deref(),
            Slide::TitleAndBody(s) => s.title.as_deref(),
            Slide::TitleAndTwoColumns(s) => s.title.as_deref(),
        }
    }

    /// Resolved layout identifier
    pub fn layout_id(&self) -> &str {
        match self {
            Slide::TitleOnly(s) => &s.layout_id,
            Slide::TitleAndBody(s) => &s.layout_id,
            Slide::TitleAndTwoColumns(s) => &s.layout_id,
        }
    }

    /// Speaker-note groups attached to the slide
    pub fn speaker_notes(&self) -> &[SlideContents] {
        match self {
            Slide::TitleOnly(s) => &s.speaker_notes,
            Slide::TitleAndBody(s) => &s.speaker_notes,
            Slide::TitleAndTwoColumns(s) => &s.speaker_notes,
        }
    }

    /// Structural default layout identifier for this variant
    pub fn default_layout_id(&self) -> &'static str {
        match self {
            Slide::TitleOnly(_) => constants::LAYOUT_TITLE_ONLY,
            Slide::TitleAndBody(_) => constants::LAYOUT_TITLE_AND_BODY,
            Slide::TitleAndTwoColumns(_) => constants::LAYOUT_TITLE_AND_TWO_COLUMNS,
        }
    }
}

/// An ordered slide deck
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SlideDeck {
    /// Deck title, from the document title
    pub title: String,
    /// Slides in presentation order
    pub slides: Vec<Slide>,
}

impl SlideDeck {
    /// Get the number of slides
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Check if the deck has no slides
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}
