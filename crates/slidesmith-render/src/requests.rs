//! Mutation request vocabulary.
//!
//! Requests are plain serde values shaped for a presentation batch
//! update endpoint: one batch serializes as a JSON array of externally
//! tagged objects, `[{"createSlide": {...}}, {"insertText": {...}}]`.
//! The generator builds them; a thin API client submits them.

use serde::{Deserialize, Serialize};

/// One mutation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    CreateSlide(CreateSlideRequest),
    DeleteObject(DeleteObjectRequest),
    InsertText(InsertTextRequest),
    UpdateTextStyle(UpdateTextStyleRequest),
    CreateParagraphBullets(CreateParagraphBulletsRequest),
    UpdateParagraphStyle(UpdateParagraphStyleRequest),
    CreateImage(CreateImageRequest),
    CreateTable(CreateTableRequest),
}

/// Create a page, optionally instantiating a named layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlideRequest {
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_layout_reference: Option<LayoutReference>,
}

/// Delete any page or page element by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteObjectRequest {
    pub object_id: String,
}

/// Insert text into a shape or table cell at a character index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertTextRequest {
    pub object_id: String,
    pub text: String,
    pub insertion_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<TableCellLocation>,
}

/// Restyle a text range; `fields` masks which style members apply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTextStyleRequest {
    pub object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_location: Option<TableCellLocation>,
    pub text_range: Range,
    pub style: TextStyle,
    pub fields: String,
}

/// Turn the paragraphs in a range into a bulleted list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParagraphBulletsRequest {
    pub object_id: String,
    pub text_range: Range,
    pub bullet_preset: BulletPreset,
}

/// Restyle the paragraphs overlapping a range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParagraphStyleRequest {
    pub object_id: String,
    pub text_range: Range,
    pub style: ParagraphStyle,
    pub fields: String,
}

/// Place an image on a page at an explicit size and transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageRequest {
    pub url: String,
    pub element_properties: PageElementProperties,
}

/// Create an empty table grid on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableRequest {
    pub object_id: String,
    pub element_properties: PageElementProperties,
    pub rows: usize,
    pub columns: usize,
}

/// A character range within a shape's text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    #[serde(rename = "type")]
    pub range_type: RangeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_index: Option<usize>,
}

impl Range {
    /// A fixed `[start, end)` character range
    pub fn fixed(start_index: usize, end_index: usize) -> Self {
        Self {
            range_type: RangeType::FixedRange,
            start_index: Some(start_index),
            end_index: Some(end_index),
        }
    }

    /// The whole text of the shape or cell
    pub fn all() -> Self {
        Self {
            range_type: RangeType::All,
            start_index: None,
            end_index: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RangeType {
    FixedRange,
    All,
}

/// Character style members; unset members stay untouched by the mask
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<OptionalColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<OptionalColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

/// Paragraph style members
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_below: Option<Dimension>,
}

/// A hyperlink target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub url: String,
}

/// A color that can also be explicitly unset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalColor {
    pub opaque_color: OpaqueColor,
}

/// Either a concrete RGB color or a theme slot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpaqueColor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rgb_color: Option<RgbColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<ThemeColor>,
}

impl OpaqueColor {
    /// A concrete RGB color
    pub fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self {
            rgb_color: Some(RgbColor { red, green, blue }),
            theme_color: None,
        }
    }

    /// A theme color slot
    pub fn theme(theme_color: ThemeColor) -> Self {
        Self {
            rgb_color: None,
            theme_color: Some(theme_color),
        }
    }
}

/// RGB components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThemeColor {
    Light1,
    Light2,
    Dark1,
    Dark2,
    Accent1,
    Accent2,
}

/// A magnitude with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub magnitude: f64,
    pub unit: Unit,
}

impl Dimension {
    /// A length in points
    pub fn points(magnitude: f64) -> Self {
        Self {
            magnitude,
            unit: Unit::Pt,
        }
    }

    /// A length in English Metric Units
    pub fn emu(magnitude: f64) -> Self {
        Self {
            magnitude,
            unit: Unit::Emu,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    Emu,
    Pt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BulletPreset {
    BulletDiscCircleSquare,
    BulletCheckbox,
    NumberedDigitAlphaRoman,
}

/// Reference to a layout by its object id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReference {
    pub layout_id: String,
}

/// A table cell address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellLocation {
    pub row_index: usize,
    pub column_index: usize,
}

/// Page id plus optional geometry for a new page element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElementProperties {
    pub page_object_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<AffineTransform>,
}

/// Element extent as dimensioned width and height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub width: Dimension,
    pub height: Dimension,
}

/// Element placement expressed as an affine matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffineTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub shear_x: f64,
    pub shear_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub unit: Unit,
}
