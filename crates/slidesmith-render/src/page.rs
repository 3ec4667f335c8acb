//! Read-side presentation snapshot.
//!
//! The request generator never talks to a presentation API itself. It
//! walks this snapshot, fetched and deserialized by the caller's API
//! client, to find the pages, placeholder elements, and layouts that
//! content requests must target. All geometry is in EMU.

use serde::{Deserialize, Serialize};
use slidesmith_layout::Rect;

/// A presentation snapshot: pages, available layouts, page geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    /// Pages in presentation order
    pub pages: Vec<Page>,
    /// Layouts the presentation template provides
    pub layouts: Vec<LayoutInfo>,
    /// Page width in EMU
    pub page_width: f64,
    /// Page height in EMU
    pub page_height: f64,
}

/// One available slide layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutInfo {
    /// API object id, referenced when creating pages
    pub object_id: String,
    /// Template layout name, matched against slide layout ids
    pub name: String,
}

/// One page of the presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// API object id of the page
    pub object_id: String,
    /// Placeholder elements the page's layout provides
    pub elements: Vec<PageElement>,
    /// Shape id of the speaker notes text box, when the notes page has one
    pub speaker_notes_shape_id: Option<String>,
}

impl Page {
    /// First element holding a title placeholder of either kind
    pub fn title_element(&self) -> Option<&PageElement> {
        self.elements.iter().find(|element| {
            matches!(
                element.placeholder_kind(),
                Some(PlaceholderKind::Title) | Some(PlaceholderKind::CenteredTitle)
            )
        })
    }

    /// First element holding a centered title placeholder
    pub fn centered_title_element(&self) -> Option<&PageElement> {
        self.elements
            .iter()
            .find(|element| element.placeholder_kind() == Some(PlaceholderKind::CenteredTitle))
    }

    /// All body placeholder elements, in page order
    pub fn body_elements(&self) -> Vec<&PageElement> {
        self.elements
            .iter()
            .filter(|element| element.placeholder_kind() == Some(PlaceholderKind::Body))
            .collect()
    }
}

/// One shape on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageElement {
    /// API object id of the shape
    pub object_id: String,
    /// Placeholder marker, absent on free-floating shapes
    pub placeholder: Option<Placeholder>,
    /// Untransformed shape size in EMU
    pub size: Option<ElementSize>,
    /// Affine placement of the shape on the page
    pub transform: Option<ElementTransform>,
}

impl PageElement {
    /// The element's placeholder kind, when it is a placeholder
    pub fn placeholder_kind(&self) -> Option<PlaceholderKind> {
        self.placeholder.as_ref().map(|placeholder| placeholder.kind)
    }
}

/// Placeholder marker on a layout-provided shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placeholder {
    /// What the placeholder holds
    pub kind: PlaceholderKind,
    /// Ordinal among same-kind placeholders on the page
    pub index: Option<u32>,
}

/// Placeholder classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderKind {
    Title,
    CenteredTitle,
    Body,
    Other,
}

/// Shape size before the transform is applied, in EMU
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementSize {
    pub width: f64,
    pub height: f64,
}

/// Affine placement of a shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub shear_x: f64,
    pub shear_y: f64,
}

impl Default for ElementTransform {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            shear_x: 0.0,
            shear_y: 0.0,
        }
    }
}

/// Bounding box of a body element, in EMU
///
/// The box is the transformed shape extent: translate for the origin,
/// scale and shear applied to the raw size for the extent. An element
/// without size or transform, or no element at all, falls back to the
/// full page.
pub fn body_box(presentation: &Presentation, element: Option<&PageElement>) -> Rect {
    if let Some(element) = element {
        if let (Some(size), Some(transform)) = (&element.size, &element.transform) {
            return Rect::new(
                transform.translate_x,
                transform.translate_y,
                transform.scale_x * size.width + transform.shear_x * size.height,
                transform.scale_y * size.height + transform.shear_y * size.width,
            );
        }
    }
    Rect::new(0.0, 0.0, presentation.page_width, presentation.page_height)
}
