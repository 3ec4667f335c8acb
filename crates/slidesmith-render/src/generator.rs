//! Request generation from a built deck.
//!
//! Generation is two-phase against the live presentation:
//!
//! 1. [`RequestGenerator::setup_requests`] deletes the existing pages
//!    and creates one fresh page per slide (plus a leading title page).
//! 2. After the caller applies those and refetches the presentation,
//!    [`RequestGenerator::content_requests`] against the new snapshot
//!    fills titles, bodies, images, tables, and speaker notes.
//!
//! Missing layouts, title elements, or body placeholders degrade to
//! logged warnings; the affected piece of content is skipped and the
//! rest of the deck still renders.

use slidesmith_core::{
    CellStyle, Content, ImageContent, InlineToken, ListType, Slide, SlideContents, SlideDeck,
    TextRange, TitleAndTwoColumnsSlide,
};
use slidesmith_layout::{fit_into, Item, Packer, PackerOptions};

use crate::assign::assign_content;
use crate::page::{body_box, Page, PageElement, Presentation};
use crate::requests::{
    AffineTransform, BulletPreset, CreateImageRequest, CreateParagraphBulletsRequest,
    CreateSlideRequest, CreateTableRequest, DeleteObjectRequest, Dimension, InsertTextRequest,
    LayoutReference, Link, OpaqueColor, OptionalColor, PageElementProperties, ParagraphStyle,
    Range, Request, RgbColor, Size, TableCellLocation, TextStyle, ThemeColor, Unit,
    UpdateParagraphStyleRequest, UpdateTextStyleRequest,
};

/// Layout name of the leading title page
const TITLE_LAYOUT_NAME: &str = "TITLE";

/// Padding around each image when a slide carries more than one
const MULTI_IMAGE_PADDING: f64 = 10.0;

/// Images per packed row
const IMAGES_PER_ROW: usize = 2;

/// Font size forced by the `small` and `statement` roles, in points
const SMALL_FONT_SIZE: u32 = 13;

/// Font size of `big` runs, in points
const BIG_FONT_SIZE_PT: f64 = 20.0;

/// Monospace family for code and keyboard runs
const MONOSPACE_FONT: &str = "Roboto Mono";

// #0063a3
const LINK_COLOR: RgbColor = RgbColor {
    red: 0.0,
    green: 0.388,
    blue: 0.639,
};

/// Derives mutation requests for one deck against one presentation snapshot
pub struct RequestGenerator<'a> {
    presentation: &'a Presentation,
}

impl<'a> RequestGenerator<'a> {
    pub fn new(presentation: &'a Presentation) -> Self {
        Self { presentation }
    }

    /// Requests that replace the presentation's pages with the deck's
    ///
    /// Existing pages are deleted, then a title page and one page per
    /// slide are created in deck order. Each page requests its slide's
    /// layout by name; an unknown layout id degrades to a page without
    /// a layout reference.
    pub fn setup_requests(&self, deck: &SlideDeck) -> Vec<Request> {
        let mut requests = Vec::new();
        for page in &self.presentation.pages {
            requests.push(Request::DeleteObject(DeleteObjectRequest {
                object_id: page.object_id.clone(),
            }));
        }
        requests.push(self.create_slide_request(TITLE_LAYOUT_NAME));
        for slide in &deck.slides {
            requests.push(self.create_slide_request(slide.layout_id()));
        }
        requests
    }

    /// Requests that fill the created pages with the deck's content
    ///
    /// The snapshot must already contain the pages created by
    /// [`setup_requests`](Self::setup_requests): the first page receives
    /// the deck title, and slide `i` renders into page `i + 1`.
    pub fn content_requests(&self, deck: &SlideDeck) -> Vec<Request> {
        let mut requests = Vec::new();

        match self
            .presentation
            .pages
            .first()
            .and_then(Page::centered_title_element)
        {
            Some(element) => {
                if !deck.title.is_empty() {
                    push_insert_text(&mut requests, &element.object_id, &deck.title);
                }
            }
            None => {
                log::warn!("No centered title element on the first page, deck title won't be added")
            }
        }

        let content_pages = self.presentation.pages.len().saturating_sub(1);
        if deck.slides.len() > content_pages {
            log::warn!(
                "Presentation has {content_pages} content pages for {} slides, extra slides skipped",
                deck.slides.len()
            );
        }
        for (slide, page) in deck.slides.iter().zip(self.presentation.pages.iter().skip(1)) {
            self.append_slide(slide, page, &mut requests);
        }
        requests
    }

    fn append_slide(&self, slide: &Slide, page: &Page, requests: &mut Vec<Request>) {
        if let Some(shape_id) = &page.speaker_notes_shape_id {
            if !slide.speaker_notes().is_empty() {
                let notes: Vec<Content> = slide
                    .speaker_notes()
                    .iter()
                    .flat_map(|group| group.contents.iter().cloned())
                    .collect();
                append_textual_content(&notes, shape_id, requests);
            }
        }

        if page.elements.is_empty() {
            log::warn!(
                "No elements on page {}, unable to insert content, skipping slide",
                page.object_id
            );
            return;
        }

        self.append_title(slide, page, requests);
        match slide {
            Slide::TitleOnly(_) => {}
            Slide::TitleAndBody(body_slide) => self.append_body(&body_slide.body, page, requests),
            Slide::TitleAndTwoColumns(columns) => self.append_columns(columns, page, requests),
        }
    }

    fn append_title(&self, slide: &Slide, page: &Page, requests: &mut Vec<Request>) {
        let element = match page.title_element() {
            Some(element) => element,
            None => {
                log::warn!(
                    "No title element on page {}, title {:?} won't be added",
                    page.object_id,
                    slide.title()
                );
                return;
            }
        };
        if let Some(title) = slide.title() {
            if !title.is_empty() {
                push_insert_text(requests, &element.object_id, title);
            }
        }
    }

    fn append_body(&self, body: &SlideContents, page: &Page, requests: &mut Vec<Request>) {
        let bodies = page.body_elements();
        match bodies.len() {
            0 => log::warn!(
                "No body element on page {}, body won't be added",
                page.object_id
            ),
            1 => self.append_content(&body.contents, page, bodies[0], requests),
            count => {
                let groups = assign_content(&body.contents, count);
                for (element, group) in bodies.iter().zip(groups) {
                    if group.is_empty() {
                        continue;
                    }
                    let contents: Vec<Content> = group
                        .into_iter()
                        .map(|index| body.contents[index].clone())
                        .collect();
                    self.append_content(&contents, page, element, requests);
                }
            }
        }
    }

    fn append_columns(
        &self,
        slide: &TitleAndTwoColumnsSlide,
        page: &Page,
        requests: &mut Vec<Request>,
    ) {
        let bodies = page.body_elements();
        if bodies.len() < 2 {
            log::warn!(
                "Fewer than 2 body elements on page {}, columns won't be added",
                page.object_id
            );
            return;
        }
        self.append_content(&slide.left_column.contents, page, bodies[0], requests);
        self.append_content(&slide.right_column.contents, page, bodies[1], requests);
    }

    fn append_content(
        &self,
        contents: &[Content],
        page: &Page,
        placeholder: &PageElement,
        requests: &mut Vec<Request>,
    ) {
        let images: Vec<&ImageContent> = contents
            .iter()
            .filter_map(|content| match content {
                Content::Image(image) => Some(image),
                _ => None,
            })
            .collect();
        if !images.is_empty() {
            self.append_image_content(&images, page, placeholder, requests);
        }
        append_textual_content(contents, &placeholder.object_id, requests);
        append_table_content(contents, page, requests);
    }

    fn append_image_content(
        &self,
        images: &[&ImageContent],
        page: &Page,
        placeholder: &PageElement,
        requests: &mut Vec<Request>,
    ) {
        let padding = if images.len() > 1 {
            MULTI_IMAGE_PADDING
        } else {
            0.0
        };
        let mut packer = Packer::with_options(PackerOptions {
            sort_by_width: true,
            max_items_per_row: Some(IMAGES_PER_ROW),
        });
        for image in images {
            packer.add(Item::new(
                f64::from(image.width) + padding * 2.0,
                f64::from(image.height) + padding * 2.0,
                (*image).clone(),
            ));
        }
        let packed = packer.export();
        if packed.is_empty() {
            return;
        }

        let target = body_box(self.presentation, Some(placeholder));
        let fit = fit_into(&packed, &target);
        for item in &packed.items {
            let image = &item.meta;
            let (translate_x, translate_y) = fit.apply(
                item.x + padding + image.padding + image.offset_x,
                item.y + padding + image.padding + image.offset_y,
            );
            requests.push(Request::CreateImage(CreateImageRequest {
                url: image.url.clone(),
                element_properties: PageElementProperties {
                    page_object_id: page.object_id.clone(),
                    size: Some(Size {
                        width: Dimension::emu(f64::from(image.width) * fit.scale),
                        height: Dimension::emu(f64::from(image.height) * fit.scale),
                    }),
                    transform: Some(AffineTransform {
                        scale_x: 1.0,
                        scale_y: 1.0,
                        shear_x: 0.0,
                        shear_y: 0.0,
                        translate_x,
                        translate_y,
                        unit: Unit::Emu,
                    }),
                },
            }));
        }
    }

    fn create_slide_request(&self, layout_name: &str) -> Request {
        Request::CreateSlide(CreateSlideRequest {
            object_id: uuid::Uuid::new_v4().to_string(),
            slide_layout_reference: self.layout_reference(layout_name),
        })
    }

    fn layout_reference(&self, name: &str) -> Option<LayoutReference> {
        let layout = self
            .presentation
            .layouts
            .iter()
            .find(|layout| layout.name == name);
        match layout {
            Some(layout) => Some(LayoutReference {
                layout_id: layout.object_id.clone(),
            }),
            None => {
                log::warn!("Unable to find a layout named {name}");
                None
            }
        }
    }
}

/// Emit text-bearing contents into one shape with a running character index
///
/// Every content's text gets a trailing newline so consecutive contents
/// land in separate paragraphs. Images and tables are handled elsewhere
/// and skipped here.
fn append_textual_content(contents: &[Content], object_id: &str, requests: &mut Vec<Request>) {
    let mut index = 0;
    for content in contents {
        match content {
            Content::Text(text) => {
                let inserted = format!("{}\n", text.text);
                push_styled_text(
                    requests,
                    object_id,
                    &inserted,
                    &text.ranges,
                    &text.roles,
                    text.font_size,
                    index,
                );
                if let Some(space_below) = text.space_below {
                    requests.push(Request::UpdateParagraphStyle(UpdateParagraphStyleRequest {
                        object_id: object_id.to_string(),
                        text_range: Range::fixed(index, index + inserted.chars().count()),
                        style: ParagraphStyle {
                            space_below: Some(Dimension::points(space_below)),
                        },
                        fields: "spaceBelow".to_string(),
                    }));
                }
                index += inserted.chars().count();
            }
            Content::List(list) => {
                let inserted = format!("{}\n", list.text);
                push_styled_text(
                    requests,
                    object_id,
                    &inserted,
                    &list.ranges,
                    &list.roles,
                    None,
                    index,
                );
                requests.push(Request::CreateParagraphBullets(
                    CreateParagraphBulletsRequest {
                        object_id: object_id.to_string(),
                        text_range: Range::fixed(index, index + inserted.chars().count()),
                        bullet_preset: bullet_preset(list.list_type),
                    },
                ));
                index += inserted.chars().count();
            }
            Content::Listing(listing) => {
                let inserted = format!("{}\n", listing.text);
                push_styled_text(
                    requests,
                    object_id,
                    &inserted,
                    &listing.ranges(),
                    &[],
                    Some(listing.font_size),
                    index,
                );
                index += inserted.chars().count();
            }
            Content::Image(_) | Content::Table(_) => {}
        }
    }
}

/// Emit one table per table content as its own page element
fn append_table_content(contents: &[Content], page: &Page, requests: &mut Vec<Request>) {
    for content in contents {
        if let Content::Table(table) = content {
            let table_id = uuid::Uuid::new_v4().to_string();
            requests.push(Request::CreateTable(CreateTableRequest {
                object_id: table_id.clone(),
                element_properties: PageElementProperties {
                    page_object_id: page.object_id.clone(),
                    size: None,
                    transform: None,
                },
                rows: table.rows.len(),
                columns: table.columns as usize,
            }));
            for (row_index, row) in table.rows.iter().enumerate() {
                for (column_index, cell) in row.cells.iter().enumerate() {
                    if cell.text.is_empty() {
                        continue;
                    }
                    let location = TableCellLocation {
                        row_index,
                        column_index,
                    };
                    requests.push(Request::InsertText(InsertTextRequest {
                        object_id: table_id.clone(),
                        text: cell.text.clone(),
                        insertion_index: 0,
                        cell_location: Some(location),
                    }));
                    if cell.style == CellStyle::Header {
                        requests.push(Request::UpdateTextStyle(UpdateTextStyleRequest {
                            object_id: table_id.clone(),
                            cell_location: Some(location),
                            text_range: Range::all(),
                            style: TextStyle {
                                bold: Some(true),
                                ..Default::default()
                            },
                            fields: "bold".to_string(),
                        }));
                    }
                }
            }
        }
    }
}

fn push_insert_text(requests: &mut Vec<Request>, object_id: &str, text: &str) {
    requests.push(Request::InsertText(InsertTextRequest {
        object_id: object_id.to_string(),
        text: text.to_string(),
        insertion_index: 0,
        cell_location: None,
    }));
}

/// Insert `text` at `insertion_index` and emit its style requests
///
/// Range offsets are shifted by the insertion base. A content-level font
/// size, or the `small`/`statement` roles, additionally force a size
/// over the whole inserted text including the trailing newline.
fn push_styled_text(
    requests: &mut Vec<Request>,
    object_id: &str,
    text: &str,
    ranges: &[TextRange],
    roles: &[String],
    font_size: Option<u32>,
    insertion_index: usize,
) {
    requests.push(Request::InsertText(InsertTextRequest {
        object_id: object_id.to_string(),
        text: text.to_string(),
        insertion_index,
        cell_location: None,
    }));
    for range in ranges {
        requests.push(Request::UpdateTextStyle(UpdateTextStyleRequest {
            object_id: object_id.to_string(),
            cell_location: None,
            text_range: Range::fixed(
                insertion_index + range.start_index,
                insertion_index + range.end_index,
            ),
            style: style_for_token(&range.token),
            fields: "*".to_string(),
        }));
    }

    let font_size = font_size.or_else(|| {
        if roles.iter().any(|role| role == "small" || role == "statement") {
            Some(SMALL_FONT_SIZE)
        } else {
            None
        }
    });
    if let Some(points) = font_size {
        requests.push(Request::UpdateTextStyle(UpdateTextStyleRequest {
            object_id: object_id.to_string(),
            cell_location: None,
            text_range: Range::fixed(insertion_index, insertion_index + text.chars().count()),
            style: TextStyle {
                font_size: Some(Dimension::points(f64::from(points))),
                ..Default::default()
            },
            fields: "fontSize".to_string(),
        }));
    }
}

/// Character style of one token: role styles accumulate, anchors add
/// the link decoration on top
fn style_for_token(token: &InlineToken) -> TextStyle {
    let mut style = TextStyle::default();
    for role in token.roles() {
        apply_role_style(&mut style, role);
    }
    if let InlineToken::Anchor { target, .. } = token {
        style.link = Some(Link {
            url: target.clone(),
        });
        style.underline = Some(true);
        style.foreground_color = Some(OptionalColor {
            opaque_color: OpaqueColor {
                rgb_color: Some(LINK_COLOR),
                theme_color: None,
            },
        });
    }
    style
}

fn apply_role_style(style: &mut TextStyle, role: &str) {
    match role {
        "code" | "kbd" => {
            style.background_color = Some(OptionalColor {
                opaque_color: OpaqueColor::theme(ThemeColor::Light1),
            });
            style.font_family = Some(MONOSPACE_FONT.to_string());
            style.bold = Some(true);
        }
        "em" => style.italic = Some(true),
        "strong" | "b" => style.bold = Some(true),
        "underline" => style.underline = Some(true),
        "big" => {
            style.underline = Some(true);
            style.font_size = Some(Dimension::points(BIG_FONT_SIZE_PT));
        }
        _ => {}
    }
}

fn bullet_preset(list_type: ListType) -> BulletPreset {
    match list_type {
        ListType::Checklist => BulletPreset::BulletCheckbox,
        ListType::Ordered => BulletPreset::NumberedDigitAlphaRoman,
        ListType::Bullet => BulletPreset::BulletDiscCircleSquare,
    }
}
