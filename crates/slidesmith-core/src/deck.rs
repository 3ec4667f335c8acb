//! Slide deck building.
//!
//! Walks a document's sections, flattens nesting to a single slide
//! sequence, splits speaker-note blocks from body content, detects the
//! two-column convention, and resolves per-slide layout identifiers.

use slidesmith_ast::{Block, Document, DocumentMeta, Section};

use crate::constants;
use crate::content::{
    Slide, SlideContents, SlideDeck, TitleAndBodySlide, TitleAndTwoColumnsSlide, TitleOnlySlide,
};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::Result;
use crate::inline::parse_inline;
use crate::mapper::Mapper;
use crate::probe::ImageProber;

/// Builds a [`SlideDeck`] from a document
pub struct DeckBuilder<'a> {
    document: &'a Document,
    prober: &'a dyn ImageProber,
}

/// A built deck together with the diagnostics of the pass
#[derive(Debug)]
pub struct BuiltDeck {
    /// The resulting deck
    pub deck: SlideDeck,
    /// Warnings collected while mapping
    pub diagnostics: Diagnostics,
}

impl<'a> DeckBuilder<'a> {
    /// Create a builder over a document and an image prober
    pub fn new(document: &'a Document, prober: &'a dyn ImageProber) -> Self {
        Self { document, prober }
    }

    /// Build the deck
    ///
    /// Fails only on unresolvable image references; malformed content is
    /// degraded with a diagnostic and the build continues.
    pub fn build(self) -> Result<BuiltDeck> {
        let mut diagnostics = Diagnostics::new();
        let metadata = &self.document.metadata;
        let imagesdir = metadata.get_attribute("imagesdir");

        let mut slides = Vec::new();
        for section in flatten_sections(&self.document.blocks) {
            if let Some(slide) =
                build_slide(section, self.prober, imagesdir, metadata, &mut diagnostics)?
            {
                slides.push(slide);
            }
        }

        Ok(BuiltDeck {
            deck: SlideDeck {
                title: metadata.title.clone().unwrap_or_default(),
                slides,
            },
            diagnostics,
        })
    }
}

/// Build a deck in one call
pub fn build_deck(document: &Document, prober: &dyn ImageProber) -> Result<BuiltDeck> {
    DeckBuilder::new(document, prober).build()
}

/// Lift nested sections into a flat pre-order sequence
///
/// A section's own slide comes first, then the slides of its nested
/// sections, then its next sibling.
fn flatten_sections(blocks: &[Block]) -> Vec<&Section> {
    let mut sections = Vec::new();
    for block in blocks {
        if let Block::Section(section) = block {
            collect_sections(section, &mut sections);
        }
    }
    sections
}

fn collect_sections<'b>(section: &'b Section, out: &mut Vec<&'b Section>) {
    out.push(section);
    for block in &section.blocks {
        if let Block::Section(nested) = block {
            collect_sections(nested, out);
        }
    }
}

fn build_slide(
    section: &Section,
    prober: &dyn ImageProber,
    imagesdir: Option<&str>,
    metadata: &DocumentMeta,
    diagnostics: &mut Diagnostics,
) -> Result<Option<Slide>> {
    // The literal "!" suppresses the title instead of rendering it.
    let title = if section.title == "!" {
        None
    } else {
        Some(parse_inline(&section.title).text)
    };

    let (notes_blocks, content_blocks): (Vec<&Block>, Vec<&Block>) = section
        .blocks
        .iter()
        .filter(|block| !block.is_section())
        .partition(|block| block.has_role("notes"));

    let mut mapper = Mapper::new(prober, imagesdir, diagnostics);

    // A notes container contributes one note group per child; a bare
    // notes block contributes itself as a single group.
    let mut speaker_notes = Vec::new();
    for &block in &notes_blocks {
        let children = child_blocks(block);
        if children.is_empty() {
            speaker_notes.push(mapper.map_block(block, &section.roles)?);
        } else {
            for child in children {
                speaker_notes.push(mapper.map_block(child, block.roles())?);
            }
        }
    }

    if content_blocks.len() == 1 && content_blocks[0].has_role("two-columns") {
        let container = content_blocks[0];
        let children = child_blocks(container);
        if children.len() == 2 {
            let right_column = mapper.map_block(&children[1], container.roles())?;
            let left_column = mapper.map_block(&children[0], container.roles())?;
            speaker_notes.extend(right_column.speaker_notes.clone());
            speaker_notes.extend(left_column.speaker_notes.clone());
            return Ok(Some(Slide::TitleAndTwoColumns(TitleAndTwoColumnsSlide {
                title,
                left_column,
                right_column,
                speaker_notes,
                layout_id: resolve_layout(
                    &section.roles,
                    metadata,
                    constants::LAYOUT_TITLE_AND_TWO_COLUMNS,
                ),
            })));
        }
        diagnostics.push(
            Diagnostic::warning("A two-columns block must have exactly 2 nested blocks, ignoring")
                .with_code("SLD101")
                .with_context(section.title.clone()),
        );
        return Ok(None);
    }

    let mut body = SlideContents::new();
    for &block in &content_blocks {
        body.append(mapper.map_block(block, &section.roles)?);
    }
    speaker_notes.extend(body.speaker_notes.clone());

    Ok(Some(if body.is_empty() {
        Slide::TitleOnly(TitleOnlySlide {
            title,
            speaker_notes,
            layout_id: resolve_layout(&section.roles, metadata, constants::LAYOUT_TITLE_ONLY),
        })
    } else {
        Slide::TitleAndBody(TitleAndBodySlide {
            title,
            body,
            speaker_notes,
            layout_id: resolve_layout(&section.roles, metadata, constants::LAYOUT_TITLE_AND_BODY),
        })
    }))
}

fn child_blocks(block: &Block) -> &[Block] {
    match block {
        Block::Open(open) => &open.blocks,
        Block::Section(section) => &section.blocks,
        _ => &[],
    }
}

/// Resolve a slide's layout from its section roles
///
/// The first role with a document attribute `layout-override-<role>`
/// wins; otherwise the variant's structural default applies.
fn resolve_layout(roles: &[String], metadata: &DocumentMeta, default: &str) -> String {
    for role in roles {
        if let Some(layout) = metadata.get_attribute(&format!("layout-override-{role}")) {
            return layout.to_string();
        }
    }
    default.to_string()
}
