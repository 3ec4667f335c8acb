//! End-to-end deck building tests
//!
//! These build one realistic course document through the public API and
//! check the complete deck coming out: slide sequence, layout
//! resolution, speaker notes, and image handling all working together.

use slidesmith_ast::{
    Block, Document, Image, List, ListItem, ListKind, OpenBlock, Paragraph, Section,
};
use slidesmith_core::{
    build_deck, Content, ImageProber, ImageSize, ListType, ProbeError, Slide,
};

/// Returns the same dimensions for every URL
struct StubProber;

impl ImageProber for StubProber {
    fn probe(&self, _url: &str) -> Result<ImageSize, ProbeError> {
        Ok(ImageSize::new(640, 480))
    }
}

/// Rejects every URL
struct FailingProber;

impl ImageProber for FailingProber {
    fn probe(&self, _url: &str) -> Result<ImageSize, ProbeError> {
        Err(ProbeError::new("410 Gone"))
    }
}

/// A small course: notes, a list with an image, a quiz with a layout
/// override, a two-column comparison, a title-less interlude, and a
/// nested module
fn course_document() -> Document {
    let mut document = Document::with_title("Cypher Fundamentals");
    document
        .metadata
        .set_attribute("imagesdir", "https://cdn.example.com/cypher/");
    document
        .metadata
        .set_attribute("layout-override-check", "TITLE_ONLY_1");

    document.push(Block::Section(
        Section::new("About this course", 1)
            .with_block(Block::Paragraph(Paragraph::new("Four modules, one graph.")))
            .with_block(Block::Paragraph(
                Paragraph::new("Start with the live demo").with_roles(vec!["notes".to_string()]),
            )),
    ));
    document.push(Block::Section(
        Section::new("Loading Data", 1)
            .with_block(Block::List(
                List::new(ListKind::Unordered)
                    .with_item(ListItem::new("LOAD DATA"))
                    .with_item(ListItem::new("IMPORT DATA"))
                    .with_item(ListItem::new("LOAD CSV"))
                    .with_item(ListItem::new("IMPORT CSV")),
            ))
            .with_block(Block::Image(Image::new("loading.png"))),
    ));
    document.push(Block::Section(
        Section::new("Check your understanding", 1)
            .with_roles(vec!["check".to_string()])
            .with_block(Block::List(
                List::new(ListKind::Unordered)
                    .with_option("checklist")
                    .with_roles(vec!["answers".to_string()])
                    .with_item(ListItem::checked("LOAD CSV loads data"))
                    .with_item(ListItem::new("LOAD CSV creates nodes")),
            )),
    ));
    document.push(Block::Section(
        Section::new("Pros and cons", 1).with_block(Block::Open(
            OpenBlock::new()
                .with_roles(vec!["two-columns".to_string()])
                .with_block(Block::Paragraph(Paragraph::new("Flexible schema")))
                .with_block(Block::Paragraph(Paragraph::new("Learning curve"))),
        )),
    ));
    document.push(Block::Section(
        Section::new("!", 1).with_block(Block::Paragraph(Paragraph::new("Interlude"))),
    ));
    document.push(Block::Section(
        Section::new("Advanced patterns", 1).with_block(Block::Section(
            Section::new("Indexes", 2)
                .with_block(Block::Paragraph(Paragraph::new("Index early"))),
        )),
    ));
    document
}

fn body_slide(slide: &Slide) -> &slidesmith_core::TitleAndBodySlide {
    match slide {
        Slide::TitleAndBody(slide) => slide,
        other => panic!("expected a body slide, got {other:?}"),
    }
}

fn note_text(slide: &Slide, group: usize) -> &str {
    match &slide.speaker_notes()[group].contents[0] {
        Content::Text(text) => text.text.as_str(),
        other => panic!("expected note text, got {other:?}"),
    }
}

#[test]
fn test_course_builds_every_section_into_a_slide() {
    let built = build_deck(&course_document(), &StubProber).unwrap();

    assert_eq!(built.deck.title, "Cypher Fundamentals");
    assert_eq!(built.deck.len(), 7);
    let titles: Vec<Option<&str>> = built.deck.slides.iter().map(Slide::title).collect();
    assert_eq!(
        titles,
        [
            Some("About this course"),
            Some("Loading Data"),
            Some("Check your understanding"),
            Some("Pros and cons"),
            None,
            Some("Advanced patterns"),
            Some("Indexes"),
        ]
    );
    assert!(built.diagnostics.is_empty(), "{:?}", built.diagnostics);
}

/// A paragraph carrying the notes role itself, without a container,
/// forms a single note group.
#[test]
fn test_bare_notes_block_forms_a_single_group() {
    let built = build_deck(&course_document(), &StubProber).unwrap();

    let about = body_slide(&built.deck.slides[0]);
    assert_eq!(about.body.contents.len(), 1);
    assert_eq!(about.speaker_notes.len(), 1);
    assert_eq!(note_text(&built.deck.slides[0], 0), "Start with the live demo");
}

#[test]
fn test_list_slide_keeps_item_order_and_empty_note() {
    let built = build_deck(&course_document(), &StubProber).unwrap();

    let loading = body_slide(&built.deck.slides[1]);
    match &loading.body.contents[0] {
        Content::List(list) => {
            assert_eq!(list.text, "LOAD DATA\nIMPORT DATA\nLOAD CSV\nIMPORT CSV");
            assert_eq!(list.list_type, ListType::Bullet);
        }
        other => panic!("expected a list, got {other:?}"),
    }
    // the list contributes its single note group even without answers
    assert_eq!(loading.speaker_notes.len(), 1);
    assert_eq!(note_text(&built.deck.slides[1], 0), "");
}

/// The document-level `imagesdir` attribute reaches image mapping.
#[test]
fn test_image_url_joins_the_document_imagesdir() {
    let built = build_deck(&course_document(), &StubProber).unwrap();

    let loading = body_slide(&built.deck.slides[1]);
    match &loading.body.contents[1] {
        Content::Image(image) => {
            assert_eq!(image.url, "https://cdn.example.com/cypher/loading.png");
            assert_eq!((image.width, image.height), (640, 480));
        }
        other => panic!("expected an image, got {other:?}"),
    }
}

#[test]
fn test_layout_overrides_apply_only_to_matching_roles() {
    let built = build_deck(&course_document(), &StubProber).unwrap();

    let layouts: Vec<&str> = built.deck.slides.iter().map(Slide::layout_id).collect();
    assert_eq!(
        layouts,
        [
            "TITLE_AND_BODY",
            "TITLE_AND_BODY",
            "TITLE_ONLY_1",
            "TITLE_AND_TWO_COLUMNS",
            "TITLE_AND_BODY",
            "TITLE_ONLY",
            "TITLE_AND_BODY",
        ]
    );
}

#[test]
fn test_checklist_answers_reach_the_slide_notes() {
    let built = build_deck(&course_document(), &StubProber).unwrap();

    assert_eq!(
        note_text(&built.deck.slides[2], 0),
        "\nCorrect answer(s):\n- LOAD CSV loads data\n"
    );
}

#[test]
fn test_two_columns_slide_splits_left_and_right() {
    let built = build_deck(&course_document(), &StubProber).unwrap();

    let slide = match &built.deck.slides[3] {
        Slide::TitleAndTwoColumns(slide) => slide,
        other => panic!("expected a column slide, got {other:?}"),
    };
    match (&slide.left_column.contents[0], &slide.right_column.contents[0]) {
        (Content::Text(left), Content::Text(right)) => {
            assert_eq!(left.text, "Flexible schema");
            assert_eq!(right.text, "Learning curve");
        }
        other => panic!("expected text columns, got {other:?}"),
    }
}

#[test]
fn test_suppressed_title_keeps_the_slide_body() {
    let built = build_deck(&course_document(), &StubProber).unwrap();

    let interlude = body_slide(&built.deck.slides[4]);
    assert_eq!(interlude.title, None);
    match &interlude.body.contents[0] {
        Content::Text(text) => assert_eq!(text.text, "Interlude"),
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn test_unresolvable_image_target_aborts_the_build() {
    let mut document = Document::with_title("Broken");
    document.push(Block::Section(
        Section::new("Diagram", 1).with_block(Block::Image(Image::new("local/graph.png"))),
    ));

    let error = build_deck(&document, &StubProber).unwrap_err();
    assert_eq!(error.code(), "SLD001");
    assert!(error.to_string().contains("local/graph.png"));
}

#[test]
fn test_prober_failure_aborts_with_the_image_url() {
    let error = build_deck(&course_document(), &FailingProber).unwrap_err();
    assert_eq!(error.code(), "SLD002");
    assert!(error.to_string().contains("loading.png"));
    assert!(error.to_string().contains("410 Gone"));
}
