//! Document-to-content mapping.
//!
//! One mapping pass walks the blocks of a section and produces
//! [`SlideContents`]: normalized content units plus speaker-note groups
//! accumulated along the way. Mapping is total over the block tree.
//! Content that has no slide representation degrades to an empty result
//! and a diagnostic instead of failing the build; only image resolution
//! is fatal, since a deck with missing pictures is worse than no deck.

use slidesmith_ast::{
    Admonition, AdmonitionBody, Block, Image, List, ListItem, Listing, ListKind, OpenBlock,
    OtherBlock, Paragraph, Row, Table,
};

use crate::constants;
use crate::content::{
    CellStyle, Content, ImageContent, ListContent, ListType, ListingContent, SlideContents,
    TableCell, TableContent, TableRow, TextContent,
};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{DeckError, Result};
use crate::inline::{decode_entities, parse_inline, parse_inline_at};
use crate::probe::ImageProber;

/// Maps document blocks into normalized slide content
///
/// The mapper borrows an [`ImageProber`] for the one side effect the
/// pass performs (image dimension lookup) and a [`Diagnostics`] sink
/// for everything it degrades instead of failing.
pub struct Mapper<'a> {
    prober: &'a dyn ImageProber,
    imagesdir: Option<&'a str>,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Mapper<'a> {
    /// Create a mapper over a prober and a diagnostics sink
    ///
    /// `imagesdir` is the document-level base prefix for relative image
    /// targets, when the document declares one.
    pub fn new(
        prober: &'a dyn ImageProber,
        imagesdir: Option<&'a str>,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            prober,
            imagesdir,
            diagnostics,
        }
    }

    /// Map one block into slide content
    ///
    /// `parent_roles` are the roles of the block's immediate parent;
    /// they are appended to the block's own roles on produced content.
    pub fn map_block(&mut self, block: &Block, parent_roles: &[String]) -> Result<SlideContents> {
        match block {
            Block::Paragraph(paragraph) => Ok(self.map_paragraph(paragraph, parent_roles)),
            Block::List(list) => Ok(self.map_list(list, parent_roles)),
            Block::Image(image) => self.map_image(image),
            Block::Listing(listing) => Ok(self.map_listing(listing)),
            Block::Open(open) => self.map_open(open),
            Block::Admonition(admonition) => Ok(self.map_admonition(admonition, parent_roles)),
            Block::Table(table) => Ok(self.map_table(table, parent_roles)),
            Block::Section(section) => {
                self.diagnostics.push(
                    Diagnostic::warning(format!(
                        "Section \"{}\" nested in slide content, ignoring",
                        section.title
                    ))
                    .with_code("SLD102"),
                );
                Ok(SlideContents::new())
            }
            Block::Other(other) => Ok(self.map_other(other, parent_roles)),
        }
    }

    fn map_paragraph(&mut self, paragraph: &Paragraph, parent_roles: &[String]) -> SlideContents {
        let parsed = parse_inline(&paragraph.content);
        SlideContents::from_contents(vec![Content::Text(TextContent {
            text: parsed.text,
            ranges: parsed.ranges,
            roles: joined_roles(&paragraph.roles, parent_roles),
            ..Default::default()
        })])
    }

    fn map_list(&mut self, list: &List, parent_roles: &[String]) -> SlideContents {
        let mut entries = Vec::new();
        flatten_items(list, 0, &mut entries);

        let mut ranges = Vec::new();
        let mut lines = Vec::with_capacity(entries.len());
        let mut current_index = 0;
        for (depth, item_text) in &entries {
            // Zero-width joiners stand in for the depth indent while
            // ranges are computed, so offsets already account for the
            // tabs of the final text.
            let marker_prefix = constants::DEPTH_MARKER.repeat(*depth);
            let markup_line = format!("{marker_prefix}{item_text}");
            let parsed = parse_inline_at(&markup_line, current_index);
            let plain = parsed
                .text
                .strip_prefix(&marker_prefix)
                .unwrap_or(&parsed.text);
            lines.push(format!("{}{plain}", constants::DEPTH_INDENT.repeat(*depth)));
            ranges.extend(parsed.ranges);
            // +1 for the newline joining this line to the next
            current_index += parsed.text.chars().count() + 1;
        }

        let list_type = if list.kind == ListKind::Unordered && list.has_option("checklist") {
            ListType::Checklist
        } else {
            match list.kind {
                ListKind::Unordered => ListType::Bullet,
                ListKind::Ordered => ListType::Ordered,
            }
        };

        let note_text = if list_type == ListType::Checklist
            && list.roles.iter().any(|role| role == "answers")
        {
            let mut answers = String::from(constants::ANSWERS_HEADER);
            for item in &list.items {
                if item.checked {
                    let plain = parse_inline(&item.text).text;
                    answers.push_str("- ");
                    answers.push_str(&plain);
                    answers.push('\n');
                }
            }
            answers
        } else {
            String::new()
        };
        let speaker_notes = vec![SlideContents::from_contents(vec![Content::Text(
            TextContent::plain(note_text),
        )])];

        SlideContents {
            contents: vec![Content::List(ListContent {
                text: lines.join("\n"),
                list_type,
                ranges,
                roles: joined_roles(&list.roles, parent_roles),
            })],
            speaker_notes,
        }
    }

    fn map_image(&mut self, image: &Image) -> Result<SlideContents> {
        let target = image.target.as_str();
        let url = if is_remote(target) {
            target.to_string()
        } else if let Some(dir) = self.imagesdir {
            format!("{dir}{target}")
        } else {
            target.to_string()
        };
        if !is_remote(&url) {
            return Err(DeckError::unsupported_image_location(url));
        }
        let size = self
            .prober
            .probe(&url)
            .map_err(|cause| DeckError::image_fetch(url.clone(), cause))?;
        Ok(SlideContents::from_contents(vec![Content::Image(
            ImageContent::new(url, size.width, size.height),
        )]))
    }

    fn map_listing(&mut self, listing: &Listing) -> SlideContents {
        let code = decode_entities(&listing.content);
        let longest_line = code
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        // Breakpoints tuned for Roboto Mono in a default body placeholder.
        let font_size = if longest_line > 121 {
            8
        } else if longest_line > 109 {
            9
        } else if longest_line > 99 {
            10
        } else if longest_line > 91 {
            11
        } else if longest_line > 84 {
            12
        } else if longest_line > 78 {
            13
        } else {
            14
        };
        SlideContents::from_contents(vec![Content::Listing(ListingContent {
            // A vertical tab keeps the whole listing one paragraph downstream.
            text: code.replace('\n', constants::VERTICAL_TAB),
            font_size,
        })])
    }

    fn map_open(&mut self, open: &OpenBlock) -> Result<SlideContents> {
        if open.blocks.is_empty() {
            self.diagnostics
                .push(Diagnostic::warning("Open block is empty, ignoring").with_code("SLD104"));
            return Ok(SlideContents::from_contents(vec![Content::Text(
                TextContent::plain(""),
            )]));
        }
        let mut combined = SlideContents::new();
        for block in &open.blocks {
            combined.append(self.map_block(block, &open.roles)?);
        }
        Ok(combined)
    }

    fn map_admonition(&mut self, admonition: &Admonition, parent_roles: &[String]) -> SlideContents {
        match &admonition.body {
            AdmonitionBody::Simple(body) => {
                SlideContents::from_contents(vec![Content::Text(TextContent {
                    text: format!("{}: {}", admonition.label, decode_entities(body)),
                    roles: joined_roles(&admonition.roles, parent_roles),
                    ..Default::default()
                })])
            }
            AdmonitionBody::Complex(_) => {
                self.diagnostics.push(
                    Diagnostic::warning("Complex admonitions are not supported, ignoring")
                        .with_code("SLD103"),
                );
                SlideContents::new()
            }
        }
    }

    fn map_table(&mut self, table: &Table, parent_roles: &[String]) -> SlideContents {
        let mut rows = Vec::with_capacity(table.header.len() + table.body.len() + table.footer.len());
        rows.extend(table.header.iter().map(|row| map_row(row, CellStyle::Header)));
        rows.extend(table.body.iter().map(|row| map_row(row, CellStyle::Body)));
        rows.extend(table.footer.iter().map(|row| map_row(row, CellStyle::Footer)));
        SlideContents::from_contents(vec![Content::Table(TableContent {
            rows,
            columns: table.columns,
            roles: joined_roles(&table.roles, parent_roles),
        })])
    }

    fn map_other(&mut self, other: &OtherBlock, parent_roles: &[String]) -> SlideContents {
        match &other.content {
            Some(content) => {
                let parsed = parse_inline(content);
                SlideContents::from_contents(vec![Content::Text(TextContent {
                    text: parsed.text,
                    ranges: parsed.ranges,
                    roles: joined_roles(&other.roles, parent_roles),
                    ..Default::default()
                })])
            }
            None => {
                self.diagnostics.push(
                    Diagnostic::warning(format!(
                        "Unable to retrieve content for {} block, ignoring",
                        other.context
                    ))
                    .with_code("SLD102"),
                );
                SlideContents::new()
            }
        }
    }
}

fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn joined_roles(own: &[String], parent: &[String]) -> Vec<String> {
    own.iter().chain(parent).cloned().collect()
}

/// Collect `(depth, item text)` pairs depth-first: each item's own line,
/// then the lines of its nested lists
fn flatten_items<'b>(list: &'b List, depth: usize, out: &mut Vec<(usize, &'b str)>) {
    for item in &list.items {
        out.push((depth, item.text.as_str()));
        for block in &item.blocks {
            if let Block::List(nested) = block {
                flatten_items(nested, depth + 1, out);
            }
        }
    }
}

fn map_row(row: &Row, style: CellStyle) -> TableRow {
    TableRow {
        cells: row
            .cells
            .iter()
            .map(|cell| TableCell {
                text: decode_entities(cell),
                style,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{ImageSize, ProbeError};

    struct FakeProber {
        size: std::result::Result<ImageSize, ProbeError>,
    }

    impl FakeProber {
        fn sized(width: u32, height: u32) -> Self {
            Self {
                size: Ok(ImageSize::new(width, height)),
            }
        }

        fn failing(reason: &str) -> Self {
            Self {
                size: Err(ProbeError::new(reason)),
            }
        }
    }

    impl ImageProber for FakeProber {
        fn probe(&self, _url: &str) -> std::result::Result<ImageSize, ProbeError> {
            self.size.clone()
        }
    }

    fn text_content(contents: &SlideContents, index: usize) -> &TextContent {
        match &contents.contents[index] {
            Content::Text(text) => text,
            other => panic!("expected text content, got {other:?}"),
        }
    }

    fn list_content(contents: &SlideContents) -> &ListContent {
        match &contents.contents[0] {
            Content::List(list) => list,
            other => panic!("expected list content, got {other:?}"),
        }
    }

    fn map(block: &Block) -> (SlideContents, Diagnostics) {
        let prober = FakeProber::sized(640, 480);
        let mut diagnostics = Diagnostics::new();
        let contents = Mapper::new(&prober, None, &mut diagnostics)
            .map_block(block, &[])
            .unwrap();
        (contents, diagnostics)
    }

    // ==========================================================
    // Paragraphs
    // ==========================================================

    #[test]
    fn test_paragraph_roles_include_parent_roles() {
        let block = Block::Paragraph(
            Paragraph::new("A <em>statement</em>").with_roles(vec!["statement".to_string()]),
        );
        let prober = FakeProber::sized(1, 1);
        let mut diagnostics = Diagnostics::new();
        let contents = Mapper::new(&prober, None, &mut diagnostics)
            .map_block(&block, &["green".to_string()])
            .unwrap();

        let text = text_content(&contents, 0);
        assert_eq!(text.text, "A statement");
        assert_eq!(text.ranges.len(), 2);
        assert_eq!(
            text.roles,
            ["statement".to_string(), "green".to_string()]
        );
    }

    // ==========================================================
    // Lists
    // ==========================================================

    fn nested_list() -> List {
        List::new(ListKind::Unordered)
            .with_item(ListItem::new("West wood maze").with_nested(
                List::new(ListKind::Unordered)
                    .with_item(ListItem::new("M<em>aze</em> heart").with_nested(
                        List::new(ListKind::Unordered)
                            .with_item(ListItem::new("Reflection <strong>pool</strong>")),
                    ))
                    .with_item(ListItem::new("Secret <code>exit</code>")),
            ))
            .with_item(ListItem::new("Untracked file in git repository"))
    }

    #[test]
    fn test_list_text_joins_items_with_tab_indents() {
        let (contents, _) = map(&Block::List(nested_list()));
        let list = list_content(&contents);
        assert_eq!(
            list.text,
            "West wood maze\n\tMaze heart\n\t\tReflection pool\n\tSecret exit\nUntracked file in git repository"
        );
        // five items, four separators
        assert_eq!(list.text.matches('\n').count(), 4);
        assert_eq!(list.list_type, ListType::Bullet);
    }

    #[test]
    fn test_nested_list_range_offsets_account_for_depth_markers() {
        let (contents, _) = map(&Block::List(nested_list()));
        let list = list_content(&contents);

        let spans: Vec<(usize, usize, &str)> = list
            .ranges
            .iter()
            .map(|r| (r.start_index, r.end_index, r.token.text()))
            .collect();
        assert_eq!(
            spans,
            vec![
                (15, 17, "\u{200d}M"),
                (17, 20, "aze"),
                (20, 26, " heart"),
                (27, 40, "\u{200d}\u{200d}Reflection "),
                (40, 44, "pool"),
                (45, 53, "\u{200d}Secret "),
                (53, 57, "exit"),
            ]
        );
        assert_eq!(list.ranges[1].token.roles(), ["em".to_string()]);
        assert_eq!(list.ranges[4].token.roles(), ["strong".to_string()]);
        assert_eq!(list.ranges[6].token.roles(), ["code".to_string()]);
    }

    #[test]
    fn test_every_list_carries_one_note_group() {
        let (contents, _) = map(&Block::List(
            List::new(ListKind::Ordered).with_item(ListItem::new("only")),
        ));
        assert_eq!(contents.speaker_notes.len(), 1);
        let note = text_content(&contents.speaker_notes[0], 0);
        assert_eq!(note.text, "");
        assert_eq!(list_content(&contents).list_type, ListType::Ordered);
    }

    #[test]
    fn test_checklist_answers_note() {
        let list = List::new(ListKind::Unordered)
            .with_option("checklist")
            .with_roles(vec!["answers".to_string()])
            .with_item(ListItem::checked("LOAD CSV loads data"))
            .with_item(ListItem::new("MATCH creates data"))
            .with_item(ListItem::new("MERGE deletes data"));
        let (contents, _) = map(&Block::List(list));

        assert_eq!(list_content(&contents).list_type, ListType::Checklist);
        let note = text_content(&contents.speaker_notes[0], 0);
        assert_eq!(note.text, "\nCorrect answer(s):\n- LOAD CSV loads data\n");
    }

    #[test]
    fn test_checklist_without_answers_role_has_empty_note() {
        let list = List::new(ListKind::Unordered)
            .with_option("checklist")
            .with_item(ListItem::checked("done"));
        let (contents, _) = map(&Block::List(list));
        assert_eq!(text_content(&contents.speaker_notes[0], 0).text, "");
    }

    // ==========================================================
    // Images
    // ==========================================================

    #[test]
    fn test_image_absolute_url_probed() {
        let (contents, _) = map(&Block::Image(Image::new("https://example.com/graph.png")));
        match &contents.contents[0] {
            Content::Image(image) => {
                assert_eq!(image.url, "https://example.com/graph.png");
                assert_eq!(image.width, 640);
                assert_eq!(image.height, 480);
            }
            other => panic!("expected image content, got {other:?}"),
        }
    }

    #[test]
    fn test_image_relative_target_uses_imagesdir() {
        let prober = FakeProber::sized(100, 50);
        let mut diagnostics = Diagnostics::new();
        let contents = Mapper::new(
            &prober,
            Some("https://cdn.example.com/course/"),
            &mut diagnostics,
        )
        .map_block(&Block::Image(Image::new("img/overview.png")), &[])
        .unwrap();
        match &contents.contents[0] {
            Content::Image(image) => {
                assert_eq!(image.url, "https://cdn.example.com/course/img/overview.png");
            }
            other => panic!("expected image content, got {other:?}"),
        }
    }

    #[test]
    fn test_image_relative_target_without_imagesdir_fails() {
        let prober = FakeProber::sized(1, 1);
        let mut diagnostics = Diagnostics::new();
        let err = Mapper::new(&prober, None, &mut diagnostics)
            .map_block(&Block::Image(Image::new("img/overview.png")), &[])
            .unwrap_err();
        assert_eq!(err.code(), "SLD001");
    }

    #[test]
    fn test_image_fetch_failure_propagates() {
        let prober = FakeProber::failing("403 Forbidden");
        let mut diagnostics = Diagnostics::new();
        let err = Mapper::new(&prober, None, &mut diagnostics)
            .map_block(&Block::Image(Image::new("https://example.com/gone.png")), &[])
            .unwrap_err();
        assert_eq!(err.code(), "SLD002");
        assert!(err.to_string().contains("https://example.com/gone.png"));
    }

    // ==========================================================
    // Listings
    // ==========================================================

    #[test]
    fn test_listing_font_size_from_longest_line() {
        let wide = "x".repeat(122);
        let (contents, _) = map(&Block::Listing(Listing::new(format!("short\n{wide}"))));
        match &contents.contents[0] {
            Content::Listing(listing) => assert_eq!(listing.font_size, 8),
            other => panic!("expected listing content, got {other:?}"),
        }

        let (contents, _) = map(&Block::Listing(Listing::new("x".repeat(50))));
        match &contents.contents[0] {
            Content::Listing(listing) => assert_eq!(listing.font_size, 14),
            other => panic!("expected listing content, got {other:?}"),
        }
    }

    #[test]
    fn test_listing_breakpoints_are_exclusive() {
        for (length, expected) in [(121, 9), (109, 10), (99, 11), (91, 12), (84, 13), (78, 14)] {
            let (contents, _) = map(&Block::Listing(Listing::new("y".repeat(length))));
            match &contents.contents[0] {
                Content::Listing(listing) => assert_eq!(
                    listing.font_size, expected,
                    "longest line of {length} characters"
                ),
                other => panic!("expected listing content, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_listing_newlines_collapse_to_vertical_tabs() {
        let (contents, _) = map(&Block::Listing(Listing::new(
            "MATCH (m:Movie)\nWHERE m.released &gt; 2000\nRETURN m",
        )));
        match &contents.contents[0] {
            Content::Listing(listing) => {
                assert_eq!(
                    listing.text,
                    "MATCH (m:Movie)\u{b}WHERE m.released > 2000\u{b}RETURN m"
                );
            }
            other => panic!("expected listing content, got {other:?}"),
        }
    }

    // ==========================================================
    // Open blocks
    // ==========================================================

    #[test]
    fn test_open_block_concatenates_children_with_its_roles() {
        let open = OpenBlock::new()
            .with_roles(vec!["wide".to_string()])
            .with_block(Block::Paragraph(Paragraph::new("first")))
            .with_block(Block::Paragraph(Paragraph::new("second")));
        let (contents, diagnostics) = map(&Block::Open(open));

        assert_eq!(contents.contents.len(), 2);
        assert_eq!(text_content(&contents, 0).roles, ["wide".to_string()]);
        assert_eq!(text_content(&contents, 1).roles, ["wide".to_string()]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_empty_open_block_maps_to_empty_text() {
        let (contents, diagnostics) = map(&Block::Open(OpenBlock::new()));
        assert_eq!(contents.contents.len(), 1);
        assert_eq!(text_content(&contents, 0).text, "");
        assert_eq!(diagnostics.warning_count(), 1);
    }

    // ==========================================================
    // Admonitions, tables, unknown blocks
    // ==========================================================

    #[test]
    fn test_simple_admonition_prefixes_label() {
        let (contents, _) = map(&Block::Admonition(Admonition::simple(
            "NOTE",
            "Constraints require Neo4j 4.0 &amp; later",
        )));
        let text = text_content(&contents, 0);
        assert_eq!(text.text, "NOTE: Constraints require Neo4j 4.0 & later");
        assert!(text.ranges.is_empty());
    }

    #[test]
    fn test_complex_admonition_is_dropped_with_warning() {
        let admonition = Admonition::complex(
            "WARNING",
            vec![Block::Paragraph(Paragraph::new("nested"))],
        );
        let (contents, diagnostics) = map(&Block::Admonition(admonition));
        assert!(contents.contents.is_empty());
        assert_eq!(diagnostics.warning_count(), 1);
    }

    #[test]
    fn test_table_rows_keep_group_styles_in_order() {
        let table = Table::new(2)
            .with_header_row(vec!["Clause".to_string(), "Purpose".to_string()])
            .with_body_row(vec!["MATCH".to_string(), "find &amp; bind".to_string()])
            .with_footer_row(vec!["".to_string(), "2 clauses".to_string()]);
        let (contents, _) = map(&Block::Table(table));

        match &contents.contents[0] {
            Content::Table(table) => {
                assert_eq!(table.columns, 2);
                assert_eq!(table.rows.len(), 3);
                assert_eq!(table.rows[0].cells[0].style, CellStyle::Header);
                assert_eq!(table.rows[1].cells[1].text, "find & bind");
                assert_eq!(table.rows[1].cells[1].style, CellStyle::Body);
                assert_eq!(table.rows[2].cells[0].style, CellStyle::Footer);
            }
            other => panic!("expected table content, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_block_with_content_maps_like_a_paragraph() {
        let (contents, diagnostics) = map(&Block::Other(OtherBlock::with_content(
            "verse",
            "Roses are <em>red</em>",
        )));
        assert_eq!(text_content(&contents, 0).text, "Roses are red");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_block_without_content_warns() {
        let (contents, diagnostics) = map(&Block::Other(OtherBlock::new("toc")));
        assert!(contents.contents.is_empty());
        assert_eq!(diagnostics.warning_count(), 1);
    }

    #[test]
    fn test_nested_section_in_content_warns() {
        let (contents, diagnostics) = map(&Block::Section(slidesmith_ast::Section::new(
            "stray", 2,
        )));
        assert!(contents.contents.is_empty());
        assert_eq!(diagnostics.warning_count(), 1);
    }
}
