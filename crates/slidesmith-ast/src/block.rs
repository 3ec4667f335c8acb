//! Block-level elements for document structure
//!
//! This module defines the block-level node kinds the content mapper
//! dispatches on: sections, paragraphs, lists, images, listings, open
//! containers, admonitions, and tables. Leaf nodes carry their raw
//! content in the inline markup dialect; role tags ride on every kind.

use serde::{Deserialize, Serialize};

/// Block-level content element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    /// A titled section (maps to one slide)
    Section(Section),
    /// A paragraph of marked-up text
    Paragraph(Paragraph),
    /// An ordered, unordered, or checklist list
    List(List),
    /// An image reference
    Image(Image),
    /// A literal/code listing
    Listing(Listing),
    /// An open container grouping other blocks
    Open(OpenBlock),
    /// An admonition block (note, warning, etc.)
    Admonition(Admonition),
    /// A table
    Table(Table),
    /// Any node kind the mapper has no dedicated handling for
    Other(OtherBlock),
}

impl Block {
    /// Role tags attached to this block
    pub fn roles(&self) -> &[String] {
        match self {
            Block::Section(b) => &b.roles,
            Block::Paragraph(b) => &b.roles,
            Block::List(b) => &b.roles,
            Block::Image(b) => &b.roles,
            Block::Listing(b) => &b.roles,
            Block::Open(b) => &b.roles,
            Block::Admonition(b) => &b.roles,
            Block::Table(b) => &b.roles,
            Block::Other(b) => &b.roles,
        }
    }

    /// Check if this block carries a given role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles().iter().any(|r| r == role)
    }

    /// Check if this block is a section
    pub fn is_section(&self) -> bool {
        matches!(self, Block::Section(_))
    }
}

/// A titled section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section title (the literal `"!"` suppresses the slide title)
    pub title: String,
    /// Nesting level (1 = top level)
    pub level: u8,
    /// Role tags
    pub roles: Vec<String>,
    /// Child blocks, including nested sections
    pub blocks: Vec<Block>,
}

impl Section {
    /// Create an empty section
    pub fn new(title: impl Into<String>, level: u8) -> Self {
        Self {
            title: title.into(),
            level,
            roles: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Set the role tags
    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    /// Add a child block
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }
}

/// A paragraph of marked-up text
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Raw content in the inline markup dialect
    pub content: String,
    /// Role tags
    pub roles: Vec<String>,
}

impl Paragraph {
    /// Create a paragraph from raw marked-up content
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            roles: Vec::new(),
        }
    }

    /// Set the role tags
    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }
}

/// List kind as declared by the source document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    /// Unordered/bullet list
    Unordered,
    /// Ordered/numbered list
    Ordered,
}

/// A list (ordered, unordered, or checklist via option)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    /// Declared list kind
    pub kind: ListKind,
    /// List items in order
    pub items: Vec<ListItem>,
    /// Role tags
    pub roles: Vec<String>,
    /// List options (`checklist` turns an unordered list into a checklist)
    pub options: Vec<String>,
}

impl List {
    /// Create an empty list of the given kind
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            roles: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Add an item
    pub fn with_item(mut self, item: ListItem) -> Self {
        self.items.push(item);
        self
    }

    /// Set the role tags
    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    /// Add a list option
    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }

    /// Check if the list declares a given option
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// A single list item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Item text in the inline markup dialect
    pub text: String,
    /// Checked state, meaningful for checklist items
    pub checked: bool,
    /// Nested blocks (nested lists in particular)
    pub blocks: Vec<Block>,
}

impl ListItem {
    /// Create a plain list item
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            checked: false,
            blocks: Vec::new(),
        }
    }

    /// Create a checked checklist item
    pub fn checked(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            checked: true,
            blocks: Vec::new(),
        }
    }

    /// Attach a nested list
    pub fn with_nested(mut self, list: List) -> Self {
        self.blocks.push(Block::List(list));
        self
    }
}

/// An image reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Image target as written in the source (URL or relative path)
    pub target: String,
    /// Role tags
    pub roles: Vec<String>,
}

impl Image {
    /// Create an image block from its target
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            roles: Vec::new(),
        }
    }
}

/// A literal/code listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Raw listing content, entity-escaped
    pub content: String,
    /// Role tags
    pub roles: Vec<String>,
}

impl Listing {
    /// Create a listing from raw content
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            roles: Vec::new(),
        }
    }
}

/// An open container block grouping other blocks
///
/// Open blocks carry the layout conventions: role `two-columns` marks a
/// two-column slide body, role `notes` marks speaker-note material.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OpenBlock {
    /// Child blocks in order
    pub blocks: Vec<Block>,
    /// Role tags
    pub roles: Vec<String>,
}

impl OpenBlock {
    /// Create an empty open block
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the role tags
    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    /// Add a child block
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }
}

/// An admonition block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admonition {
    /// Style keyword, e.g. `NOTE`, `WARNING`
    pub label: String,
    /// Admonition body
    pub body: AdmonitionBody,
    /// Role tags
    pub roles: Vec<String>,
}

/// Body of an admonition block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AdmonitionBody {
    /// A single text body, entity-escaped
    Simple(String),
    /// Nested block structure
    Complex(Vec<Block>),
}

impl Admonition {
    /// Create a simple admonition
    pub fn simple(label: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            body: AdmonitionBody::Simple(body.into()),
            roles: Vec::new(),
        }
    }

    /// Create a complex admonition from nested blocks
    pub fn complex(label: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            label: label.into(),
            body: AdmonitionBody::Complex(blocks),
            roles: Vec::new(),
        }
    }
}

/// A table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    /// Declared column count
    pub columns: u32,
    /// Header row group
    pub header: Vec<Row>,
    /// Body row group
    pub body: Vec<Row>,
    /// Footer row group
    pub footer: Vec<Row>,
    /// Role tags
    pub roles: Vec<String>,
}

/// A table row: cell texts in column order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    /// Cell texts, entity-escaped
    pub cells: Vec<String>,
}

impl Row {
    /// Create a row from cell texts
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }
}

impl Table {
    /// Create an empty table with a column count
    pub fn new(columns: u32) -> Self {
        Self {
            columns,
            ..Default::default()
        }
    }

    /// Add a header row
    pub fn with_header_row(mut self, cells: Vec<String>) -> Self {
        self.header.push(Row::new(cells));
        self
    }

    /// Add a body row
    pub fn with_body_row(mut self, cells: Vec<String>) -> Self {
        self.body.push(Row::new(cells));
        self
    }

    /// Add a footer row
    pub fn with_footer_row(mut self, cells: Vec<String>) -> Self {
        self.footer.push(Row::new(cells));
        self
    }
}

/// A node kind without dedicated mapping
///
/// Unknown kinds that still carry plain text content are mapped like
/// paragraphs; the rest produce a warning and no content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherBlock {
    /// Structural kind tag from the source document
    pub context: String,
    /// Role tags
    pub roles: Vec<String>,
    /// Raw text content, when the node carries any
    pub content: Option<String>,
}

impl OtherBlock {
    /// Create an unknown block without text content
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            roles: Vec::new(),
            content: None,
        }
    }

    /// Create an unknown block carrying text content
    pub fn with_content(context: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            roles: Vec::new(),
            content: Some(content.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_roles_accessor() {
        let block = Block::Paragraph(Paragraph::new("text").with_roles(vec!["small".to_string()]));
        assert_eq!(block.roles(), ["small".to_string()]);
        assert!(block.has_role("small"));
        assert!(!block.has_role("notes"));
    }

    #[test]
    fn test_section_builder() {
        let section = Section::new("Queries", 1)
            .with_roles(vec!["green".to_string()])
            .with_block(Block::Paragraph(Paragraph::new("Intro")));
        assert_eq!(section.title, "Queries");
        assert_eq!(section.level, 1);
        assert_eq!(section.blocks.len(), 1);
        assert!(Block::Section(section).has_role("green"));
    }

    #[test]
    fn test_list_options() {
        let list = List::new(ListKind::Unordered)
            .with_option("checklist")
            .with_item(ListItem::checked("LOAD CSV"))
            .with_item(ListItem::new("IMPORT CSV"));
        assert!(list.has_option("checklist"));
        assert!(!list.has_option("interactive"));
        assert!(list.items[0].checked);
        assert!(!list.items[1].checked);
    }

    #[test]
    fn test_nested_list_item() {
        let item = ListItem::new("parent").with_nested(
            List::new(ListKind::Unordered).with_item(ListItem::new("child")),
        );
        assert_eq!(item.blocks.len(), 1);
        assert!(matches!(item.blocks[0], Block::List(_)));
    }

    #[test]
    fn test_admonition_bodies() {
        let simple = Admonition::simple("NOTE", "Check the manual.");
        assert!(matches!(simple.body, AdmonitionBody::Simple(_)));

        let complex = Admonition::complex(
            "WARNING",
            vec![Block::Paragraph(Paragraph::new("first"))],
        );
        assert!(matches!(complex.body, AdmonitionBody::Complex(ref b) if b.len() == 1));
    }

    #[test]
    fn test_table_row_groups() {
        let table = Table::new(2)
            .with_header_row(vec!["Name".to_string(), "Type".to_string()])
            .with_body_row(vec!["age".to_string(), "integer".to_string()])
            .with_footer_row(vec!["".to_string(), "1 column".to_string()]);
        assert_eq!(table.columns, 2);
        assert_eq!(table.header.len(), 1);
        assert_eq!(table.body.len(), 1);
        assert_eq!(table.footer.len(), 1);
    }

    #[test]
    fn test_block_serialization() {
        let block = Block::Image(Image::new("https://example.com/a.png"));
        let json = serde_json::to_string(&block).unwrap();
        assert!(json.contains("\"Image\""));
        assert!(json.contains("https://example.com/a.png"));

        let restored: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, block);
    }
}
