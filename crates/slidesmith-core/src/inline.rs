//! Inline markup parsing.
//!
//! Leaf document nodes carry text in a machine-generated HTML subset:
//! `strong`, `b`, `em`, `code`, `kbd`, `mark`, `sup`, `sub`, `span` with
//! classes, `a href`, and `br/`, plus character entities. This module
//! turns one such fragment into its plain-text projection and a flat,
//! ordered list of styled ranges with cumulative roles.
//!
//! Offsets are character counts over the decoded plain text. A fragment
//! whose plain projection equals the input verbatim had no markup; it
//! yields no ranges and callers treat the whole string as one implicit
//! unstyled run.

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

use crate::content::{InlineToken, TextRange};

/// Outcome of parsing one marked-up fragment
#[derive(Debug, Clone, PartialEq)]
pub struct InlineText {
    /// Markup-stripped, entity-decoded text
    pub text: String,
    /// Styled ranges over `text`; empty when the fragment had no markup
    pub ranges: Vec<TextRange>,
}

/// Parse a marked-up fragment with offsets starting at zero
pub fn parse_inline(input: &str) -> InlineText {
    parse_inline_at(input, 0)
}

/// Parse a marked-up fragment with offsets based at `initial_index`
///
/// Callers continuing a longer text (list items joined by newlines) pass
/// the running character index so every produced range lands at its
/// final position.
pub fn parse_inline_at(input: &str, initial_index: usize) -> InlineText {
    if input.is_empty() {
        return InlineText {
            text: String::new(),
            ranges: Vec::new(),
        };
    }

    let tokens = match tokenize(input) {
        Ok(tokens) => tokens,
        Err(err) => {
            log::debug!("treating unparseable inline markup as plain text: {err}");
            return InlineText {
                text: input.to_string(),
                ranges: Vec::new(),
            };
        }
    };

    let mut text = String::new();
    let mut ranges = Vec::with_capacity(tokens.len());
    let mut index = initial_index;
    for token in tokens {
        let len = token.text().chars().count();
        text.push_str(token.text());
        ranges.push(TextRange::new(token, index, index + len));
        index += len;
    }

    if text == input {
        ranges.clear();
    }

    InlineText { text, ranges }
}

/// Decode character entities in a fragment without markup tags
///
/// A fragment containing an unrecognized entity is returned undecoded
/// rather than failing.
pub fn decode_entities(input: &str) -> String {
    match quick_xml::escape::unescape_with(input, resolve_entity) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => input.to_string(),
    }
}

/// Walk the markup events and flatten them into styled tokens
fn tokenize(input: &str) -> Result<Vec<InlineToken>, quick_xml::Error> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().check_end_names = false;

    let mut tokens = Vec::new();
    // Each frame is the full cumulative role list at that depth.
    let mut role_stack: Vec<Vec<String>> = vec![Vec::new()];

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name();
                if name.as_ref() == b"a" {
                    // Anchors flatten their whole subtree into one token;
                    // nested tag names inside a link do not become roles.
                    let target = attribute_value(&e, "href").unwrap_or_default();
                    let text = read_anchor_text(&mut reader)?;
                    if !text.is_empty() {
                        tokens.push(InlineToken::anchor(
                            text,
                            target,
                            current_roles(&role_stack),
                        ));
                    }
                } else {
                    let mut roles = current_roles(&role_stack);
                    if name.as_ref() == b"span" {
                        roles.extend(class_roles(&e));
                    } else {
                        roles.push(String::from_utf8_lossy(name.as_ref()).into_owned());
                    }
                    role_stack.push(roles);
                }
            }
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"br" {
                    tokens.push(InlineToken::plain("\n", current_roles(&role_stack)));
                }
                // Other childless tags carry no text and are skipped.
            }
            Event::End(_) => {
                if role_stack.len() > 1 {
                    role_stack.pop();
                }
            }
            Event::Text(t) => {
                let text = decode_text(&t);
                if !text.is_empty() {
                    tokens.push(InlineToken::plain(text, current_roles(&role_stack)));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(tokens)
}

/// Collect the flattened text of an anchor subtree
fn read_anchor_text(reader: &mut Reader<&[u8]>) -> Result<String, quick_xml::Error> {
    let mut depth = 1usize;
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Start(_) => depth += 1,
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"br" {
                    text.push('\n');
                }
            }
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Text(t) => text.push_str(&decode_text(&t)),
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(text)
}

fn current_roles(role_stack: &[Vec<String>]) -> Vec<String> {
    role_stack.last().cloned().unwrap_or_default()
}

fn decode_text(t: &BytesText) -> String {
    match t.unescape_with(resolve_entity) {
        Ok(decoded) => decoded.into_owned(),
        // A stray ampersand stays as written.
        Err(_) => String::from_utf8_lossy(t.as_ref()).into_owned(),
    }
}

fn attribute_value(e: &BytesStart, name: &str) -> Option<String> {
    e.try_get_attribute(name)
        .ok()
        .flatten()
        .and_then(|attr| attr.unescape_value().ok())
        .map(|value| value.into_owned())
}

fn class_roles(e: &BytesStart) -> Vec<String> {
    attribute_value(e, "class")
        .map(|classes| classes.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Resolve named entities, extending the predefined XML five with the
/// HTML names the upstream toolchain emits
///
/// Numeric references are handled by quick-xml itself.
fn resolve_entity(entity: &str) -> Option<&'static str> {
    if let Some(predefined) = quick_xml::escape::resolve_predefined_entity(entity) {
        return Some(predefined);
    }
    match entity {
        "nbsp" => Some("\u{a0}"),
        "shy" => Some("\u{ad}"),
        "ensp" => Some("\u{2002}"),
        "emsp" => Some("\u{2003}"),
        "thinsp" => Some("\u{2009}"),
        "ndash" => Some("\u{2013}"),
        "mdash" => Some("\u{2014}"),
        "lsquo" => Some("\u{2018}"),
        "rsquo" => Some("\u{2019}"),
        "ldquo" => Some("\u{201c}"),
        "rdquo" => Some("\u{201d}"),
        "hellip" => Some("\u{2026}"),
        _ => None,
    }
}
