//! Markdown content converter.
//!
//! Issue bodies are GitHub-flavoured Markdown. [`MarkdownConverter`] parses
//! them with `pulldown-cmark` and produces page blocks plus a flattened
//! rich-text summary for the `Body` property.

mod builder;
pub mod language;
pub mod links;

use crate::domain::models::property::MAX_RICH_TEXT_ITEMS;
use crate::domain::models::{Block, PropertyValue, RichText};
use crate::domain::ports::{ContentConverter, ConversionContext};

use builder::{build_blocks, push_rich_text};
use links::LinkResolver;

/// [`ContentConverter`] backed by a CommonMark parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownConverter;

impl MarkdownConverter {
    pub const fn new() -> Self {
        Self
    }
}

impl ContentConverter for MarkdownConverter {
    fn to_blocks(&self, body: Option<&str>, context: &ConversionContext) -> Vec<Block> {
        let Some(body) = body.filter(|b| !b.trim().is_empty()) else {
            return Vec::new();
        };
        let links = LinkResolver::new(context.source_url.as_deref());
        build_blocks(body, &links)
    }

    fn to_property_value(&self, body: Option<&str>) -> PropertyValue {
        let Some(body) = body.filter(|b| !b.trim().is_empty()) else {
            return PropertyValue::RichText(Vec::new());
        };
        let blocks = build_blocks(body, &LinkResolver::default());
        let mut items = Vec::new();
        for block in &blocks {
            flatten_into(block, &mut items);
        }
        items.truncate(MAX_RICH_TEXT_ITEMS);
        PropertyValue::RichText(items)
    }
}

/// Append a block's rich text (and its children's) to `items`, one line per block.
fn flatten_into(block: &Block, items: &mut Vec<RichText>) {
    let text = block.rich_text();
    if !text.is_empty() {
        if !items.is_empty() {
            push_rich_text(items, RichText::plain("\n"));
        }
        for item in text {
            push_rich_text(items, item.clone());
        }
    }
    for child in block.children() {
        flatten_into(child, items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ConversionContext {
        ConversionContext {
            source_url: Some("https://github.com/org/repo.git".to_string()),
        }
    }

    #[test]
    fn test_absent_or_blank_body_converts_to_nothing() {
        let converter = MarkdownConverter::new();
        assert!(converter.to_blocks(None, &context()).is_empty());
        assert!(converter.to_blocks(Some("  \n"), &context()).is_empty());
        assert_eq!(
            converter.to_property_value(None),
            PropertyValue::RichText(Vec::new())
        );
        assert_eq!(
            converter.to_property_value(Some("")),
            PropertyValue::RichText(Vec::new())
        );
    }

    #[test]
    fn test_bullet_list_body() {
        let blocks = MarkdownConverter.to_blocks(Some("- a\n- b"), &context());
        assert_eq!(blocks.len(), 2);
        assert!(blocks
            .iter()
            .all(|b| matches!(b, Block::BulletedListItem { .. })));
    }

    #[test]
    fn test_property_value_flattens_lines() {
        let value = MarkdownConverter.to_property_value(Some("# Title\n\n- a\n  - b\n\nend"));
        assert_eq!(value.plain_text().as_deref(), Some("Title\na\nb\nend"));
    }

    #[test]
    fn test_property_value_keeps_formatting() {
        let value = MarkdownConverter.to_property_value(Some("plain **loud**"));
        let PropertyValue::RichText(items) = value else {
            panic!("expected rich text");
        };
        assert!(!items[0].annotations.bold);
        assert!(items[1].annotations.bold);
    }

    #[test]
    fn test_property_value_is_capped() {
        let body = (0..150)
            .map(|i| format!("line {i} *x*"))
            .collect::<Vec<_>>()
            .join("\n\n");
        let PropertyValue::RichText(items) = MarkdownConverter.to_property_value(Some(&body)) else {
            panic!("expected rich text");
        };
        assert_eq!(items.len(), MAX_RICH_TEXT_ITEMS);
    }
}
