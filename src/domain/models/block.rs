//! Content blocks appended to a freshly created page.
//!
//! Each variant serializes into the store's block object, e.g.
//! `{"type": "paragraph", "paragraph": {"rich_text": [...]}}`.

use serde::Serialize;

use super::property::RichText;

/// Maximum children the store accepts in one append request.
/// Also the limit for any single block's `children` array.
pub const MAX_BLOCKS_PER_APPEND: usize = 100;

/// Maximum blocks in one append request, nested children included.
pub const MAX_BLOCKS_PER_REQUEST: usize = 1_000;

/// Body of blocks that carry rich text and may nest children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextBlock {
    pub rich_text: Vec<RichText>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToDoBlock {
    pub rich_text: Vec<RichText>,
    pub checked: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    pub rich_text: Vec<RichText>,
    /// One of the store's supported language names, "plain text" otherwise.
    pub language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    External,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalFile {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageBlock {
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub external: ExternalFile,
}

/// Blocks without a payload (dividers) still need an empty object on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmptyBlock {}

/// A single content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Block {
    #[serde(rename = "paragraph")]
    Paragraph { paragraph: TextBlock },
    #[serde(rename = "heading_1")]
    Heading1 { heading_1: TextBlock },
    #[serde(rename = "heading_2")]
    Heading2 { heading_2: TextBlock },
    #[serde(rename = "heading_3")]
    Heading3 { heading_3: TextBlock },
    #[serde(rename = "bulleted_list_item")]
    BulletedListItem { bulleted_list_item: TextBlock },
    #[serde(rename = "numbered_list_item")]
    NumberedListItem { numbered_list_item: TextBlock },
    #[serde(rename = "to_do")]
    ToDo { to_do: ToDoBlock },
    #[serde(rename = "quote")]
    Quote { quote: TextBlock },
    #[serde(rename = "code")]
    Code { code: CodeBlock },
    #[serde(rename = "image")]
    Image { image: ImageBlock },
    #[serde(rename = "divider")]
    Divider { divider: EmptyBlock },
}

fn text_block(rich_text: Vec<RichText>) -> TextBlock {
    TextBlock {
        rich_text,
        children: Vec::new(),
    }
}

impl Block {
    pub fn paragraph(rich_text: Vec<RichText>) -> Self {
        Self::Paragraph {
            paragraph: text_block(rich_text),
        }
    }

    /// A heading; levels beyond 3 collapse into the smallest heading.
    pub fn heading(level: u8, rich_text: Vec<RichText>) -> Self {
        match level {
            0 | 1 => Self::Heading1 {
                heading_1: text_block(rich_text),
            },
            2 => Self::Heading2 {
                heading_2: text_block(rich_text),
            },
            _ => Self::Heading3 {
                heading_3: text_block(rich_text),
            },
        }
    }

    pub fn bulleted_list_item(rich_text: Vec<RichText>) -> Self {
        Self::BulletedListItem {
            bulleted_list_item: text_block(rich_text),
        }
    }

    pub fn numbered_list_item(rich_text: Vec<RichText>) -> Self {
        Self::NumberedListItem {
            numbered_list_item: text_block(rich_text),
        }
    }

    pub fn to_do(rich_text: Vec<RichText>, checked: bool) -> Self {
        Self::ToDo {
            to_do: ToDoBlock {
                rich_text,
                checked,
                children: Vec::new(),
            },
        }
    }

    pub fn quote(rich_text: Vec<RichText>) -> Self {
        Self::Quote {
            quote: text_block(rich_text),
        }
    }

    pub fn code(rich_text: Vec<RichText>, language: impl Into<String>) -> Self {
        Self::Code {
            code: CodeBlock {
                rich_text,
                language: language.into(),
            },
        }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self::Image {
            image: ImageBlock {
                kind: FileKind::External,
                external: ExternalFile { url: url.into() },
            },
        }
    }

    pub const fn divider() -> Self {
        Self::Divider {
            divider: EmptyBlock {},
        }
    }

    /// The block's rich text; empty for blocks that carry none.
    pub fn rich_text(&self) -> &[RichText] {
        match self {
            Self::Paragraph { paragraph: body }
            | Self::Heading1 { heading_1: body }
            | Self::Heading2 { heading_2: body }
            | Self::Heading3 { heading_3: body }
            | Self::BulletedListItem {
                bulleted_list_item: body,
            }
            | Self::NumberedListItem {
                numbered_list_item: body,
            }
            | Self::Quote { quote: body } => &body.rich_text,
            Self::ToDo { to_do } => &to_do.rich_text,
            Self::Code { code } => &code.rich_text,
            Self::Image { .. } | Self::Divider { .. } => &[],
        }
    }

    /// Nested children; empty for blocks that cannot have any.
    pub fn children(&self) -> &[Self] {
        match self {
            Self::BulletedListItem {
                bulleted_list_item: body,
            }
            | Self::NumberedListItem {
                numbered_list_item: body,
            }
            | Self::Quote { quote: body } => &body.children,
            Self::ToDo { to_do } => &to_do.children,
            _ => &[],
        }
    }

    /// This block plus all of its descendants.
    pub fn block_count(&self) -> usize {
        1 + self.children().iter().map(Self::block_count).sum::<usize>()
    }

    /// Mutable access to the nested children of list-like blocks.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Self>> {
        match self {
            Self::BulletedListItem {
                bulleted_list_item: body,
            }
            | Self::NumberedListItem {
                numbered_list_item: body,
            }
            | Self::Quote { quote: body } => Some(&mut body.children),
            Self::ToDo { to_do } => Some(&mut to_do.children),
            _ => None,
        }
    }

    /// Mutable access to the block's rich text, if it carries any.
    pub fn rich_text_mut(&mut self) -> Option<&mut Vec<RichText>> {
        match self {
            Self::Paragraph { paragraph: body }
            | Self::Heading1 { heading_1: body }
            | Self::Heading2 { heading_2: body }
            | Self::Heading3 { heading_3: body }
            | Self::BulletedListItem {
                bulleted_list_item: body,
            }
            | Self::NumberedListItem {
                numbered_list_item: body,
            }
            | Self::Quote { quote: body } => Some(&mut body.rich_text),
            Self::ToDo { to_do } => Some(&mut to_do.rich_text),
            Self::Code { code } => Some(&mut code.rich_text),
            Self::Image { .. } | Self::Divider { .. } => None,
        }
    }
}
