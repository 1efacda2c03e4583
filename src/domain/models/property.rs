//! Page property values and the property set written for each issue.
//!
//! Values serialize directly into the store's property-value JSON, e.g.
//! `{"number": 42}` or `{"rich_text": [{"type": "text", ...}]}`.

use serde::{Deserialize, Serialize};

use super::database::StatusOption;

/// Maximum UTF-16 code units the store accepts in a single text object.
pub const MAX_TEXT_CONTENT_LEN: usize = 2_000;

/// Maximum text objects the store accepts in a single rich-text array.
pub const MAX_RICH_TEXT_ITEMS: usize = 100;

/// Discriminator for rich-text objects. Only plain text is produced here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RichTextKind {
    #[default]
    Text,
}

/// One run of uniformly formatted text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(rename = "type")]
    pub kind: RichTextKind,
    pub text: TextContent,
    #[serde(default, skip_serializing_if = "Annotations::is_plain")]
    pub annotations: Annotations,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

/// Inline formatting flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotations {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub code: bool,
}

impl Annotations {
    /// True when no formatting flag is set.
    pub const fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.strikethrough || self.code)
    }
}

impl RichText {
    /// Unformatted text without a link.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            kind: RichTextKind::Text,
            text: TextContent {
                content: content.into(),
                link: None,
            },
            annotations: Annotations::default(),
        }
    }

    /// Split `content` into as many text objects as the length limit requires.
    ///
    /// Length is counted in UTF-16 code units, as the store counts it; splits
    /// fall on `char` boundaries. Empty content yields no objects.
    pub fn chunked(content: &str, annotations: Annotations, link: Option<&str>) -> Vec<Self> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut units = 0;
        for ch in content.chars() {
            if units + ch.len_utf16() > MAX_TEXT_CONTENT_LEN {
                chunks.push(std::mem::take(&mut current));
                units = 0;
            }
            units += ch.len_utf16();
            current.push(ch);
        }
        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
            .into_iter()
            .map(|content| Self {
                kind: RichTextKind::Text,
                text: TextContent {
                    content,
                    link: link.map(|url| Link {
                        url: url.to_string(),
                    }),
                },
                annotations,
            })
            .collect()
    }
}

/// Length of `text` as the store measures it (UTF-16 code units).
pub fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// A date property value. `start` is passed through without any timezone handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValue {
    pub start: String,
}

/// A reference to one option of a select property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectValue {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl From<&StatusOption> for SelectValue {
    fn from(option: &StatusOption) -> Self {
        Self {
            id: option.id.clone(),
            name: option.name.clone(),
            color: option.color.clone(),
        }
    }
}

/// A typed page property value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    Title(Vec<RichText>),
    RichText(Vec<RichText>),
    Number(u64),
    Date(DateValue),
    Select(SelectValue),
}

impl PropertyValue {
    /// A title value holding `text`, split to fit the store's limits.
    pub fn title(text: &str) -> Self {
        Self::Title(RichText::chunked(text, Annotations::default(), None))
    }

    /// A rich-text value holding unformatted `text`.
    pub fn text(text: &str) -> Self {
        Self::RichText(RichText::chunked(text, Annotations::default(), None))
    }

    pub const fn number(value: u64) -> Self {
        Self::Number(value)
    }

    pub fn date(start: &str) -> Self {
        Self::Date(DateValue {
            start: start.to_string(),
        })
    }

    pub fn select(option: &StatusOption) -> Self {
        Self::Select(SelectValue::from(option))
    }

    /// Concatenated plain content of a title or rich-text value.
    pub fn plain_text(&self) -> Option<String> {
        match self {
            Self::Title(items) | Self::RichText(items) => Some(
                items
                    .iter()
                    .map(|item| item.text.content.as_str())
                    .collect(),
            ),
            _ => None,
        }
    }
}

/// The full property payload written to an issue's page.
///
/// Either every field is sent in one create/update call or nothing is.
/// `status` is `None` when the issue state matched no option; the key is then
/// left out of the payload so the page keeps whatever status it already had.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySet {
    #[serde(rename = "Name")]
    pub name: PropertyValue,
    #[serde(rename = "Organization")]
    pub organization: PropertyValue,
    #[serde(rename = "Repository")]
    pub repository: PropertyValue,
    #[serde(rename = "Number")]
    pub number: PropertyValue,
    #[serde(rename = "Body")]
    pub body: PropertyValue,
    #[serde(rename = "Assignees")]
    pub assignees: PropertyValue,
    #[serde(rename = "Milestone")]
    pub milestone: PropertyValue,
    #[serde(rename = "Labels")]
    pub labels: PropertyValue,
    #[serde(rename = "Author")]
    pub author: PropertyValue,
    #[serde(rename = "Created")]
    pub created: PropertyValue,
    #[serde(rename = "Updated")]
    pub updated: PropertyValue,
    #[serde(rename = "ID")]
    pub id: PropertyValue,
    #[serde(rename = "Status", skip_serializing_if = "Option::is_none")]
    pub status: Option<PropertyValue>,
}
