//! Event-driven construction of content blocks from Markdown.
//!
//! `pulldown-cmark` events arrive strictly nested, so every `Start` pushes an
//! [`Open`] frame and every `End` pops one; the frame tells us what just
//! closed without inspecting the end tag itself.

use std::mem;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag};

use crate::domain::models::property::{text_len, MAX_RICH_TEXT_ITEMS, MAX_TEXT_CONTENT_LEN};
use crate::domain::models::{
    Annotations, Block, RichText, MAX_BLOCKS_PER_APPEND, MAX_BLOCKS_PER_REQUEST,
};

use super::language::code_language;
use super::links::{LinkResolver, LinkTarget};

/// Deepest child level the store accepts in a single append.
const MAX_NESTING_DEPTH: usize = 2;

/// Parser extensions matching GitHub-flavoured issue bodies.
pub fn parser_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Convert `markdown` into blocks, resolving links with `links`.
pub fn build_blocks(markdown: &str, links: &LinkResolver) -> Vec<Block> {
    let mut builder = BlockBuilder::new(links);
    for event in Parser::new_ext(markdown, parser_options()) {
        builder.handle(event);
    }
    builder.finish()
}

/// Append `item`, merging it into the previous run when formatting matches.
pub fn push_rich_text(items: &mut Vec<RichText>, item: RichText) {
    if let Some(last) = items.last_mut() {
        let fits =
            text_len(&last.text.content) + text_len(&item.text.content) <= MAX_TEXT_CONTENT_LEN;
        if fits && last.annotations == item.annotations && last.text.link == item.text.link {
            last.text.content.push_str(&item.text.content);
            return;
        }
    }
    items.push(item);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Open {
    Paragraph,
    Heading(u8),
    Quote,
    Code,
    HtmlBlock,
    List,
    Item,
    Emphasis,
    Strong,
    Strikethrough,
    Link,
    Image,
    TableRow,
    Other,
}

/// A list item that is still receiving content.
struct OpenItem {
    block: Block,
    /// Blocks that could not become children (too deep, or the item is full);
    /// emitted right after the item.
    trailing: Vec<Block>,
    /// Quote depth at the item's start; deeper paragraphs are not item text.
    quote_depth: usize,
}

struct CodeState {
    language: &'static str,
    text: String,
}

struct ImageState {
    url: Option<String>,
    alt: String,
}

struct BlockBuilder<'a> {
    links: &'a LinkResolver,
    blocks: Vec<Block>,
    frames: Vec<Open>,
    items: Vec<OpenItem>,
    lists: Vec<bool>,
    inline: Vec<RichText>,
    pending_images: Vec<Block>,
    link_stack: Vec<Option<String>>,
    image: Option<ImageState>,
    code: Option<CodeState>,
    bold: usize,
    italic: usize,
    strikethrough: usize,
    quote_depth: usize,
    table_cells: usize,
    in_html_comment: bool,
}

impl<'a> BlockBuilder<'a> {
    fn new(links: &'a LinkResolver) -> Self {
        Self {
            links,
            blocks: Vec::new(),
            frames: Vec::new(),
            items: Vec::new(),
            lists: Vec::new(),
            inline: Vec::new(),
            pending_images: Vec::new(),
            link_stack: Vec::new(),
            image: None,
            code: None,
            bold: 0,
            italic: 0,
            strikethrough: 0,
            quote_depth: 0,
            table_cells: 0,
            in_html_comment: false,
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.end(),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.push_inline(&code, true),
            Event::Html(html) | Event::InlineHtml(html) => self.html(&html),
            Event::SoftBreak | Event::HardBreak => self.line_break(),
            Event::Rule => {
                self.commit_inline();
                self.attach(Block::divider());
            }
            Event::TaskListMarker(checked) => self.mark_task(checked),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => Open::Paragraph,
            Tag::Heading { level, .. } => {
                self.commit_inline();
                Open::Heading(heading_level(level))
            }
            Tag::BlockQuote { .. } => {
                self.commit_inline();
                self.quote_depth += 1;
                Open::Quote
            }
            Tag::CodeBlock(kind) => {
                self.commit_inline();
                let language = match &kind {
                    CodeBlockKind::Fenced(info) => code_language(info),
                    CodeBlockKind::Indented => code_language(""),
                };
                self.code = Some(CodeState {
                    language,
                    text: String::new(),
                });
                Open::Code
            }
            Tag::HtmlBlock => {
                self.commit_inline();
                Open::HtmlBlock
            }
            Tag::List(start) => {
                self.commit_inline();
                self.lists.push(start.is_some());
                Open::List
            }
            Tag::Item => {
                self.commit_inline();
                let ordered = self.lists.last().copied().unwrap_or(false);
                let block = if ordered {
                    Block::numbered_list_item(Vec::new())
                } else {
                    Block::bulleted_list_item(Vec::new())
                };
                self.items.push(OpenItem {
                    block,
                    trailing: Vec::new(),
                    quote_depth: self.quote_depth,
                });
                Open::Item
            }
            Tag::Emphasis => {
                self.italic += 1;
                Open::Emphasis
            }
            Tag::Strong => {
                self.bold += 1;
                Open::Strong
            }
            Tag::Strikethrough => {
                self.strikethrough += 1;
                Open::Strikethrough
            }
            Tag::Link { dest_url, .. } => {
                self.link_stack
                    .push(self.links.resolve(&dest_url, LinkTarget::Page));
                Open::Link
            }
            Tag::Image { dest_url, .. } => {
                self.image = Some(ImageState {
                    url: self.links.resolve(&dest_url, LinkTarget::Raw),
                    alt: String::new(),
                });
                Open::Image
            }
            Tag::TableHead | Tag::TableRow => {
                self.table_cells = 0;
                Open::TableRow
            }
            Tag::TableCell => {
                if self.table_cells > 0 {
                    self.push_inline(" | ", false);
                }
                self.table_cells += 1;
                Open::Other
            }
            _ => Open::Other,
        };
        self.frames.push(frame);
    }

    fn end(&mut self) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        match frame {
            Open::Paragraph | Open::HtmlBlock => self.finish_paragraph(),
            Open::Heading(level) => {
                let rich_text = mem::take(&mut self.inline);
                if !rich_text.is_empty() {
                    self.attach(Block::heading(level, rich_text));
                }
                self.flush_images();
            }
            Open::Quote => {
                self.commit_inline();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            Open::Code => self.finish_code(),
            Open::List => {
                self.lists.pop();
            }
            Open::Item => self.close_item(),
            Open::Emphasis => self.italic = self.italic.saturating_sub(1),
            Open::Strong => self.bold = self.bold.saturating_sub(1),
            Open::Strikethrough => self.strikethrough = self.strikethrough.saturating_sub(1),
            Open::Link => {
                self.link_stack.pop();
            }
            Open::Image => self.finish_image(),
            Open::TableRow => {
                let rich_text = mem::take(&mut self.inline);
                if !rich_text.is_empty() {
                    self.attach(Block::paragraph(rich_text));
                }
            }
            Open::Other => {}
        }
    }

    fn text(&mut self, text: &CowStr<'_>) {
        if let Some(code) = &mut self.code {
            code.text.push_str(text);
        } else if let Some(image) = &mut self.image {
            image.alt.push_str(text);
        } else {
            self.push_inline(text, false);
        }
    }

    fn line_break(&mut self) {
        if let Some(image) = &mut self.image {
            image.alt.push(' ');
        } else {
            self.push_inline("\n", false);
        }
    }

    fn html(&mut self, html: &str) {
        let trimmed = html.trim();
        if self.in_html_comment || trimmed.starts_with("<!--") {
            self.in_html_comment = !trimmed.contains("-->");
            return;
        }
        let lowered = trimmed.to_ascii_lowercase();
        if lowered.starts_with("<br") {
            self.line_break();
            return;
        }
        // Bare tags (<details>, </kbd>) carry no text of their own.
        if trimmed.starts_with('<') && trimmed.ends_with('>') && !trimmed[1..].contains('<') {
            return;
        }
        self.push_inline(html.trim_end_matches('\n'), false);
    }

    fn mark_task(&mut self, checked: bool) {
        if let Some(item) = self.items.last_mut() {
            item.block = Block::to_do(Vec::new(), checked);
        }
    }

    fn push_inline(&mut self, text: &str, code: bool) {
        if text.is_empty() {
            return;
        }
        let annotations = Annotations {
            bold: self.bold > 0,
            italic: self.italic > 0,
            strikethrough: self.strikethrough > 0,
            code,
        };
        let link = self.link_stack.last().cloned().flatten();
        for item in RichText::chunked(text, annotations, link.as_deref()) {
            push_rich_text(&mut self.inline, item);
        }
    }

    /// Whether inline text currently belongs to the innermost open list item.
    fn inline_targets_item(&self) -> bool {
        self.items
            .last()
            .is_some_and(|item| item.quote_depth == self.quote_depth)
    }

    /// Move buffered inline text into the current item, or into its own block.
    fn commit_inline(&mut self) {
        if !self.inline.is_empty() {
            if self.inline_targets_item() {
                self.append_to_item();
            } else {
                self.finish_paragraph();
                return;
            }
        }
        self.flush_images();
    }

    fn append_to_item(&mut self) {
        let rich_text = mem::take(&mut self.inline);
        let Some(target) = self
            .items
            .last_mut()
            .and_then(|item| item.block.rich_text_mut())
        else {
            return;
        };
        if !target.is_empty() {
            push_rich_text(target, RichText::plain("\n"));
        }
        for item in rich_text {
            push_rich_text(target, item);
        }
    }

    fn finish_paragraph(&mut self) {
        if self.inline_targets_item() {
            self.append_to_item();
        } else {
            let rich_text = mem::take(&mut self.inline);
            if !rich_text.is_empty() {
                let block = if self.quote_depth > 0 {
                    Block::quote(rich_text)
                } else {
                    Block::paragraph(rich_text)
                };
                self.attach(block);
            }
        }
        self.flush_images();
    }

    fn finish_code(&mut self) {
        let Some(code) = self.code.take() else {
            return;
        };
        let text = code.text.trim_end_matches('\n');
        let rich_text = RichText::chunked(text, Annotations::default(), None);
        self.attach(Block::code(rich_text, code.language));
    }

    fn finish_image(&mut self) {
        let Some(image) = self.image.take() else {
            return;
        };
        match image.url {
            Some(url) => self.pending_images.push(Block::image(url)),
            None => {
                let alt = image.alt;
                self.push_inline(&alt, false);
            }
        }
    }

    fn flush_images(&mut self) {
        for image in mem::take(&mut self.pending_images) {
            self.attach(image);
        }
    }

    fn close_item(&mut self) {
        self.commit_inline();
        let Some(item) = self.items.pop() else {
            return;
        };
        let depth = self.items.len();
        self.attach_at(item.block, depth);
        for block in item.trailing {
            self.attach_at(block, depth);
        }
    }

    fn attach(&mut self, block: Block) {
        let depth = self.items.len();
        self.attach_at(block, depth);
    }

    /// Place `block` at nesting `depth`, spilling rich text over the item limit
    /// into follow-up paragraphs.
    fn attach_at(&mut self, mut block: Block, depth: usize) {
        let overflow = split_overflow(&mut block);
        self.place(block, depth);
        for extra in overflow {
            self.place(extra, depth);
        }
    }

    /// Put `block` under the item at `depth - 1`, or after it when that item
    /// cannot take more children.
    fn place(&mut self, block: Block, depth: usize) {
        if depth == 0 {
            self.blocks.push(block);
            return;
        }
        // A top-level block and its descendants must fit in one request.
        let fits = self.open_subtree_len() + block.block_count() <= MAX_BLOCKS_PER_REQUEST;
        let parent_index = depth - 1;
        let parent = &mut self.items[parent_index];
        if fits && parent_index < MAX_NESTING_DEPTH {
            if let Some(children) = parent.block.children_mut() {
                if children.len() < MAX_BLOCKS_PER_APPEND {
                    children.push(block);
                    return;
                }
            }
        }
        parent.trailing.push(block);
    }

    /// Blocks that will end up inside the outermost open item once it closes.
    /// Its own trailing blocks land beside it, not inside.
    fn open_subtree_len(&self) -> usize {
        let held: usize = self.items.iter().map(|item| item.block.block_count()).sum();
        let pending: usize = self
            .items
            .iter()
            .skip(1)
            .flat_map(|item| &item.trailing)
            .map(Block::block_count)
            .sum();
        held + pending
    }

    fn finish(mut self) -> Vec<Block> {
        self.commit_inline();
        while !self.items.is_empty() {
            self.close_item();
        }
        self.flush_images();
        self.blocks
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        _ => 3,
    }
}

/// Cut rich text beyond the per-array limit off `block`, returning it as
/// paragraphs of at most that many items each.
fn split_overflow(block: &mut Block) -> Vec<Block> {
    let Some(rich_text) = block.rich_text_mut() else {
        return Vec::new();
    };
    if rich_text.len() <= MAX_RICH_TEXT_ITEMS {
        return Vec::new();
    }
    let rest = rich_text.split_off(MAX_RICH_TEXT_ITEMS);
    rest.chunks(MAX_RICH_TEXT_ITEMS)
        .map(|chunk| Block::paragraph(chunk.to_vec()))
        .collect()
}
