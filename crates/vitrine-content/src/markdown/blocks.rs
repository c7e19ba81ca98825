//! Markdown to [`ContentBlock`]s.
//!
//! - paragraphs (and block quotes) become `Text`
//! - fenced or indented code becomes `Code`, with the fence's first info
//!   word as the language
//! - top-level lists become `InfoList`; a heading directly above a list
//!   becomes the list's title
//! - any other heading becomes a `Text` block of its own
//!
//! Nested list items are folded into their parent item's text.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};

use crate::learning::ContentBlock;
use crate::markdown::parser::collapse_whitespace;

#[derive(Default)]
struct Builder {
    blocks: Vec<ContentBlock>,
    pending_heading: Option<String>,
    text: String,
    code_language: Option<String>,
    list_depth: usize,
    items: Vec<String>,
}

impl Builder {
    fn flush_heading(&mut self) {
        if let Some(heading) = self.pending_heading.take() {
            self.blocks.push(ContentBlock::text(heading));
        }
    }

    fn take_text(&mut self) -> String {
        collapse_whitespace(&std::mem::take(&mut self.text))
    }
}

/// Convert a markdown body to blocks.
pub fn markdown_to_blocks(content: &str) -> Vec<ContentBlock> {
    let mut b = Builder::default();
    let mut in_heading = false;
    let mut in_code = false;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Heading { .. }) if b.list_depth == 0 => {
                b.flush_heading();
                in_heading = true;
                b.text.clear();
            }
            Event::End(TagEnd::Heading(_)) if in_heading => {
                in_heading = false;
                let heading = b.take_text();
                if !heading.is_empty() {
                    b.pending_heading = Some(heading);
                }
            }

            Event::Start(Tag::CodeBlock(kind)) if b.list_depth == 0 => {
                b.flush_heading();
                in_code = true;
                b.text.clear();
                b.code_language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                };
            }
            Event::End(TagEnd::CodeBlock) if in_code => {
                in_code = false;
                let code = std::mem::take(&mut b.text);
                let language = b.code_language.take();
                b.blocks.push(ContentBlock::Code {
                    language,
                    code: code.trim_end_matches('\n').to_string(),
                });
            }

            Event::Start(Tag::List(_)) => {
                if b.list_depth == 0 {
                    b.items.clear();
                }
                b.text.push(' ');
                b.list_depth += 1;
            }
            Event::End(TagEnd::List(_)) => {
                b.list_depth = b.list_depth.saturating_sub(1);
                if b.list_depth == 0 {
                    let title = b.pending_heading.take();
                    let items = std::mem::take(&mut b.items);
                    if !items.is_empty() {
                        b.blocks.push(ContentBlock::InfoList { title, items });
                    }
                }
            }
            Event::Start(Tag::Item) if b.list_depth == 1 => b.text.clear(),
            Event::End(TagEnd::Item) if b.list_depth == 1 => {
                let item = b.take_text();
                if !item.is_empty() {
                    b.items.push(item);
                }
            }

            Event::Start(Tag::Paragraph) if b.list_depth == 0 => {
                b.flush_heading();
                b.text.clear();
            }
            Event::End(TagEnd::Paragraph) if b.list_depth == 0 => {
                let paragraph = b.take_text();
                if !paragraph.is_empty() {
                    b.blocks.push(ContentBlock::text(paragraph));
                }
            }

            Event::Text(t) | Event::Code(t) => b.text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => {
                b.text.push(if in_code { '\n' } else { ' ' });
            }
            // Paragraph or nested-list boundaries inside an item
            Event::End(TagEnd::Paragraph | TagEnd::Item) => b.text.push(' '),
            _ => {}
        }
    }

    b.flush_heading();
    b.blocks
}
