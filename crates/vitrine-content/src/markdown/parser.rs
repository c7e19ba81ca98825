//! Plain-text extraction from markdown.
//!
//! Used for post titles and excerpts when the frontmatter leaves them out,
//! and for word counts.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// Text of the first heading (any level), inline formatting removed.
pub fn first_heading(content: &str) -> Option<String> {
    let mut text = String::new();
    let mut inside = false;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                inside = true;
                text.clear();
            }
            Event::End(TagEnd::Heading(_)) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
                inside = false;
            }
            Event::Text(t) | Event::Code(t) if inside => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak if inside => text.push(' '),
            _ => {}
        }
    }
    None
}

/// Text of the first non-empty paragraph, truncated to `max_chars`
/// characters on a word boundary.
///
/// Paragraphs inside headings, lists, and block quotes are skipped; an
/// excerpt should come from body prose.
pub fn first_paragraph(content: &str, max_chars: usize) -> Option<String> {
    let mut text = String::new();
    let mut nesting = 0usize;
    let mut inside = false;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::List(_) | Tag::BlockQuote(_)) => nesting += 1,
            Event::End(TagEnd::List(_) | TagEnd::BlockQuote(_)) => {
                nesting = nesting.saturating_sub(1);
            }
            Event::Start(Tag::Paragraph) if nesting == 0 => {
                inside = true;
                text.clear();
            }
            Event::End(TagEnd::Paragraph) if inside => {
                let collapsed = collapse_whitespace(&text);
                if !collapsed.is_empty() {
                    return Some(truncate_chars(&collapsed, max_chars));
                }
                inside = false;
            }
            Event::Text(t) | Event::Code(t) if inside => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak if inside => text.push(' '),
            _ => {}
        }
    }
    None
}

/// All prose as one line of plain text. Code blocks are left out.
pub fn plain_text(content: &str) -> String {
    let mut text = String::new();
    let mut in_code = false;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code = true,
            Event::End(TagEnd::CodeBlock) => in_code = false,
            Event::Text(t) | Event::Code(t) if !in_code => text.push_str(&t),
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => text.push(' '),
            _ => {}
        }
    }
    collapse_whitespace(&text)
}

/// Number of whitespace-separated words of prose.
pub fn word_count(content: &str) -> usize {
    plain_text(content).split_whitespace().count()
}

/// Cut `text` to at most `max_chars` characters, backing off to the last
/// space and appending `...` when anything was removed.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let Some((cut, _)) = text.char_indices().nth(max_chars) else {
        return text.to_string();
    };
    let head = &text[..cut];
    let head = match head.rfind(char::is_whitespace) {
        Some(space) if space > 0 => &head[..space],
        _ => head,
    };
    format!("{}...", head.trim_end())
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ============================================================================
// Tests
// ============================================================================
