//! Markdown handling: frontmatter, text extraction, block conversion.

pub mod blocks;
pub mod frontmatter;
pub mod parser;

pub use blocks::markdown_to_blocks;
pub use frontmatter::{split_frontmatter, Frontmatter};
pub use parser::{first_heading, first_paragraph, plain_text, truncate_chars, word_count};
