//! Static site content for Vitrine.
//!
//! Blog posts (markdown with YAML frontmatter), projects, and learning
//! modules. Content is loaded once into a [`ContentLibrary`] and passed to
//! whatever renders it; nothing here knows about pages or routing.
//!
//! # Example
//!
//! ```rust
//! use vitrine_content::{BlogPost, ContentBlock, ContentLibrary};
//!
//! let post = BlogPost::from_markdown(
//!     "hello",
//!     "---\ntitle: Hello\ndate: 2024-01-01\n---\n\nFirst post.\n\n- one\n- two\n",
//! )?;
//! assert_eq!(post.summary, "First post.");
//! assert_eq!(post.blocks()[1], ContentBlock::info(None, ["one", "two"]));
//!
//! let library = ContentLibrary::from_parts(vec![post], Vec::new(), Vec::new());
//! assert_eq!(library.post("hello")?.title, "Hello");
//! # Ok::<(), vitrine_core::Error>(())
//! ```

#![forbid(unsafe_code)]

mod keys;
pub mod learning;
pub mod library;
pub mod markdown;
pub mod post;
pub mod project;

// Re-exports
pub use learning::{ContentBlock, LearningModule, LearningSection};
pub use library::{ContentConfig, ContentLibrary};
pub use markdown::{markdown_to_blocks, split_frontmatter, Frontmatter};
pub use post::{by_date_desc, post_sorts, BlogPost};
pub use project::{parse_projects, Project};
