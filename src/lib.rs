//! Convert between markdown text and block documents.
//!
//! A block document is an optional title plus an ordered list of headings,
//! list items, code blocks, paragraphs, quotes and to-dos. Only a small
//! subset of markdown is understood; inline formatting is kept as plain text.
//!
//! ```rust
//! use mdblocks::{Block, parse_markdown_to_document, serialize_document_to_markdown};
//!
//! let doc = parse_markdown_to_document("# Groceries\n- milk\n- eggs");
//! assert_eq!(doc.title, "Groceries");
//! assert_eq!(doc.blocks, vec![Block::bulleted("milk"), Block::bulleted("eggs")]);
//!
//! let markdown = serialize_document_to_markdown(&doc);
//! assert_eq!(markdown, "# Groceries\n\n- milk\n- eggs");
//! ```

mod block;
mod config;
mod error;
pub mod logging;
mod markdown;
mod parser;
pub mod wire;

pub use block::{Block, Document, HeadingLevel, TextRun};
pub use config::{BlocksConfig, CodeConfig, Config, UnsupportedPolicy};
pub use error::{Error, Result};
pub use markdown::{Rendered, SkippedBlock};

/// Parse markdown text into a document using the bundled config.
pub fn parse_markdown_to_document(markdown: &str) -> Document {
    parser::parse(markdown, &Config::compiled_default())
}

/// Parse markdown text into a document with custom config.
pub fn parse_markdown_with_config(markdown: &str, config: &Config) -> Document {
    parser::parse(markdown, config)
}

/// Convert a document to markdown. Blocks that cannot be rendered are
/// dropped and logged at debug level, ignoring any configured policy.
pub fn serialize_document_to_markdown(document: &Document) -> String {
    markdown::render_logged(document, UnsupportedPolicy::Skip).markdown
}

/// Convert a document to markdown, applying the config's policy for
/// unsupported blocks.
pub fn serialize_document_with_config(document: &Document, config: &Config) -> Result<String> {
    markdown::document_to_markdown(document, config.blocks.unsupported)
}

/// Convert a document to markdown and list every block that was left out.
pub fn serialize_document_with_report(document: &Document) -> Rendered {
    markdown::render(document)
}
