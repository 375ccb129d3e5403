use crate::block::{Block, Document};
use crate::config::UnsupportedPolicy;
use crate::error::{Error, Result};

/// A block left out of the markdown output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBlock {
    pub index: usize,
    pub kind: String,
}

impl From<SkippedBlock> for Error {
    fn from(skipped: SkippedBlock) -> Self {
        Error::UnsupportedBlock {
            index: skipped.index,
            kind: skipped.kind,
        }
    }
}

/// Markdown output together with the blocks that could not be rendered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub markdown: String,
    pub skipped: Vec<SkippedBlock>,
}

/// Render a document, recording unsupported blocks instead of failing.
pub fn render(document: &Document) -> Rendered {
    let mut lines: Vec<String> = Vec::new();
    let mut skipped = Vec::new();

    if !document.title.is_empty() {
        lines.push(format!("# {}", document.title));
        lines.push(String::new());
    }

    let mut in_list = false;
    for (index, block) in document.blocks.iter().enumerate() {
        if let Block::Unsupported { kind } = block {
            skipped.push(SkippedBlock {
                index,
                kind: kind.clone(),
            });
            continue;
        }

        // Close a list group so the next block is not read as part of it
        if in_list && !block.is_list_like() {
            lines.push(String::new());
        }
        emit_block(block, &mut lines);
        in_list = block.is_list_like();
    }

    Rendered {
        markdown: lines.join("\n"),
        skipped,
    }
}

/// Render a document and log each skipped block at the level `policy` asks
/// for: debug for `Skip`, warn otherwise.
pub fn render_logged(document: &Document, policy: UnsupportedPolicy) -> Rendered {
    let rendered = render(document);

    for skipped in &rendered.skipped {
        match policy {
            UnsupportedPolicy::Skip => {
                tracing::debug!(index = skipped.index, kind = %skipped.kind, "skipping unsupported block");
            }
            UnsupportedPolicy::Warn | UnsupportedPolicy::Error => {
                tracing::warn!(index = skipped.index, kind = %skipped.kind, "skipping unsupported block");
            }
        }
    }

    rendered
}

/// Convert a document to markdown, handling unsupported blocks per `policy`.
///
/// With [`UnsupportedPolicy::Error`] the whole document is still walked and
/// the first unsupported block is returned.
pub fn document_to_markdown(document: &Document, policy: UnsupportedPolicy) -> Result<String> {
    let rendered = render_logged(document, policy);

    if policy == UnsupportedPolicy::Error {
        if let Some(first) = rendered.skipped.into_iter().next() {
            return Err(first.into());
        }
    }

    tracing::debug!(
        blocks = document.blocks.len(),
        bytes = rendered.markdown.len(),
        "serialized document"
    );
    Ok(rendered.markdown)
}

fn emit_block(block: &Block, lines: &mut Vec<String>) {
    let text = block.plain_text();

    match block {
        Block::Heading { level, .. } => {
            lines.push(format!("{} {}", level.marker(), text));
        }
        Block::BulletedListItem { .. } => {
            lines.push(format!("- {}", text));
        }
        // Ordinals are not tracked; markdown renderers renumber
        Block::NumberedListItem { .. } => {
            lines.push(format!("1. {}", text));
        }
        Block::CodeBlock { language, .. } => {
            lines.push(format!("```{}", language));
            lines.push(text);
            lines.push("```".to_string());
        }
        Block::Paragraph { .. } => {
            lines.push(text);
        }
        Block::ToDo { checked, .. } => {
            let checkbox = if *checked { "[x]" } else { "[ ]" };
            lines.push(format!("- {} {}", checkbox, text));
        }
        Block::Quote { .. } => {
            lines.push(format!("> {}", text));
        }
        Block::Unsupported { .. } => return,
    }

    if !block.is_list_like() {
        lines.push(String::new());
    }
}
