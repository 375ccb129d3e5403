use crate::block::{Block, Document, HeadingLevel, TextRun};
use crate::config::Config;

const FENCE: &str = "```";

/// Parse markdown text into a titled list of blocks.
///
/// Never fails: anything not recognised becomes a paragraph.
pub fn parse(markdown: &str, config: &Config) -> Document {
    let lines: Vec<&str> = markdown.trim().split('\n').collect();
    let (title, body_start) = find_title(&lines);

    let mut blocks = Vec::new();
    let mut i = body_start;
    while i < lines.len() {
        let line = lines[i];

        if line.starts_with(FENCE) {
            let (block, consumed) = read_fence(&lines[i..], config);
            blocks.push(block);
            i += consumed;
            continue;
        }

        if let Some(block) = classify_line(line) {
            blocks.push(block);
        }
        i += 1;
    }

    tracing::debug!(title = %title, blocks = blocks.len(), "parsed markdown");
    Document { title, blocks }
}

/// Locate the first `# ` line. Returns the title and the index where the
/// body starts; lines above the title are dropped.
fn find_title(lines: &[&str]) -> (String, usize) {
    lines
        .iter()
        .enumerate()
        .find_map(|(i, line)| {
            line.strip_prefix("# ")
                .map(|rest| (rest.trim().to_string(), i + 1))
        })
        .unwrap_or_default()
}

/// Classify a single non-fence line. Blank lines produce nothing.
fn classify_line(line: &str) -> Option<Block> {
    if let Some(rest) = line.strip_prefix("## ") {
        return Some(Block::Heading {
            level: HeadingLevel::H2,
            text: single_run(rest.trim()),
        });
    }
    if let Some(rest) = line.strip_prefix("### ") {
        return Some(Block::Heading {
            level: HeadingLevel::H3,
            text: single_run(rest.trim()),
        });
    }
    if let Some(rest) = line.strip_prefix("- ") {
        return Some(Block::BulletedListItem {
            text: single_run(rest.trim()),
        });
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Loose on purpose: a leading digit plus any later ". " counts as a
    // numbered item, e.g. "2024 plans. Draft" becomes "Draft".
    if line.starts_with(|c: char| c.is_ascii_digit()) {
        if let Some((_, content)) = line.split_once(". ") {
            return Some(Block::NumberedListItem {
                text: single_run(content.trim()),
            });
        }
    }

    Some(Block::Paragraph {
        text: single_run(trimmed),
    })
}

/// Read a fenced code block starting at `lines[0]`. Returns the block and
/// the number of lines consumed, including both fences. An unterminated
/// fence runs to the end of input.
fn read_fence(lines: &[&str], config: &Config) -> (Block, usize) {
    let language = lines[0][FENCE.len()..].trim();
    let language = if language.is_empty() {
        config.code.default_language.clone()
    } else {
        language.to_string()
    };

    let body: Vec<&str> = lines[1..]
        .iter()
        .take_while(|line| !line.starts_with(FENCE))
        .copied()
        .collect();

    let closed = body.len() + 1 < lines.len();
    if !closed {
        tracing::debug!(language = %language, "unterminated code fence");
    }
    let consumed = 1 + body.len() + usize::from(closed);

    let block = Block::CodeBlock {
        language,
        text: single_run(&body.join("\n")),
    };
    (block, consumed)
}

fn single_run(content: &str) -> Vec<TextRun> {
    vec![TextRun::new(content)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse_default(markdown: &str) -> Document {
        parse(markdown, &Config::default())
    }

    #[test]
    fn test_title_and_body() {
        let doc = parse_default("# Hello\nBody");
        assert_eq!(doc.title, "Hello");
        assert_eq!(doc.blocks, vec![Block::paragraph("Body")]);
    }

    #[test]
    fn test_lines_before_title_are_dropped() {
        let doc = parse_default("intro\n- item\n#  Title  \nafter");
        assert_eq!(doc.title, "Title");
        assert_eq!(doc.blocks, vec![Block::paragraph("after")]);
    }

    #[test]
    fn test_no_title_scans_from_top() {
        let doc = parse_default("first\n\nsecond");
        assert_eq!(doc.title, "");
        assert_eq!(
            doc.blocks,
            vec![Block::paragraph("first"), Block::paragraph("second")]
        );
    }

    #[test]
    fn test_second_h1_is_a_paragraph() {
        let doc = parse_default("# One\n# Two");
        assert_eq!(doc.title, "One");
        assert_eq!(doc.blocks, vec![Block::paragraph("# Two")]);
    }

    #[test]
    fn test_headings() {
        let doc = parse_default("##  Section \n### Sub");
        assert_eq!(
            doc.blocks,
            vec![
                Block::heading(HeadingLevel::H2, "Section"),
                Block::heading(HeadingLevel::H3, "Sub"),
            ]
        );
    }

    #[test]
    fn test_heading_marker_needs_space() {
        let doc = parse_default("##NoSpace");
        assert_eq!(doc.blocks, vec![Block::paragraph("##NoSpace")]);
    }

    #[test]
    fn test_bullets_are_trimmed() {
        let doc = parse_default("-  spaced  \n- plain");
        assert_eq!(
            doc.blocks,
            vec![Block::bulleted("spaced"), Block::bulleted("plain")]
        );
    }

    #[test]
    fn test_numbered_item() {
        let doc = parse_default("3. Buy milk");
        assert_eq!(doc.blocks, vec![Block::numbered("Buy milk")]);
    }

    #[test]
    fn test_numbered_heuristic_uses_first_separator() {
        let doc = parse_default("10 items. see 2. below");
        assert_eq!(doc.blocks, vec![Block::numbered("see 2. below")]);
    }

    #[test]
    fn test_digit_not_first_is_paragraph() {
        let doc = parse_default("A1. note");
        assert_eq!(doc.blocks, vec![Block::paragraph("A1. note")]);
    }

    #[test]
    fn test_digit_without_separator_is_paragraph() {
        let doc = parse_default("42 is the answer");
        assert_eq!(doc.blocks, vec![Block::paragraph("42 is the answer")]);
    }

    #[test]
    fn test_code_fence() {
        let doc = parse_default("```python\nprint(1)\nprint(2)\n```");
        assert_eq!(doc.blocks, vec![Block::code("python", "print(1)\nprint(2)")]);
    }

    #[test]
    fn test_code_fence_keeps_indentation_and_blank_lines() {
        let doc = parse_default("```rust\nfn main() {\n\n    run();\n}\n```\nafter");
        assert_eq!(
            doc.blocks,
            vec![
                Block::code("rust", "fn main() {\n\n    run();\n}"),
                Block::paragraph("after"),
            ]
        );
    }

    #[test]
    fn test_code_fence_body_is_not_classified() {
        let doc = parse_default("```\n## not a heading\n- not a bullet\n```");
        assert_eq!(
            doc.blocks,
            vec![Block::code("plain text", "## not a heading\n- not a bullet")]
        );
    }

    #[test]
    fn test_unterminated_fence() {
        let doc = parse_default("```js\nfoo");
        assert_eq!(doc.blocks, vec![Block::code("js", "foo")]);
    }

    #[test]
    fn test_fence_at_end_of_input() {
        let doc = parse_default("text\n```");
        assert_eq!(
            doc.blocks,
            vec![Block::paragraph("text"), Block::code("plain text", "")]
        );
    }

    #[test]
    fn test_default_language_from_config() {
        let mut config = Config::default();
        config.code.default_language = "text".to_string();
        let doc = parse("```\nx\n```", &config);
        assert_eq!(doc.blocks, vec![Block::code("text", "x")]);
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(parse_default(""), Document::default());
        assert_eq!(parse_default("\n\n\n"), Document::default());
        assert_eq!(parse_default("   \n\t\n"), Document::default());
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let doc = parse_default("\n\n   # Title\n\ntext\n\n");
        assert_eq!(doc.title, "Title");
        assert_eq!(doc.blocks, vec![Block::paragraph("text")]);
    }

    #[test]
    fn test_indented_bullet_is_paragraph() {
        let doc = parse_default("intro\n  - nested");
        assert_eq!(
            doc.blocks,
            vec![Block::paragraph("intro"), Block::paragraph("- nested")]
        );
    }
}
