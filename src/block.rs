/// A plain text fragment inside a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub content: String,
}

impl TextRun {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Heading depth. Level 1 only comes from stored block arrays; a `# ` line in
/// markdown is the document title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn marker(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "#",
            HeadingLevel::H2 => "##",
            HeadingLevel::H3 => "###",
        }
    }
}

/// Block-level content units of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: HeadingLevel,
        text: Vec<TextRun>,
    },
    BulletedListItem {
        text: Vec<TextRun>,
    },
    NumberedListItem {
        text: Vec<TextRun>,
    },
    /// Fenced code; `text` holds the lines between the fences as one run
    CodeBlock {
        language: String,
        text: Vec<TextRun>,
    },
    Paragraph {
        text: Vec<TextRun>,
    },
    ToDo {
        checked: bool,
        text: Vec<TextRun>,
    },
    Quote {
        text: Vec<TextRun>,
    },
    /// A stored block type this crate does not model, kept by its type tag
    Unsupported {
        kind: String,
    },
}

impl Block {
    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: vec![TextRun::new(text)],
        }
    }

    pub fn bulleted(text: impl Into<String>) -> Self {
        Block::BulletedListItem {
            text: vec![TextRun::new(text)],
        }
    }

    pub fn numbered(text: impl Into<String>) -> Self {
        Block::NumberedListItem {
            text: vec![TextRun::new(text)],
        }
    }

    pub fn code(language: impl Into<String>, text: impl Into<String>) -> Self {
        Block::CodeBlock {
            language: language.into(),
            text: vec![TextRun::new(text)],
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph {
            text: vec![TextRun::new(text)],
        }
    }

    pub fn to_do(checked: bool, text: impl Into<String>) -> Self {
        Block::ToDo {
            checked,
            text: vec![TextRun::new(text)],
        }
    }

    pub fn quote(text: impl Into<String>) -> Self {
        Block::Quote {
            text: vec![TextRun::new(text)],
        }
    }

    /// Text runs of this block, empty for unsupported blocks
    pub fn runs(&self) -> &[TextRun] {
        match self {
            Block::Heading { text, .. }
            | Block::BulletedListItem { text }
            | Block::NumberedListItem { text }
            | Block::CodeBlock { text, .. }
            | Block::Paragraph { text }
            | Block::ToDo { text, .. }
            | Block::Quote { text } => text,
            Block::Unsupported { .. } => &[],
        }
    }

    /// All run contents concatenated with no separator.
    pub fn plain_text(&self) -> String {
        self.runs().iter().map(|run| run.content.as_str()).collect()
    }

    /// List-like blocks are not followed by a blank line when serialized
    pub fn is_list_like(&self) -> bool {
        matches!(
            self,
            Block::BulletedListItem { .. } | Block::NumberedListItem { .. }
        )
    }
}

/// An optional title plus the ordered blocks below it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(title: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            title: title.into(),
            blocks,
        }
    }
}
