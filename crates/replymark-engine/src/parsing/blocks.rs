use serde::Serialize;

/// One run of inline text within a line.
///
/// Rebuilt from scratch on every render pass; spans own their text and carry
/// no positions into the underlying buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Span {
    /// Plain text.
    Text(String),
    /// A `**`-delimited emphasis run, markers stripped.
    Bold(String),
}

impl Span {
    /// The span's text content, ignoring emphasis.
    pub fn text(&self) -> &str {
        match self {
            Span::Text(s) | Span::Bold(s) => s,
        }
    }
}

/// One structural unit of the render tree.
///
/// This enum is the whole contract with the presentation layer: hosts map
/// each variant 1:1 to a visual element. The ordered `Vec<Block>` produced by
/// a render pass is a pure function of the current buffer text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Block {
    /// Horizontal rule (a line that is exactly `---`).
    Rule,
    /// Heading, level 2 or 3 only.
    Heading { level: u8, spans: Vec<Span> },
    /// A run of consecutive `* ` lines, one inner vec per item.
    List { items: Vec<Vec<Span>> },
    /// A single `> ` line. Consecutive quote lines stay separate blocks.
    Blockquote { spans: Vec<Span> },
    /// A run of 2+ consecutive `|` lines. Cells are raw trimmed strings;
    /// `header` is present when row 1 was a `---` separator row.
    Table {
        header: Option<Vec<String>>,
        rows: Vec<Vec<String>>,
    },
    /// A blank line that survived suppression.
    Spacer,
    /// Fallback for any other line.
    Paragraph { spans: Vec<Span> },
}
