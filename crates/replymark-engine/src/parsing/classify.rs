/// Classification of a single line containing only local facts.
///
/// This is phase 1 of a render pass: each line is classified independently
/// of its neighbors. Run merging (lists, tables) and blank suppression need
/// context and belong to the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Exactly `---` after trimming.
    Rule,
    /// `## ` or `### ` prefix; `text` is what follows the prefix.
    Heading { level: u8, text: String },
    /// `* ` prefix, stripped.
    ListItem { text: String },
    /// `> ` prefix, stripped.
    Quote { text: String },
    /// Leading `|`; kept raw for the table assembler.
    TableRow { raw: String },
    /// Empty after trimming.
    Blank,
    /// Anything else.
    Text { text: String },
}

/// Classifies one raw line, checking markers in precedence order against the
/// whitespace-trimmed line.
pub fn classify(line: &str) -> LineKind {
    let trimmed = line.trim();

    if trimmed == "---" {
        return LineKind::Rule;
    }
    if let Some(rest) = trimmed.strip_prefix("## ") {
        return LineKind::Heading {
            level: 2,
            text: rest.to_string(),
        };
    }
    if let Some(rest) = trimmed.strip_prefix("### ") {
        return LineKind::Heading {
            level: 3,
            text: rest.to_string(),
        };
    }
    if let Some(rest) = trimmed.strip_prefix("* ") {
        return LineKind::ListItem {
            text: rest.to_string(),
        };
    }
    if let Some(rest) = trimmed.strip_prefix("> ") {
        return LineKind::Quote {
            text: rest.to_string(),
        };
    }
    if trimmed.starts_with('|') {
        return LineKind::TableRow {
            raw: trimmed.to_string(),
        };
    }
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    LineKind::Text {
        text: trimmed.to_string(),
    }
}
