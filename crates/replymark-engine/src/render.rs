//! Plain-text projection of a render tree.
//!
//! One output line per rendered row, markers re-printed. Used by the cli's
//! `--dump` mode and by the fixture snapshot tests; the styled terminal view
//! lives in the cli.

use crate::parsing::blocks::{Block, Span};

/// Renders the block sequence back to markup-shaped text.
pub fn to_text(blocks: &[Block]) -> String {
    let mut lines: Vec<String> = Vec::new();

    for block in blocks {
        match block {
            Block::Rule => lines.push("---".to_string()),
            Block::Heading { level, spans } => {
                let marker = "#".repeat(*level as usize);
                lines.push(format!("{} {}", marker, spans_to_text(spans)));
            }
            Block::List { items } => {
                for item in items {
                    lines.push(format!("* {}", spans_to_text(item)));
                }
            }
            Block::Blockquote { spans } => {
                lines.push(format!("> {}", spans_to_text(spans)));
            }
            Block::Table { header, rows } => {
                if let Some(cells) = header {
                    lines.push(render_row(cells));
                    let dashes: Vec<String> =
                        cells.iter().map(|_| "---".to_string()).collect();
                    lines.push(render_row(&dashes));
                }
                for row in rows {
                    lines.push(render_row(row));
                }
            }
            Block::Spacer => lines.push(String::new()),
            Block::Paragraph { spans } => lines.push(spans_to_text(spans)),
        }
    }

    lines.join("\n")
}

fn render_row(cells: &[String]) -> String {
    if cells.is_empty() {
        return "|".to_string();
    }
    format!("| {} |", cells.join(" | "))
}

/// Flattens spans, re-wrapping bold runs in their markers.
pub fn spans_to_text(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Span::Text(s) => out.push_str(s),
            Span::Bold(s) => {
                out.push_str("**");
                out.push_str(s);
                out.push_str("**");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_text;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_each_variant() {
        let tree = parse_text("## T\n\n* a **b**\n\n|A|B|\n|---|---|\n|1|2|\n\n> q\n\n---");
        assert_eq!(
            to_text(&tree),
            "## T\n* a **b**\n\n| A | B |\n| --- | --- |\n| 1 | 2 |\n\n> q\n\n---"
        );
    }

    #[test]
    fn spacer_is_an_empty_line() {
        let tree = parse_text("a\n\nb");
        assert_eq!(to_text(&tree), "a\n\nb");
    }

    #[test]
    fn bold_markers_round_trip() {
        let tree = parse_text("a **b** c");
        assert_eq!(to_text(&tree), "a **b** c");
    }
}
