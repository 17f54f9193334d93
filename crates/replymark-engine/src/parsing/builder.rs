use super::{
    blocks::{Block, Span},
    classify::LineKind,
    inline::parse_inline,
};

/// Builds the ordered render tree from classified lines.
///
/// One top-to-bottom pass: push every line's [`LineKind`] in order, then call
/// [`finish`](TreeBuilder::finish). Run state (an open list or table) is
/// flushed exactly once, at the line where the run ends — including end of
/// input, so a truncated stream renders whatever rows and items have arrived.
///
/// Blank handling is asymmetric and deliberate: a blank directly after a
/// level-2/3 heading is dropped, as is a blank directly before a list item.
/// Every other blank becomes a [`Block::Spacer`]. Dropped blanks are consumed
/// entirely, so a run of blanks after a heading all disappear.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    out: Vec<Block>,
    list_run: Vec<Vec<Span>>,
    table_run: Vec<String>,
    // True while the most recent non-consumed line was a heading.
    after_heading: bool,
    // A blank waiting to learn whether a list item follows it.
    pending_blank: bool,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: LineKind) {
        if let LineKind::Blank = kind {
            self.flush_runs();
            if self.after_heading {
                // Consumed; the heading still counts as the preceding line
                // for any further blanks.
                return;
            }
            if self.pending_blank {
                // The earlier blank's follower turned out to be another
                // blank, so it renders.
                self.out.push(Block::Spacer);
            }
            self.pending_blank = true;
            return;
        }

        if self.pending_blank {
            if !matches!(kind, LineKind::ListItem { .. }) {
                self.out.push(Block::Spacer);
            }
            self.pending_blank = false;
        }
        self.after_heading = false;

        match kind {
            LineKind::Blank => unreachable!("handled above"),
            LineKind::Rule => {
                self.flush_runs();
                self.out.push(Block::Rule);
            }
            LineKind::Heading { level, text } => {
                self.flush_runs();
                self.out.push(Block::Heading {
                    level,
                    spans: parse_inline(&text),
                });
                self.after_heading = true;
            }
            LineKind::ListItem { text } => {
                self.flush_table();
                self.list_run.push(parse_inline(&text));
            }
            LineKind::Quote { text } => {
                self.flush_runs();
                self.out.push(Block::Blockquote {
                    spans: parse_inline(&text),
                });
            }
            LineKind::TableRow { raw } => {
                self.flush_list();
                self.table_run.push(raw);
            }
            LineKind::Text { text } => {
                self.flush_runs();
                self.out.push(Block::Paragraph {
                    spans: parse_inline(&text),
                });
            }
        }
    }

    /// EOF flush: close any open run and resolve a trailing blank.
    pub fn finish(mut self) -> Vec<Block> {
        self.flush_runs();
        if self.pending_blank {
            self.out.push(Block::Spacer);
        }
        self.out
    }

    fn flush_runs(&mut self) {
        self.flush_list();
        self.flush_table();
    }

    fn flush_list(&mut self) {
        if self.list_run.is_empty() {
            return;
        }
        let items = std::mem::take(&mut self.list_run);
        self.out.push(Block::List { items });
    }

    fn flush_table(&mut self) {
        if self.table_run.is_empty() {
            return;
        }
        let raw_rows = std::mem::take(&mut self.table_run);
        self.out.push(assemble_table(raw_rows));
    }
}

/// Turns a contiguous run of `|` lines into a table.
///
/// A run shorter than 2 rows cannot carry a header candidate plus data, so it
/// degrades to a paragraph of the raw line. Row 1 acts as the separator when
/// every one of its cells is hyphens/whitespace only (empty cells pass); cell
/// counts are never enforced across rows.
fn assemble_table(raw_rows: Vec<String>) -> Block {
    if raw_rows.len() < 2 {
        // raw_rows is non-empty: flush_table returns early on an empty run.
        return Block::Paragraph {
            spans: parse_inline(&raw_rows[0]),
        };
    }

    let mut rows: Vec<Vec<String>> = raw_rows.iter().map(|r| split_row(r)).collect();

    let has_separator = rows[1]
        .iter()
        .all(|cell| cell.chars().all(|c| c == '-' || c.is_whitespace()));

    if has_separator {
        let mut iter = rows.drain(..);
        let header = iter.next();
        iter.next(); // drop the separator row
        let body = iter.collect();
        Block::Table {
            header,
            rows: body,
        }
    } else {
        Block::Table { header: None, rows }
    }
}

/// Splits a raw `|` row into trimmed cells, dropping only the empty pieces
/// produced by the edge delimiters. Interior empty cells survive.
fn split_row(raw: &str) -> Vec<String> {
    let mut cells: Vec<String> = raw.split('|').map(|c| c.trim().to_string()).collect();
    if cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}
