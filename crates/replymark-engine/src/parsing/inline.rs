use std::sync::LazyLock;

use regex::Regex;

use super::blocks::Span;

// A `**`-delimited run, non-greedy. `.*?` admits the empty run, so `****`
// parses as an empty Bold (4 bytes are the markers themselves).
static BOLD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*.*?\*\*").expect("invalid bold pattern"));

/// Splits one line into plain and bold spans.
///
/// Text between matches becomes [`Span::Text`]; each match becomes
/// [`Span::Bold`] with the markers stripped. A line with no closed `**` pair
/// comes back as a single plain span with any literal asterisks retained.
/// Literal `**` cannot be escaped; that is a documented limitation of the
/// format, not something to paper over here.
pub fn parse_inline(line: &str) -> Vec<Span> {
    let mut out = Vec::new();
    let mut rest_start = 0;

    for m in BOLD_RUN.find_iter(line) {
        if m.start() > rest_start {
            out.push(Span::Text(line[rest_start..m.start()].to_string()));
        }
        out.push(Span::Bold(line[m.start() + 2..m.end() - 2].to_string()));
        rest_start = m.end();
    }

    if rest_start < line.len() || out.is_empty() {
        out.push(Span::Text(line[rest_start..].to_string()));
    }
    out
}
