pub mod blocks;
pub mod builder;
pub mod classify;
pub mod inline;

use xi_rope::Rope;

use blocks::Block;
use builder::TreeBuilder;
use classify::classify;

/// Runs the whole render pipeline over a buffer: split to lines, classify,
/// assemble runs, build the ordered tree.
///
/// Stateless from scratch every time; the result is a pure function of the
/// input text. Total over arbitrary input — malformed markup degrades to
/// plain paragraphs instead of erroring.
pub fn parse_text(text: &str) -> Vec<Block> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut builder = TreeBuilder::new();
    for line in text.split('\n') {
        builder.push(classify(line));
    }
    builder.finish()
}

/// Convenience for rope-backed buffers; stringifies and delegates.
pub fn parse_buffer(rope: &Rope) -> Vec<Block> {
    parse_text(&rope.to_string())
}
