use xi_rope::{Rope, delta::Builder};

use crate::parsing::{blocks::Block, parse_buffer};

/// The stream accumulator: owns the growing reply text for one request and
/// the render tree built from it.
///
/// The buffer is append-only within a request. Every [`append`] re-runs the
/// full pipeline over the whole buffer and replaces the cached tree — a
/// deliberate whole-rebuild, not an incremental diff. Reply sizes are bounded
/// (model prose, tens of kilobytes at most) and the rebuild is what gives the
/// host its per-chunk "typing" redraw.
///
/// The transport may tear down mid-stream; nothing here assumes a terminal
/// chunk ever arrives. A partial buffer always renders a valid partial tree.
///
/// [`append`]: ResponseStream::append
#[derive(Debug, Clone)]
pub struct ResponseStream {
    buffer: Rope,
    generation: u64,
    blocks: Vec<Block>,
}

impl ResponseStream {
    pub fn new() -> Self {
        Self {
            buffer: Rope::from(""),
            generation: 0,
            blocks: Vec::new(),
        }
    }

    /// Starts a new request: clears the buffer and tree, bumps the
    /// generation so hosts can drop stale chunks from an abandoned stream.
    pub fn reset(&mut self) {
        self.buffer = Rope::from("");
        self.generation += 1;
        self.blocks.clear();
        log::debug!("stream reset, generation {}", self.generation);
    }

    /// Appends one received chunk and rebuilds the render tree.
    ///
    /// Chunk boundaries carry no meaning — mid-line, mid-`**`, any split is
    /// fine because the whole buffer is re-parsed from scratch.
    pub fn append(&mut self, chunk: &str) -> &[Block] {
        let len = self.buffer.len();
        let mut builder = Builder::new(len);
        builder.replace(len..len, Rope::from(chunk));
        self.buffer = builder.build().apply(&self.buffer);
        self.blocks = parse_buffer(&self.buffer);
        log::trace!(
            "append {}B -> buffer {}B, {} blocks",
            chunk.len(),
            self.buffer.len(),
            self.blocks.len()
        );
        &self.blocks
    }

    /// The current render tree.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The accumulated text so far.
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }
}

impl Default for ResponseStream {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_empty() {
        let stream = ResponseStream::new();
        assert!(stream.is_empty());
        assert!(stream.blocks().is_empty());
        assert_eq!(stream.generation(), 0);
    }

    #[test]
    fn append_accumulates_and_rebuilds() {
        let mut stream = ResponseStream::new();
        stream.append("## Ti");
        assert!(matches!(stream.blocks()[0], Block::Paragraph { .. } | Block::Heading { .. }));
        stream.append("tle\nbody");
        assert_eq!(stream.text(), "## Title\nbody");
        assert!(matches!(stream.blocks()[0], Block::Heading { level: 2, .. }));
        assert!(matches!(stream.blocks()[1], Block::Paragraph { .. }));
    }

    #[test]
    fn chunk_boundary_inside_marker_resolves_on_rebuild() {
        let mut stream = ResponseStream::new();
        stream.append("a *");
        stream.append("*b*");
        stream.append("* c");
        let one_shot = crate::parsing::parse_text("a **b** c");
        assert_eq!(stream.blocks(), &one_shot[..]);
    }

    #[test]
    fn reset_clears_and_bumps_generation() {
        let mut stream = ResponseStream::new();
        stream.append("some text");
        stream.reset();
        assert!(stream.is_empty());
        assert!(stream.blocks().is_empty());
        assert_eq!(stream.generation(), 1);
        stream.reset();
        assert_eq!(stream.generation(), 2);
    }

    #[test]
    fn truncated_table_renders_partial_rows() {
        let mut stream = ResponseStream::new();
        stream.append("|A|B|\n|---|---|\n|1|");
        assert_eq!(
            stream.blocks(),
            &[Block::Table {
                header: Some(vec!["A".into(), "B".into()]),
                rows: vec![vec!["1".into()]],
            }]
        );
    }

    #[test]
    fn tree_accessor_matches_last_append_result() {
        let mut stream = ResponseStream::new();
        let after_append = stream.append("* a\n* b").to_vec();
        assert_eq!(stream.blocks(), &after_append[..]);
    }
}
