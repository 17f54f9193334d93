/// Incremental UTF-8 decoder for transport chunks.
///
/// The transport slices bytes with no regard for character boundaries, so a
/// chunk may end mid-sequence. `push` returns everything decodable now and
/// carries an incomplete trailing sequence into the next call; invalid bytes
/// decode to U+FFFD rather than failing, keeping the whole path total.
#[derive(Debug, Default)]
pub struct ChunkDecoder {
    // At most 3 bytes: the incomplete tail of the previous chunk.
    carry: Vec<u8>,
}

impl ChunkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `bytes` (prefixed by any carried tail) into text.
    pub fn push(&mut self, bytes: &[u8]) -> String {
        self.carry.extend_from_slice(bytes);
        let buf = std::mem::take(&mut self.carry);

        let mut out = String::with_capacity(buf.len());
        let mut rest: &[u8] = &buf;
        loop {
            match std::str::from_utf8(rest) {
                Ok(s) => {
                    out.push_str(s);
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        // Garbage in the middle: substitute and move on.
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[bad..];
                        }
                        // Truncated sequence at the end: hold it for the
                        // next chunk.
                        None => {
                            self.carry = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Stream teardown: a still-dangling tail can never complete, so it
    /// decodes to a single U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.carry.is_empty() {
            String::new()
        } else {
            self.carry.clear();
            char::REPLACEMENT_CHARACTER.to_string()
        }
    }
}
