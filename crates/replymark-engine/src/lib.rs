pub mod parsing;
pub mod render;
pub mod stream;

// Re-export key types for easier usage
pub use parsing::blocks::{Block, Span};
pub use stream::{ChunkDecoder, ResponseStream};
