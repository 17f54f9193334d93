pub mod decoder;
pub mod response;

pub use decoder::ChunkDecoder;
pub use response::ResponseStream;
