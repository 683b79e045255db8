//! RESP2 wire protocol building blocks.
//!
//! Chunked buffering of the inbound byte stream, an incremental decoder
//! that tolerates arbitrary TCP fragmentation, and the command encoder.
//! The [`Client`](crate::Client) drives these for you; they are public for
//! callers who want protocol access without the connection machinery.

mod chunk;
mod decode;
mod encode;

pub use chunk::ChunkQueue;
pub use decode::Decoder;
pub use encode::encode_command;
