//! Buffered RESP I/O over a duplex byte stream.
//!
//! The connection owns the stream exclusively. Each command is encoded
//! into a reusable write buffer and flushed in one burst, so a multi-part
//! command never trickles onto the wire. Reads pull whatever the
//! transport delivers and hand it to the decoder chunk by chunk.

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{Error, Result};
use crate::resp::{encode_command, Decoder};
use crate::types::{Arg, Value};

/// Object-safe alias for the duplex streams a connection can drive.
pub(crate) trait ByteStream: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T: AsyncRead + AsyncWrite + Unpin + Send> ByteStream for T {}

/// A duplex byte stream with buffered RESP encode/decode.
pub(crate) struct Connection {
    stream: Box<dyn ByteStream>,
    decoder: Decoder,
    write_buf: BytesMut,
    read_chunk_size: usize,
}

impl Connection {
    /// Wraps an already-connected stream. `read_chunk_size` bounds each
    /// read; it tunes allocation behavior only.
    pub fn new(stream: Box<dyn ByteStream>, read_chunk_size: usize) -> Self {
        Self {
            stream,
            decoder: Decoder::new(),
            write_buf: BytesMut::with_capacity(read_chunk_size),
            read_chunk_size,
        }
    }

    /// Writes one command and flushes once.
    pub async fn write_command(&mut self, args: &[Arg], inline: bool) -> Result<()> {
        self.write_buf.clear();
        encode_command(args, inline, &mut self.write_buf);
        self.stream.write_all(&self.write_buf).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Reads the next complete reply, pulling from the stream as needed.
    ///
    /// EOF before a complete reply is a transport failure.
    pub async fn read_reply(&mut self) -> Result<Value> {
        loop {
            if let Some(value) = self.decoder.next_value()? {
                return Ok(value);
            }

            let mut chunk = BytesMut::with_capacity(self.read_chunk_size);
            let n = self.stream.read_buf(&mut chunk).await?;
            if n == 0 {
                return Err(Error::ConnectionClosed);
            }
            self.decoder.feed(chunk.freeze())?;
        }
    }

    /// Half-closes the write side of the stream.
    pub async fn shutdown(&mut self) -> Result<()> {
        self.stream.shutdown().await?;
        Ok(())
    }
}
