//! Streaming RESP2 decoder.
//!
//! Decoding runs in two stages. The tokenizer turns the chunk queue into
//! CRLF-terminated lines and length-counted bulk payloads, surviving any
//! fragmentation the transport produces. Assembly then dispatches tokens on
//! their type byte and folds array elements through an explicit frame
//! stack, so a nested reply completes without recursion.

use bytes::Bytes;
use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::resp::chunk::ChunkQueue;
use crate::types::Value;

const CRLF: &[u8] = b"\r\n";

/// One unit of tokenized input.
#[derive(Debug)]
enum Token {
    /// A full line, CRLF stripped. The first byte is the frame type.
    Line(Bytes),
    /// The payload of a bulk string, trailing CRLF consumed.
    Bulk(Bytes),
    /// A `$-1` null bulk string.
    NullBulk,
}

/// Tokenizer position within the byte stream.
#[derive(Debug)]
enum ScanState {
    /// Scanning for the next CRLF-terminated line.
    Line,
    /// Collecting this many bulk payload bytes plus the trailing CRLF.
    Bulk(usize),
}

/// An array whose elements are still being collected.
#[derive(Debug)]
struct ArrayFrame {
    expected: usize,
    items: Vec<Value>,
}

/// Incremental RESP2 decoder.
///
/// Feed it chunks as they arrive; ask it for complete replies. A decoder
/// that has returned an error must be discarded, the stream position is no
/// longer trustworthy.
///
/// # Examples
/// ```
/// # use respite::resp::Decoder;
/// # use respite::Value;
/// let mut decoder = Decoder::new();
/// decoder.feed(bytes::Bytes::from_static(b"+OK\r\n:4")).unwrap();
/// assert_eq!(decoder.next_value().unwrap(), Some(Value::Simple("OK".into())));
/// assert_eq!(decoder.next_value().unwrap(), None);
/// decoder.feed(bytes::Bytes::from_static(b"2\r\n")).unwrap();
/// assert_eq!(decoder.next_value().unwrap(), Some(Value::Integer(42)));
/// ```
#[derive(Debug, Default)]
pub struct Decoder {
    queue: ChunkQueue,
    state: ScanState,
    tokens: VecDeque<Token>,
    frames: Vec<ArrayFrame>,
}

impl Default for ScanState {
    fn default() -> Self {
        ScanState::Line
    }
}

impl Decoder {
    /// Creates an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes buffered but not yet tokenized.
    pub fn buffered(&self) -> usize {
        self.queue.len()
    }

    /// Appends an incoming chunk and tokenizes as far as the data allows.
    ///
    /// Never blocks. Errors indicate a framing violation.
    pub fn feed(&mut self, chunk: Bytes) -> Result<()> {
        self.queue.push(chunk);
        self.tokenize()
    }

    fn tokenize(&mut self) -> Result<()> {
        loop {
            match self.state {
                ScanState::Line => {
                    let Some(at) = self.queue.index_of(CRLF) else {
                        return Ok(());
                    };
                    let line = self.queue.take(at);
                    self.queue.take(CRLF.len());
                    if line.first() == Some(&b'$') {
                        let declared = parse_int(&line[1..])?;
                        if declared == -1 {
                            self.tokens.push_back(Token::NullBulk);
                        } else if declared < 0 {
                            return Err(Error::Protocol(format!(
                                "negative bulk string length {declared}"
                            )));
                        } else {
                            self.state = ScanState::Bulk(declared as usize);
                        }
                    } else {
                        self.tokens.push_back(Token::Line(line));
                    }
                }
                ScanState::Bulk(len) => {
                    if self.queue.len() < len + CRLF.len() {
                        return Ok(());
                    }
                    let payload = self.queue.take(len);
                    let tail = self.queue.take(CRLF.len());
                    if tail[..] != *CRLF {
                        return Err(Error::Protocol(
                            "bulk payload not terminated by CRLF".into(),
                        ));
                    }
                    self.tokens.push_back(Token::Bulk(payload));
                    self.state = ScanState::Line;
                }
            }
        }
    }

    /// Assembles the next complete top-level reply, if the buffered tokens
    /// amount to one.
    pub fn next_value(&mut self) -> Result<Option<Value>> {
        while let Some(token) = self.tokens.pop_front() {
            let value = match token {
                Token::NullBulk => Value::Null,
                Token::Bulk(payload) => Value::Bulk(payload),
                Token::Line(line) => match line.split_first() {
                    Some((&b'+', rest)) => Value::Simple(line_text(rest)?),
                    Some((&b'-', rest)) => Value::Error(line_text(rest)?),
                    Some((&b':', rest)) => Value::Integer(parse_int(rest)?),
                    Some((&b'*', rest)) => {
                        let count = parse_int(rest)?;
                        if count == -1 {
                            Value::Null
                        } else if count < 0 {
                            return Err(Error::Protocol(format!(
                                "negative array length {count}"
                            )));
                        } else if count == 0 {
                            Value::Array(Vec::new())
                        } else {
                            self.frames.push(ArrayFrame {
                                expected: count as usize,
                                items: Vec::with_capacity(count as usize),
                            });
                            continue;
                        }
                    }
                    Some((&byte, _)) => {
                        return Err(Error::Protocol(format!(
                            "unexpected reply type byte 0x{byte:02x}"
                        )))
                    }
                    None => return Err(Error::Protocol("empty reply line".into())),
                },
            };
            if let Some(done) = self.close_frames(value) {
                return Ok(Some(done));
            }
        }
        Ok(None)
    }

    /// Folds a completed element into the enclosing arrays. Returns the
    /// value once it is a complete top-level reply.
    fn close_frames(&mut self, mut value: Value) -> Option<Value> {
        while let Some(frame) = self.frames.last_mut() {
            frame.items.push(value);
            if frame.items.len() < frame.expected {
                return None;
            }
            let frame = self.frames.pop().expect("frame present");
            value = Value::Array(frame.items);
        }
        Some(value)
    }
}

fn parse_int(digits: &[u8]) -> Result<i64> {
    let text = std::str::from_utf8(digits)
        .map_err(|_| Error::Protocol("non-ASCII integer field".into()))?;
    text.parse()
        .map_err(|_| Error::Protocol(format!("invalid integer field {text:?}")))
}

fn line_text(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| Error::Protocol(format!("invalid UTF-8 in reply line: {}", e)))
}
