//! # respite — asynchronous RESP client
//!
//! An async, pipelined Rust client for Redis-compatible key-value servers,
//! speaking the RESP2 wire protocol over a single persistent connection.
//!
//! ## Features
//!
//! - **Async-first** — built on Tokio; commands are plain awaitables
//! - **Pipelined** — submissions queue behind in-flight commands and
//!   complete in strict submission order
//! - **Streaming decoder** — tolerates arbitrary TCP fragmentation,
//!   including multi-megabyte bulk payloads split across chunks
//! - **Binary-safe** — bulk strings stay raw bytes until you ask for text
//! - **Inline fast path** — small text commands skip the RESP framing
//!   overhead when safe
//! - **Typed replies** — one [`Value`] sum covering all five RESP2 frames
//!
//! ## Quick Start
//!
//! ```ignore
//! use respite::Client;
//!
//! #[tokio::main]
//! async fn main() -> respite::Result<()> {
//!     let client = Client::connect("127.0.0.1", 6379).await?;
//!
//!     client.set("greeting", "hello").ex(60).execute().await?;
//!
//!     let val = client.get("greeting").await?;
//!     println!("greeting = {}", val);
//!
//!     client.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Scope
//!
//! One client drives one connection. Pooling, reconnection, pub/sub,
//! transactions and cluster routing are out of scope; build them on top if
//! you need them. A command the server rejects ([`Error::Server`]) leaves
//! the connection usable; a transport or framing failure poisons it and
//! fails everything still queued.

pub mod client;
pub mod commands;
mod connection;
mod engine;
pub mod error;
pub mod resp;
pub mod types;

// ── Re-exports for ergonomic top-level usage ────────────────────────────────

pub use client::{Client, ClientConfig};
pub use commands::strings::SetCommand;
pub use error::{Error, Result};
pub use types::{Arg, ToArg, Value};
