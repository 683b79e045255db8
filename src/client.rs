//! Client facade.
//!
//! Owns the engine and exposes the single command entry point
//! ([`Client::submit`]) plus ergonomic wrappers for the common commands.

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tracing::debug;

use crate::commands;
use crate::commands::strings::SetCommand;
use crate::connection::Connection;
use crate::engine::Engine;
use crate::error::Result;
use crate::types::{Arg, ToArg, Value};

/// Default read chunk size (8 KB).
const DEFAULT_READ_BUFFER_SIZE: usize = 8 * 1024;

/// Default upper bound on the inline command line, in bytes.
const DEFAULT_INLINE_THRESHOLD: usize = 1000;

/// Tuning knobs for a client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Commands whose space-joined line fits within this many bytes (and
    /// whose arguments are all inline-safe text) are sent in the inline
    /// form; everything else uses the RESP array form.
    pub inline_threshold: usize,
    /// Capacity of each read allocation. Tuning only, no behavioral
    /// effect.
    pub initial_read_buffer_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            inline_threshold: DEFAULT_INLINE_THRESHOLD,
            initial_read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

/// An asynchronous client for a RESP server.
///
/// One client owns one connection. Commands may be submitted concurrently;
/// they are written and completed in submission order (see
/// [`submit`](Client::submit)).
///
/// # Examples
///
/// ```ignore
/// use respite::Client;
///
/// let client = Client::connect("127.0.0.1", 6379).await?;
/// client.set("greeting", "hello").ex(60).execute().await?;
/// let val = client.get("greeting").await?;
/// ```
pub struct Client {
    engine: Engine,
    config: ClientConfig,
}

impl Client {
    /// Connects over TCP with default settings.
    pub async fn connect(host: impl Into<String>, port: u16) -> Result<Self> {
        let addr = format!("{}:{}", host.into(), port);
        let stream = TcpStream::connect(&addr).await?;
        stream.set_nodelay(true)?;
        debug!(%addr, "connected");
        Ok(Self::with_stream(stream, ClientConfig::default()))
    }

    /// Wraps an already-connected duplex byte stream.
    ///
    /// This is the constructor for transports the crate does not dial
    /// itself (unix sockets, in-memory pipes in tests, ...).
    pub fn with_stream(
        stream: impl AsyncRead + AsyncWrite + Unpin + Send + 'static,
        config: ClientConfig,
    ) -> Self {
        let conn = Connection::new(Box::new(stream), config.initial_read_buffer_size);
        Self {
            engine: Engine::new(conn),
            config,
        }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Submits a raw command.
    ///
    /// `args` is the full argument list, command name first. When
    /// `inline_hint` is set and every argument qualifies, the command goes
    /// out in the inline form; the hint must only be passed for arguments
    /// known to be space- and CRLF-free text.
    ///
    /// Resolves with the decoded reply, with [`Error::Server`] when the
    /// server answers an error frame, or with the transport error that
    /// took the connection down.
    ///
    /// [`Error::Server`]: crate::Error::Server
    pub async fn submit(&self, args: Vec<Arg>, inline_hint: bool) -> Result<Value> {
        self.engine.submit(args, inline_hint).await
    }

    /// Stops accepting new submissions, drains commands already queued,
    /// then half-closes the stream.
    pub async fn close(&self) -> Result<()> {
        self.engine.close().await
    }

    // ── String commands ─────────────────────────────────────────────────

    /// GET key — retrieve the value of a key.
    pub async fn get(&self, key: impl ToArg) -> Result<Value> {
        commands::strings::get(self, key).await
    }

    /// SET key value — returns a builder for optional modifiers (EX, NX, ...).
    ///
    /// ```ignore
    /// client.set("key", "value").ex(3600).nx().execute().await?;
    /// ```
    pub fn set(&self, key: impl ToArg, value: impl ToArg) -> SetCommand<'_> {
        SetCommand::new(self, key, value)
    }

    /// DEL key [key ...] — delete one or more keys.
    pub async fn del(&self, keys: &[impl ToArg]) -> Result<i64> {
        commands::strings::del(self, keys).await
    }

    /// EXISTS key [key ...] — check how many of the given keys exist.
    pub async fn exists(&self, keys: &[impl ToArg]) -> Result<i64> {
        commands::strings::exists(self, keys).await
    }

    /// INCR key — increment integer value by 1.
    pub async fn incr(&self, key: impl ToArg) -> Result<i64> {
        commands::strings::incr(self, key).await
    }

    /// INCRBY key increment — increment integer value.
    pub async fn incrby(&self, key: impl ToArg, delta: i64) -> Result<i64> {
        commands::strings::incrby(self, key, delta).await
    }

    /// DECR key — decrement integer value by 1.
    pub async fn decr(&self, key: impl ToArg) -> Result<i64> {
        commands::strings::decr(self, key).await
    }

    /// DECRBY key decrement — decrement integer value.
    pub async fn decrby(&self, key: impl ToArg, delta: i64) -> Result<i64> {
        commands::strings::decrby(self, key, delta).await
    }

    /// APPEND key value — append a value to a key.
    pub async fn append(&self, key: impl ToArg, value: impl ToArg) -> Result<i64> {
        commands::strings::append(self, key, value).await
    }

    /// STRLEN key — get the length of a string value.
    pub async fn strlen(&self, key: impl ToArg) -> Result<i64> {
        commands::strings::strlen(self, key).await
    }

    /// MGET key [key ...] — get values of multiple keys.
    pub async fn mget(&self, keys: &[impl ToArg]) -> Result<Vec<Value>> {
        commands::strings::mget(self, keys).await
    }

    /// MSET key value [key value ...] — set multiple key-value pairs.
    pub async fn mset(&self, pairs: &[(impl ToArg, impl ToArg)]) -> Result<Value> {
        commands::strings::mset(self, pairs).await
    }

    /// TTL key — get the time-to-live of a key in seconds.
    pub async fn ttl(&self, key: impl ToArg) -> Result<i64> {
        commands::strings::ttl(self, key).await
    }

    /// EXPIRE key seconds — set a timeout on a key.
    pub async fn expire(&self, key: impl ToArg, seconds: u64) -> Result<bool> {
        commands::strings::expire(self, key, seconds).await
    }

    /// PERSIST key — remove the timeout on a key.
    pub async fn persist(&self, key: impl ToArg) -> Result<bool> {
        commands::strings::persist(self, key).await
    }

    // ── Hash commands ───────────────────────────────────────────────────

    /// HSET key field value [field value ...] — set fields in a hash.
    pub async fn hset(
        &self,
        key: impl ToArg,
        fields: &[(impl ToArg, impl ToArg)],
    ) -> Result<i64> {
        commands::hashes::hset(self, key, fields).await
    }

    /// HGET key field — get the value of a hash field.
    pub async fn hget(&self, key: impl ToArg, field: impl ToArg) -> Result<Value> {
        commands::hashes::hget(self, key, field).await
    }

    /// HDEL key field [field ...] — delete hash fields.
    pub async fn hdel(&self, key: impl ToArg, fields: &[impl ToArg]) -> Result<i64> {
        commands::hashes::hdel(self, key, fields).await
    }

    /// HGETALL key — get all fields and values in a hash.
    pub async fn hgetall(&self, key: impl ToArg) -> Result<Vec<Value>> {
        commands::hashes::hgetall(self, key).await
    }

    /// HEXISTS key field — check if a field exists in a hash.
    pub async fn hexists(&self, key: impl ToArg, field: impl ToArg) -> Result<bool> {
        commands::hashes::hexists(self, key, field).await
    }

    /// HLEN key — get the number of fields in a hash.
    pub async fn hlen(&self, key: impl ToArg) -> Result<i64> {
        commands::hashes::hlen(self, key).await
    }

    /// HKEYS key — get all field names in a hash.
    pub async fn hkeys(&self, key: impl ToArg) -> Result<Vec<Value>> {
        commands::hashes::hkeys(self, key).await
    }

    /// HVALS key — get all values in a hash.
    pub async fn hvals(&self, key: impl ToArg) -> Result<Vec<Value>> {
        commands::hashes::hvals(self, key).await
    }

    /// HINCRBY key field increment — increment a hash field's integer value.
    pub async fn hincrby(&self, key: impl ToArg, field: impl ToArg, delta: i64) -> Result<i64> {
        commands::hashes::hincrby(self, key, field, delta).await
    }

    /// HINCRBYFLOAT key field increment — increment a hash field's float value.
    pub async fn hincrbyfloat(
        &self,
        key: impl ToArg,
        field: impl ToArg,
        delta: f64,
    ) -> Result<Value> {
        commands::hashes::hincrbyfloat(self, key, field, delta).await
    }

    // ── List commands ───────────────────────────────────────────────────

    /// LPUSH key element [element ...] — prepend elements to a list.
    pub async fn lpush(&self, key: impl ToArg, values: &[impl ToArg]) -> Result<i64> {
        commands::lists::lpush(self, key, values).await
    }

    /// RPUSH key element [element ...] — append elements to a list.
    pub async fn rpush(&self, key: impl ToArg, values: &[impl ToArg]) -> Result<i64> {
        commands::lists::rpush(self, key, values).await
    }

    /// LPOP key — remove and get the first element.
    pub async fn lpop(&self, key: impl ToArg) -> Result<Value> {
        commands::lists::lpop(self, key).await
    }

    /// RPOP key — remove and get the last element.
    pub async fn rpop(&self, key: impl ToArg) -> Result<Value> {
        commands::lists::rpop(self, key).await
    }

    /// LRANGE key start stop — get a range of elements from a list.
    pub async fn lrange(&self, key: impl ToArg, start: i64, stop: i64) -> Result<Vec<Value>> {
        commands::lists::lrange(self, key, start, stop).await
    }

    /// LLEN key — get the length of a list.
    pub async fn llen(&self, key: impl ToArg) -> Result<i64> {
        commands::lists::llen(self, key).await
    }

    // ── Set commands ────────────────────────────────────────────────────

    /// SADD key member [member ...] — add members to a set.
    pub async fn sadd(&self, key: impl ToArg, members: &[impl ToArg]) -> Result<i64> {
        commands::sets::sadd(self, key, members).await
    }

    /// SREM key member [member ...] — remove members from a set.
    pub async fn srem(&self, key: impl ToArg, members: &[impl ToArg]) -> Result<i64> {
        commands::sets::srem(self, key, members).await
    }

    /// SMEMBERS key — get all members of a set.
    pub async fn smembers(&self, key: impl ToArg) -> Result<Vec<Value>> {
        commands::sets::smembers(self, key).await
    }

    /// SISMEMBER key member — check if a value is in a set.
    pub async fn sismember(&self, key: impl ToArg, member: impl ToArg) -> Result<bool> {
        commands::sets::sismember(self, key, member).await
    }

    /// SCARD key — get the number of members in a set.
    pub async fn scard(&self, key: impl ToArg) -> Result<i64> {
        commands::sets::scard(self, key).await
    }

    // ── Server commands ─────────────────────────────────────────────────

    /// PING [message] — test server connectivity.
    pub async fn ping(&self, message: Option<&str>) -> Result<Value> {
        commands::server::ping(self, message).await
    }

    /// ECHO message — ask the server to echo a message back.
    pub async fn echo(&self, message: impl ToArg) -> Result<Value> {
        commands::server::echo(self, message).await
    }

    /// INFO [section] — get server information.
    pub async fn info(&self, section: Option<&str>) -> Result<Value> {
        commands::server::info(self, section).await
    }

    /// DBSIZE — return the number of keys in the current database.
    pub async fn dbsize(&self) -> Result<i64> {
        commands::server::dbsize(self).await
    }

    /// FLUSHDB [ASYNC] — remove all keys from the current database.
    pub async fn flushdb(&self, r#async: bool) -> Result<Value> {
        commands::server::flushdb(self, r#async).await
    }

    /// KEYS pattern — find all keys matching a glob pattern.
    pub async fn keys(&self, pattern: impl ToArg) -> Result<Vec<Value>> {
        commands::server::keys(self, pattern).await
    }
}
