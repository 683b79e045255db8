//! String commands (GET, SET, INCR, DECR, MGET, MSET, APPEND, ...).

use crate::client::Client;
use crate::commands::{arg, exec};
use crate::error::Result;
use crate::types::{Arg, ToArg, Value};

// ── SET with builder ────────────────────────────────────────────────────────

/// Builder for the SET command with optional EX, PX, NX, XX modifiers.
///
/// # Example
/// ```ignore
/// client.set("key", "value").ex(3600).nx().execute().await?;
/// ```
pub struct SetCommand<'a> {
    client: &'a Client,
    args: Vec<Arg>,
}

impl<'a> SetCommand<'a> {
    /// Create a new SET command.
    pub fn new(client: &'a Client, key: impl ToArg, value: impl ToArg) -> Self {
        Self {
            client,
            args: vec![arg("SET"), arg(key), arg(value)],
        }
    }

    /// Set expiry in seconds (EX).
    pub fn ex(mut self, seconds: u64) -> Self {
        self.args.push(arg("EX"));
        self.args.push(arg(seconds));
        self
    }

    /// Set expiry in milliseconds (PX).
    pub fn px(mut self, milliseconds: u64) -> Self {
        self.args.push(arg("PX"));
        self.args.push(arg(milliseconds));
        self
    }

    /// Only set if the key does not already exist (NX).
    pub fn nx(mut self) -> Self {
        self.args.push(arg("NX"));
        self
    }

    /// Only set if the key already exists (XX).
    pub fn xx(mut self) -> Self {
        self.args.push(arg("XX"));
        self
    }

    /// Keep the existing TTL (KEEPTTL).
    pub fn keepttl(mut self) -> Self {
        self.args.push(arg("KEEPTTL"));
        self
    }

    /// Return the old value stored at key (GET).
    pub fn get(mut self) -> Self {
        self.args.push(arg("GET"));
        self
    }

    /// Execute the SET command.
    pub async fn execute(self) -> Result<Value> {
        exec(self.client, self.args).await
    }
}

// ── Standalone string commands ──────────────────────────────────────────────

/// GET key — retrieve the value of a key.
pub async fn get(client: &Client, key: impl ToArg) -> Result<Value> {
    exec(client, vec![arg("GET"), arg(key)]).await
}

/// DEL key [key ...] — delete one or more keys.
pub async fn del(client: &Client, keys: &[impl ToArg]) -> Result<i64> {
    let mut args = vec![arg("DEL")];
    for k in keys {
        args.push(k.to_arg());
    }
    exec(client, args).await?.into_integer()
}

/// EXISTS key [key ...] — check if keys exist.
pub async fn exists(client: &Client, keys: &[impl ToArg]) -> Result<i64> {
    let mut args = vec![arg("EXISTS")];
    for k in keys {
        args.push(k.to_arg());
    }
    exec(client, args).await?.into_integer()
}

/// INCR key — increment integer value by 1.
pub async fn incr(client: &Client, key: impl ToArg) -> Result<i64> {
    exec(client, vec![arg("INCR"), arg(key)]).await?.into_integer()
}

/// INCRBY key increment — increment integer value by given amount.
pub async fn incrby(client: &Client, key: impl ToArg, delta: i64) -> Result<i64> {
    exec(client, vec![arg("INCRBY"), arg(key), arg(delta)])
        .await?
        .into_integer()
}

/// DECR key — decrement integer value by 1.
pub async fn decr(client: &Client, key: impl ToArg) -> Result<i64> {
    exec(client, vec![arg("DECR"), arg(key)]).await?.into_integer()
}

/// DECRBY key decrement — decrement integer value by given amount.
pub async fn decrby(client: &Client, key: impl ToArg, delta: i64) -> Result<i64> {
    exec(client, vec![arg("DECRBY"), arg(key), arg(delta)])
        .await?
        .into_integer()
}

/// APPEND key value — append a value to a key.
pub async fn append(client: &Client, key: impl ToArg, value: impl ToArg) -> Result<i64> {
    exec(client, vec![arg("APPEND"), arg(key), arg(value)])
        .await?
        .into_integer()
}

/// STRLEN key — get the length of a string value.
pub async fn strlen(client: &Client, key: impl ToArg) -> Result<i64> {
    exec(client, vec![arg("STRLEN"), arg(key)]).await?.into_integer()
}

/// MGET key [key ...] — get the values of multiple keys.
pub async fn mget(client: &Client, keys: &[impl ToArg]) -> Result<Vec<Value>> {
    let mut args = vec![arg("MGET")];
    for k in keys {
        args.push(k.to_arg());
    }
    exec(client, args).await?.into_array()
}

/// MSET key value [key value ...] — set multiple key-value pairs.
pub async fn mset(client: &Client, pairs: &[(impl ToArg, impl ToArg)]) -> Result<Value> {
    let mut args = vec![arg("MSET")];
    for (k, v) in pairs {
        args.push(k.to_arg());
        args.push(v.to_arg());
    }
    exec(client, args).await
}

/// TTL key — get the remaining time to live of a key in seconds.
pub async fn ttl(client: &Client, key: impl ToArg) -> Result<i64> {
    exec(client, vec![arg("TTL"), arg(key)]).await?.into_integer()
}

/// EXPIRE key seconds — set a timeout on a key.
pub async fn expire(client: &Client, key: impl ToArg, seconds: u64) -> Result<bool> {
    let result = exec(client, vec![arg("EXPIRE"), arg(key), arg(seconds)])
        .await?
        .into_integer()?;
    Ok(result == 1)
}

/// PERSIST key — remove the existing timeout on a key.
pub async fn persist(client: &Client, key: impl ToArg) -> Result<bool> {
    let result = exec(client, vec![arg("PERSIST"), arg(key)])
        .await?
        .into_integer()?;
    Ok(result == 1)
}
