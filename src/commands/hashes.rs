//! Hash commands (HSET, HGET, HDEL, HGETALL, HKEYS, HINCRBY, ...).

use crate::client::Client;
use crate::commands::{arg, exec};
use crate::error::Result;
use crate::types::{ToArg, Value};

/// HSET key field value [field value ...] — set fields in a hash.
/// Returns the number of fields that were newly created.
pub async fn hset(
    client: &Client,
    key: impl ToArg,
    fields: &[(impl ToArg, impl ToArg)],
) -> Result<i64> {
    let mut args = vec![arg("HSET"), arg(key)];
    for (field, value) in fields {
        args.push(field.to_arg());
        args.push(value.to_arg());
    }
    exec(client, args).await?.into_integer()
}

/// HGET key field — get the value of a hash field.
pub async fn hget(client: &Client, key: impl ToArg, field: impl ToArg) -> Result<Value> {
    exec(client, vec![arg("HGET"), arg(key), arg(field)]).await
}

/// HDEL key field [field ...] — delete hash fields.
pub async fn hdel(client: &Client, key: impl ToArg, fields: &[impl ToArg]) -> Result<i64> {
    let mut args = vec![arg("HDEL"), arg(key)];
    for field in fields {
        args.push(field.to_arg());
    }
    exec(client, args).await?.into_integer()
}

/// HGETALL key — get all fields and values in a hash, interleaved.
pub async fn hgetall(client: &Client, key: impl ToArg) -> Result<Vec<Value>> {
    exec(client, vec![arg("HGETALL"), arg(key)]).await?.into_array()
}

/// HEXISTS key field — check if a field exists in a hash.
pub async fn hexists(client: &Client, key: impl ToArg, field: impl ToArg) -> Result<bool> {
    let result = exec(client, vec![arg("HEXISTS"), arg(key), arg(field)])
        .await?
        .into_integer()?;
    Ok(result == 1)
}

/// HLEN key — get the number of fields in a hash.
pub async fn hlen(client: &Client, key: impl ToArg) -> Result<i64> {
    exec(client, vec![arg("HLEN"), arg(key)]).await?.into_integer()
}

/// HKEYS key — get all field names in a hash.
pub async fn hkeys(client: &Client, key: impl ToArg) -> Result<Vec<Value>> {
    exec(client, vec![arg("HKEYS"), arg(key)]).await?.into_array()
}

/// HVALS key — get all values in a hash.
pub async fn hvals(client: &Client, key: impl ToArg) -> Result<Vec<Value>> {
    exec(client, vec![arg("HVALS"), arg(key)]).await?.into_array()
}

/// HINCRBY key field increment — increment a hash field's integer value.
pub async fn hincrby(
    client: &Client,
    key: impl ToArg,
    field: impl ToArg,
    delta: i64,
) -> Result<i64> {
    exec(client, vec![arg("HINCRBY"), arg(key), arg(field), arg(delta)])
        .await?
        .into_integer()
}

/// HINCRBYFLOAT key field increment — increment a hash field's float
/// value. The server replies with the new value as a bulk string.
pub async fn hincrbyfloat(
    client: &Client,
    key: impl ToArg,
    field: impl ToArg,
    delta: f64,
) -> Result<Value> {
    exec(
        client,
        vec![arg("HINCRBYFLOAT"), arg(key), arg(field), arg(delta)],
    )
    .await
}
