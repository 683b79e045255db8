//! List commands (LPUSH, RPUSH, LPOP, RPOP, LRANGE, LLEN).

use crate::client::Client;
use crate::commands::{arg, exec};
use crate::error::Result;
use crate::types::{ToArg, Value};

/// LPUSH key element [element ...] — prepend elements to a list.
pub async fn lpush(client: &Client, key: impl ToArg, values: &[impl ToArg]) -> Result<i64> {
    let mut args = vec![arg("LPUSH"), arg(key)];
    for value in values {
        args.push(value.to_arg());
    }
    exec(client, args).await?.into_integer()
}

/// RPUSH key element [element ...] — append elements to a list.
pub async fn rpush(client: &Client, key: impl ToArg, values: &[impl ToArg]) -> Result<i64> {
    let mut args = vec![arg("RPUSH"), arg(key)];
    for value in values {
        args.push(value.to_arg());
    }
    exec(client, args).await?.into_integer()
}

/// LPOP key — remove and get the first element.
pub async fn lpop(client: &Client, key: impl ToArg) -> Result<Value> {
    exec(client, vec![arg("LPOP"), arg(key)]).await
}

/// RPOP key — remove and get the last element.
pub async fn rpop(client: &Client, key: impl ToArg) -> Result<Value> {
    exec(client, vec![arg("RPOP"), arg(key)]).await
}

/// LRANGE key start stop — get a range of elements from a list.
pub async fn lrange(
    client: &Client,
    key: impl ToArg,
    start: i64,
    stop: i64,
) -> Result<Vec<Value>> {
    exec(client, vec![arg("LRANGE"), arg(key), arg(start), arg(stop)])
        .await?
        .into_array()
}

/// LLEN key — get the length of a list.
pub async fn llen(client: &Client, key: impl ToArg) -> Result<i64> {
    exec(client, vec![arg("LLEN"), arg(key)]).await?.into_integer()
}
