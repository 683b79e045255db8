//! Set commands (SADD, SREM, SMEMBERS, SISMEMBER, SCARD).

use crate::client::Client;
use crate::commands::{arg, exec};
use crate::error::Result;
use crate::types::{ToArg, Value};

/// SADD key member [member ...] — add members to a set.
pub async fn sadd(client: &Client, key: impl ToArg, members: &[impl ToArg]) -> Result<i64> {
    let mut args = vec![arg("SADD"), arg(key)];
    for member in members {
        args.push(member.to_arg());
    }
    exec(client, args).await?.into_integer()
}

/// SREM key member [member ...] — remove members from a set.
pub async fn srem(client: &Client, key: impl ToArg, members: &[impl ToArg]) -> Result<i64> {
    let mut args = vec![arg("SREM"), arg(key)];
    for member in members {
        args.push(member.to_arg());
    }
    exec(client, args).await?.into_integer()
}

/// SMEMBERS key — get all members of a set.
pub async fn smembers(client: &Client, key: impl ToArg) -> Result<Vec<Value>> {
    exec(client, vec![arg("SMEMBERS"), arg(key)]).await?.into_array()
}

/// SISMEMBER key member — check if a value is in a set.
pub async fn sismember(client: &Client, key: impl ToArg, member: impl ToArg) -> Result<bool> {
    let result = exec(client, vec![arg("SISMEMBER"), arg(key), arg(member)])
        .await?
        .into_integer()?;
    Ok(result == 1)
}

/// SCARD key — get the number of members in a set.
pub async fn scard(client: &Client, key: impl ToArg) -> Result<i64> {
    exec(client, vec![arg("SCARD"), arg(key)]).await?.into_integer()
}
