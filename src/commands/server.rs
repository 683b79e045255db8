//! Server commands (PING, ECHO, INFO, DBSIZE, FLUSHDB, KEYS).

use crate::client::Client;
use crate::commands::{arg, exec};
use crate::error::Result;
use crate::types::{ToArg, Value};

/// PING [message] — test server connectivity.
pub async fn ping(client: &Client, message: Option<&str>) -> Result<Value> {
    let mut args = vec![arg("PING")];
    if let Some(message) = message {
        args.push(arg(message));
    }
    exec(client, args).await
}

/// ECHO message — ask the server to echo a message back.
pub async fn echo(client: &Client, message: impl ToArg) -> Result<Value> {
    exec(client, vec![arg("ECHO"), arg(message)]).await
}

/// INFO [section] — get server information.
pub async fn info(client: &Client, section: Option<&str>) -> Result<Value> {
    let mut args = vec![arg("INFO")];
    if let Some(section) = section {
        args.push(arg(section));
    }
    exec(client, args).await
}

/// DBSIZE — return the number of keys in the current database.
pub async fn dbsize(client: &Client) -> Result<i64> {
    exec(client, vec![arg("DBSIZE")]).await?.into_integer()
}

/// FLUSHDB [ASYNC] — remove all keys from the current database.
pub async fn flushdb(client: &Client, r#async: bool) -> Result<Value> {
    let mut args = vec![arg("FLUSHDB")];
    if r#async {
        args.push(arg("ASYNC"));
    }
    exec(client, args).await
}

/// KEYS pattern — find all keys matching a glob pattern.
pub async fn keys(client: &Client, pattern: impl ToArg) -> Result<Vec<Value>> {
    exec(client, vec![arg("KEYS"), arg(pattern)]).await?.into_array()
}
