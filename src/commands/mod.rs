//! Command wrappers, one module per command group.
//!
//! Every wrapper is a thin layer over [`Client::submit`]: build the
//! argument vector, pick the inline hint, convert the typed reply. The
//! hint policy lives here, not in the engine: inline is only requested
//! when every argument is inline-safe text and the joined line fits the
//! configured threshold.
//!
//! [`Client::submit`]: crate::Client::submit

pub mod hashes;
pub mod lists;
pub mod server;
pub mod sets;
pub mod strings;

use crate::client::Client;
use crate::error::Result;
use crate::types::{Arg, ToArg, Value};

/// Builds the inline hint and submits.
pub(crate) async fn exec(client: &Client, args: Vec<Arg>) -> Result<Value> {
    let inline = inline_hint(&args, client.config().inline_threshold);
    client.submit(args, inline).await
}

/// Helper to create an Arg from anything that implements ToArg.
#[inline]
pub(crate) fn arg<T: ToArg>(val: T) -> Arg {
    val.to_arg()
}

/// Whether a command qualifies for the inline form: all arguments
/// inline-safe and the space-joined line within `threshold` bytes.
fn inline_hint(args: &[Arg], threshold: usize) -> bool {
    let mut line_len = args.len().saturating_sub(1);
    for arg in args {
        if !arg.inline_safe() {
            return false;
        }
        line_len += arg.len();
    }
    line_len <= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn text_args(parts: &[&str]) -> Vec<Arg> {
        parts.iter().map(|p| p.to_arg()).collect()
    }

    #[test]
    fn small_text_commands_are_inline() {
        assert!(inline_hint(&text_args(&["GET", "key"]), 1000));
    }

    #[test]
    fn binary_payloads_are_not() {
        let args = vec![arg("SET"), arg("k"), arg(Bytes::from_static(b"\x00"))];
        assert!(!inline_hint(&args, 1000));
    }

    #[test]
    fn oversized_lines_are_not() {
        let big = "x".repeat(2000);
        assert!(!inline_hint(&text_args(&["SET", "k", &big]), 1000));
    }

    #[test]
    fn threshold_counts_the_joined_line() {
        // "GET key" is 7 bytes.
        assert!(inline_hint(&text_args(&["GET", "key"]), 7));
        assert!(!inline_hint(&text_args(&["GET", "key"]), 6));
    }
}
