//! End-to-end client tests against scripted in-memory peers.
//!
//! Each test wires a client to one end of a `tokio::io::duplex` pipe and
//! plays the server on the other end, asserting the exact request bytes
//! and feeding back canned RESP replies.

use bytes::Bytes;
use std::future::{poll_fn, Future};
use std::pin::pin;
use tokio::io::{duplex, AsyncReadExt, AsyncWriteExt, DuplexStream};

use respite::{Arg, Client, ClientConfig, Error, ToArg, Value};

fn client_pair(buffer: usize) -> (Client, DuplexStream) {
    let (local, remote) = duplex(buffer);
    (Client::with_stream(local, ClientConfig::default()), remote)
}

fn args(parts: &[&str]) -> Vec<Arg> {
    parts.iter().map(|p| p.to_arg()).collect()
}

/// Reads exactly `wanted.len()` bytes and asserts they match.
async fn expect(peer: &mut DuplexStream, wanted: &[u8]) {
    let mut buf = vec![0u8; wanted.len()];
    peer.read_exact(&mut buf).await.unwrap();
    assert_eq!(
        buf,
        wanted,
        "unexpected request bytes: got {:?}",
        String::from_utf8_lossy(&buf)
    );
}

#[tokio::test]
async fn get_missing_key_is_null() {
    let (client, mut peer) = client_pair(1024);
    let server = tokio::spawn(async move {
        expect(&mut peer, b"*2\r\n$3\r\nGET\r\n$4\r\nnope\r\n").await;
        peer.write_all(b"$-1\r\n").await.unwrap();
    });

    let reply = client.submit(args(&["GET", "nope"]), false).await.unwrap();
    assert_eq!(reply, Value::Null);
    server.await.unwrap();
}

#[tokio::test]
async fn set_then_read_back() {
    let (client, mut peer) = client_pair(1024);
    let server = tokio::spawn(async move {
        expect(&mut peer, b"SET k v\r\n").await;
        peer.write_all(b"+OK\r\n").await.unwrap();
        expect(&mut peer, b"GET k\r\n").await;
        peer.write_all(b"$1\r\nv\r\n").await.unwrap();
    });

    let set = client.submit(args(&["SET", "k", "v"]), true).await.unwrap();
    assert_eq!(set, Value::Simple("OK".into()));
    let get = client.submit(args(&["GET", "k"]), true).await.unwrap();
    assert_eq!(get, Value::Bulk(Bytes::from("v")));
    server.await.unwrap();
}

#[tokio::test]
async fn empty_array_reply() {
    let (client, mut peer) = client_pair(1024);
    let server = tokio::spawn(async move {
        expect(&mut peer, b"HKEYS emptykey\r\n").await;
        peer.write_all(b"*0\r\n").await.unwrap();
    });

    let reply = client.hkeys("emptykey").await.unwrap();
    assert_eq!(reply, vec![]);
    server.await.unwrap();
}

#[tokio::test]
async fn server_error_is_not_fatal() {
    let (client, mut peer) = client_pair(1024);
    let server = tokio::spawn(async move {
        expect(&mut peer, b"HINCRBYFLOAT h f1 0.1\r\n").await;
        peer.write_all(b"-ERR hash value is not a float\r\n")
            .await
            .unwrap();
        expect(&mut peer, b"GET k\r\n").await;
        peer.write_all(b"$1\r\nv\r\n").await.unwrap();
    });

    let err = client.hincrbyfloat("h", "f1", 0.1).await.unwrap_err();
    match err {
        Error::Server(message) => assert_eq!(message, "ERR hash value is not a float"),
        other => panic!("expected server error, got {:?}", other),
    }

    // The connection is still usable.
    let get = client.get("k").await.unwrap();
    assert_eq!(get, Value::Bulk(Bytes::from("v")));
    server.await.unwrap();
}

#[tokio::test]
async fn pipelined_replies_resolve_in_submission_order() {
    let (client, mut peer) = client_pair(1024);
    let server = tokio::spawn(async move {
        expect(&mut peer, b"ECHO a\r\n").await;
        peer.write_all(b"+A\r\n").await.unwrap();
        expect(&mut peer, b"INCR n\r\n").await;
        peer.write_all(b":2\r\n").await.unwrap();
        expect(&mut peer, b"GET c\r\n").await;
        peer.write_all(b"$1\r\nc\r\n").await.unwrap();
    });

    let (first, second, third) = tokio::join!(
        client.submit(args(&["ECHO", "a"]), true),
        client.submit(args(&["INCR", "n"]), true),
        client.submit(args(&["GET", "c"]), true),
    );
    assert_eq!(first.unwrap(), Value::Simple("A".into()));
    assert_eq!(second.unwrap(), Value::Integer(2));
    assert_eq!(third.unwrap(), Value::Bulk(Bytes::from("c")));
    server.await.unwrap();
}

#[tokio::test]
async fn bulk_size_fidelity() {
    let (client, mut peer) = client_pair(64 * 1024);
    let server = tokio::spawn(async move {
        for len in [0usize, 1, 1024] {
            expect(&mut peer, b"GET big\r\n").await;
            let payload: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
            peer.write_all(format!("${}\r\n", len).as_bytes()).await.unwrap();
            peer.write_all(&payload).await.unwrap();
            peer.write_all(b"\r\n").await.unwrap();
        }
    });

    for len in [0usize, 1, 1024] {
        let expected: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        let reply = client.submit(args(&["GET", "big"]), true).await.unwrap();
        assert_eq!(reply, Value::Bulk(Bytes::from(expected)));
    }
    server.await.unwrap();
}

#[tokio::test]
async fn four_mib_payload_in_seventeen_chunks() {
    const LEN: usize = 4 * 1024 * 1024;
    let payload: Bytes = (0..LEN).map(|i| (i % 251) as u8).collect::<Vec<u8>>().into();

    let (client, mut peer) = client_pair(64 * 1024);

    let mut expected_set = Vec::new();
    expected_set.extend_from_slice(b"*3\r\n$3\r\nSET\r\n$3\r\nbig\r\n$4194304\r\n");
    expected_set.extend_from_slice(&payload);
    expected_set.extend_from_slice(b"\r\n");

    let reply_payload = payload.clone();
    let server = tokio::spawn(async move {
        expect(&mut peer, &expected_set).await;
        peer.write_all(b"+OK\r\n").await.unwrap();

        expect(&mut peer, b"GET big\r\n").await;
        let mut wire = Vec::with_capacity(LEN + 16);
        wire.extend_from_slice(format!("${}\r\n", LEN).as_bytes());
        wire.extend_from_slice(&reply_payload);
        wire.extend_from_slice(b"\r\n");

        // Deliver the reply in 17 chunks of wildly uneven sizes.
        let sizes = [
            1usize, 2, 3, 5, 8, 13, 21, 1024, 4096, 65_536, 100_000, 200_000, 400_000,
            800_000, 1_000_000, 1_500_000,
        ];
        let mut at = 0;
        for size in sizes {
            peer.write_all(&wire[at..at + size]).await.unwrap();
            at += size;
        }
        peer.write_all(&wire[at..]).await.unwrap();
    });

    let set = client.set("big", payload.clone()).execute().await.unwrap();
    assert_eq!(set, Value::Simple("OK".into()));

    let get = client.submit(args(&["GET", "big"]), true).await.unwrap();
    assert_eq!(get, Value::Bulk(payload));
    server.await.unwrap();
}

#[tokio::test]
async fn transport_failure_fans_out_to_every_queued_command() {
    let (client, mut peer) = client_pair(1024);
    let server = tokio::spawn(async move {
        expect(&mut peer, b"GET a\r\n").await;
        // Drop the stream without replying.
    });

    let (first, second, third) = tokio::join!(
        client.submit(args(&["GET", "a"]), true),
        client.submit(args(&["GET", "b"]), true),
        client.submit(args(&["GET", "c"]), true),
    );
    assert!(matches!(first.unwrap_err(), Error::ConnectionClosed));
    assert!(matches!(second.unwrap_err(), Error::ConnectionClosed));
    assert!(matches!(third.unwrap_err(), Error::ConnectionClosed));

    // The connection is poisoned; new submissions are refused.
    let refused = client.submit(args(&["PING"]), true).await;
    assert!(matches!(refused.unwrap_err(), Error::ConnectionClosed));
    server.await.unwrap();
}

#[tokio::test]
async fn framing_violation_poisons_the_connection() {
    let (client, mut peer) = client_pair(1024);
    let server = tokio::spawn(async move {
        expect(&mut peer, b"GET a\r\n").await;
        // Not a RESP type byte.
        peer.write_all(b"?garbage\r\n").await.unwrap();
    });

    let (first, second) = tokio::join!(
        client.submit(args(&["GET", "a"]), true),
        client.submit(args(&["GET", "b"]), true),
    );
    assert!(matches!(first.unwrap_err(), Error::Protocol(_)));
    assert!(matches!(second.unwrap_err(), Error::Protocol(_)));

    let refused = client.submit(args(&["PING"]), true).await;
    assert!(matches!(refused.unwrap_err(), Error::Protocol(_)));
    server.await.unwrap();
}

#[tokio::test]
async fn null_encodings_versus_empty_bulk() {
    let (client, mut peer) = client_pair(1024);
    let server = tokio::spawn(async move {
        for reply in [&b"$-1\r\n"[..], b"*-1\r\n", b"$0\r\n\r\n"] {
            expect(&mut peer, b"GET k\r\n").await;
            peer.write_all(reply).await.unwrap();
        }
    });

    assert_eq!(client.submit(args(&["GET", "k"]), true).await.unwrap(), Value::Null);
    assert_eq!(client.submit(args(&["GET", "k"]), true).await.unwrap(), Value::Null);
    assert_eq!(
        client.submit(args(&["GET", "k"]), true).await.unwrap(),
        Value::Bulk(Bytes::new())
    );
    server.await.unwrap();
}

#[tokio::test]
async fn nested_array_preserves_inner_error() {
    let (client, mut peer) = client_pair(1024);
    let server = tokio::spawn(async move {
        expect(&mut peer, b"LRANGE k 0 -1\r\n").await;
        peer.write_all(b"*4\r\n*2\r\n:1\r\n:2\r\n$3\r\nfoo\r\n-ERR boom\r\n:7\r\n")
            .await
            .unwrap();
    });

    let reply = client.submit(args(&["LRANGE", "k", "0", "-1"]), true).await.unwrap();
    assert_eq!(
        reply,
        Value::Array(vec![
            Value::Array(vec![Value::Integer(1), Value::Integer(2)]),
            Value::Bulk(Bytes::from("foo")),
            Value::Error("ERR boom".into()),
            Value::Integer(7),
        ])
    );
    server.await.unwrap();
}

#[tokio::test]
async fn abandoned_submission_still_consumes_its_reply() {
    let (client, mut peer) = client_pair(1024);
    let server = tokio::spawn(async move {
        expect(&mut peer, b"GET a\r\n").await;
        peer.write_all(b"$5\r\nfor-a\r\n").await.unwrap();
        expect(&mut peer, b"GET b\r\n").await;
        peer.write_all(b"$5\r\nfor-b\r\n").await.unwrap();
    });

    {
        // Enqueue, then walk away without awaiting the result.
        let mut abandoned = pin!(client.submit(args(&["GET", "a"]), true));
        poll_fn(|cx| {
            assert!(abandoned.as_mut().poll(cx).is_pending());
            std::task::Poll::Ready(())
        })
        .await;
    }

    // The abandoned command's reply slot is still consumed in order; the
    // second command gets the second reply, not the first.
    let reply = client.submit(args(&["GET", "b"]), true).await.unwrap();
    assert_eq!(reply, Value::Bulk(Bytes::from("for-b")));
    server.await.unwrap();
}

#[tokio::test]
async fn close_drains_then_refuses_new_submissions() {
    let (client, mut peer) = client_pair(1024);
    let server = tokio::spawn(async move {
        expect(&mut peer, b"PING\r\n").await;
        peer.write_all(b"+PONG\r\n").await.unwrap();
        // The client half-closes; read to EOF.
        let mut rest = Vec::new();
        peer.read_to_end(&mut rest).await.unwrap();
        assert!(rest.is_empty());
    });

    let pong = client.ping(None).await.unwrap();
    assert_eq!(pong, Value::Simple("PONG".into()));

    client.close().await.unwrap();
    client.close().await.unwrap(); // idempotent

    let refused = client.submit(args(&["PING"]), true).await;
    assert!(matches!(refused.unwrap_err(), Error::ConnectionClosed));
    server.await.unwrap();
}

#[tokio::test]
async fn catalog_chooses_inline_versus_array_form() {
    let (client, mut peer) = client_pair(8192);
    let big = "x".repeat(2000);
    let mut expected_set = Vec::new();
    expected_set.extend_from_slice(b"*3\r\n$3\r\nSET\r\n$1\r\nk\r\n$2000\r\n");
    expected_set.extend_from_slice(big.as_bytes());
    expected_set.extend_from_slice(b"\r\n");

    let server = tokio::spawn(async move {
        // Small text command goes inline.
        expect(&mut peer, b"GET k\r\n").await;
        peer.write_all(b"$-1\r\n").await.unwrap();
        // Oversized value falls back to the array form.
        expect(&mut peer, &expected_set).await;
        peer.write_all(b"+OK\r\n").await.unwrap();
    });

    client.get("k").await.unwrap();
    client.set("k", big.as_str()).execute().await.unwrap();
    server.await.unwrap();
}
