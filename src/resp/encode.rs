//! Command encoding onto the wire.
//!
//! Commands go out either as a RESP array of bulk strings (always safe,
//! binary-clean) or, when the caller hints it and every argument allows it,
//! as a bare inline command line.

use bytes::{BufMut, BytesMut};

use crate::types::Arg;

const CRLF: &[u8] = b"\r\n";

/// Encode a command into `buf`.
///
/// The inline form is only produced when `inline` is set **and** every
/// argument is non-empty text free of spaces and CR/LF; anything else
/// falls back to the array form, so a stray hint cannot corrupt the
/// stream. Lengths count raw bytes.
///
/// # Example wire formats
/// ```text
/// GET key\r\n
/// *3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$5\r\nvalue\r\n
/// ```
pub fn encode_command(args: &[Arg], inline: bool, buf: &mut BytesMut) {
    if inline && !args.is_empty() && args.iter().all(Arg::inline_safe) {
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                buf.put_u8(b' ');
            }
            buf.put_slice(arg.as_bytes());
        }
        buf.put_slice(CRLF);
        return;
    }

    write_header(b'*', args.len(), buf);
    for arg in args {
        write_bulk(arg.as_bytes(), buf);
    }
}

/// Writes one bulk string: its `$`-header, the payload, the terminator.
fn write_bulk(data: &[u8], buf: &mut BytesMut) {
    write_header(b'$', data.len(), buf);
    buf.put_slice(data);
    buf.put_slice(CRLF);
}

/// Writes `<marker><decimal>\r\n`, rendering the digits into a stack
/// buffer to keep the hot path allocation-free.
fn write_header(marker: u8, value: usize, buf: &mut BytesMut) {
    let mut digits = [0u8; 20];
    let mut at = digits.len();
    let mut rest = value;
    loop {
        at -= 1;
        digits[at] = b'0' + (rest % 10) as u8;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }
    buf.put_u8(marker);
    buf.put_slice(&digits[at..]);
    buf.put_slice(CRLF);
}
