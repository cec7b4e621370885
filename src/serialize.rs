//! RESP serialize

use crate::error::{Error, Result};
use crate::request::Request;
use crate::value::Value;
use bytes::{BufMut, BytesMut};
use std::convert::Infallible;
use std::io::{self, Write};

const CRLF_BYTES: &[u8] = b"\r\n";
const NULL_BULK_BYTES: &[u8] = b"$-1\r\n";

/// Destination for encoded bytes; lets one grammar serve both fallible
/// writers and infallible in-memory buffers.
trait Sink {
    type Error;

    fn emit(&mut self, src: &[u8]) -> std::result::Result<(), Self::Error>;
}

type Put<S> = std::result::Result<usize, <S as Sink>::Error>;

struct IoSink<'a, W: ?Sized>(&'a mut W);

impl<W: Write + ?Sized> Sink for IoSink<'_, W> {
    type Error = io::Error;

    fn emit(&mut self, src: &[u8]) -> io::Result<()> {
        self.0.write_all(src)
    }
}

impl Sink for BytesMut {
    type Error = Infallible;

    fn emit(&mut self, src: &[u8]) -> std::result::Result<(), Infallible> {
        self.put_slice(src);
        Ok(())
    }
}

fn put_line<S: Sink>(sink: &mut S, kind: u8, payload: &[u8]) -> Put<S> {
    sink.emit(&[kind])?;
    sink.emit(payload)?;
    sink.emit(CRLF_BYTES)?;
    Ok(1 + payload.len() + CRLF_BYTES.len())
}

fn put_bulk<S: Sink>(sink: &mut S, body: &[u8]) -> Put<S> {
    let header = put_line(sink, b'$', body.len().to_string().as_bytes())?;
    sink.emit(body)?;
    sink.emit(CRLF_BYTES)?;
    Ok(header + body.len() + CRLF_BYTES.len())
}

fn put_null<S: Sink>(sink: &mut S) -> Put<S> {
    sink.emit(NULL_BULK_BYTES)?;
    Ok(NULL_BULK_BYTES.len())
}

fn put_value<S: Sink>(sink: &mut S, value: &Value) -> Put<S> {
    match value {
        Value::Simple(line) => put_line(sink, b'+', line),
        Value::Error(line) => put_line(sink, b'-', line),
        Value::Integer(line) => put_line(sink, b':', line),
        Value::Bulk(None) => put_null(sink),
        Value::Bulk(Some(body)) => put_bulk(sink, body),
        Value::Array(items) => {
            let mut len = put_line(sink, b'*', items.len().to_string().as_bytes())?;
            for item in items {
                len += put_value(sink, item)?;
            }
            Ok(len)
        }
    }
}

fn put_request<S: Sink>(sink: &mut S, value: &Request) -> Put<S> {
    match value {
        Request::Null => put_null(sink),
        Request::Simple(s) => put_line(sink, b'+', s.as_bytes()),
        Request::Error(s) => put_line(sink, b'-', s.as_bytes()),
        Request::Bulk(body) => put_bulk(sink, body),
        Request::Integer(i) => put_line(sink, b':', i.to_string().as_bytes()),
    }
}

/// Appends `value` to `buf`, returning the number of bytes added.
pub(crate) fn put_reply(value: &Value, buf: &mut BytesMut) -> usize {
    buf.reserve(value.serialize_len());
    match put_value(buf, value) {
        Ok(len) => len,
        Err(never) => match never {},
    }
}

/// Writes a single request value and returns the number of bytes written.
///
/// A write failure may leave part of the value in `w`.
/// # Examples
/// ```
/// # use respcodec::{encode, Request};
/// let mut out = Vec::new();
/// encode(&mut out, &Request::from(-1i8)).unwrap();
/// encode(&mut out, &Request::Null).unwrap();
/// assert_eq!(out, b":-1\r\n$-1\r\n");
/// ```
pub fn encode<W: Write + ?Sized>(w: &mut W, value: &Request) -> Result<usize> {
    put_request(&mut IoSink(w), value).map_err(Error::Io)
}

/// Writes a command: an array header followed by each argument in order.
///
/// Arguments are usually bulk strings, but every [`Request`] variant is
/// accepted.
/// # Examples
/// ```
/// # use respcodec::{encode_request, Request};
/// let mut out = Vec::new();
/// let args = [Request::Null, Request::simple("hello"), 233i32.into()];
/// assert_eq!(encode_request(&mut out, &args).unwrap(), 23);
/// assert_eq!(out, b"*3\r\n$-1\r\n+hello\r\n:233\r\n");
/// ```
pub fn encode_request<W: Write + ?Sized>(w: &mut W, values: &[Request]) -> Result<usize> {
    let mut sink = IoSink(w);
    let mut len = put_line(&mut sink, b'*', values.len().to_string().as_bytes())?;
    for value in values {
        len += put_request(&mut sink, value)?;
    }
    Ok(len)
}

/// Writes a reply value using the same grammar the [`Decoder`](crate::Decoder) reads.
pub fn encode_reply<W: Write + ?Sized>(w: &mut W, value: &Value) -> Result<usize> {
    put_value(&mut IoSink(w), value).map_err(Error::Io)
}
