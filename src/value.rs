//! RESP Value

use crate::decoder::Decoder;
use crate::error::{Error, Result};
use crate::parser::parse_length;
use crate::serialize::put_reply;
use bytes::{Bytes, BytesMut};
use std::fmt;

/// A decoded reply, see [Redis Protocol specification](https://redis.io/docs/reference/protocol-spec/).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// `+OK\r\n`, the raw line bytes.
    Simple(Bytes),
    /// `-ERR message\r\n`
    Error(Bytes),
    /// `:1000\r\n`, kept as the raw decimal text.
    Integer(Bytes),
    /// `$3\r\nfoo\r\n`, or `None` for the null bulk `$-1\r\n`.
    Bulk(Option<Bytes>),
    /// `*2\r\n...`, any non-negative element count.
    Array(Vec<Value>),
}

impl Value {
    pub fn simple(s: impl Into<Bytes>) -> Self {
        Value::Simple(s.into())
    }

    pub fn error(s: impl Into<Bytes>) -> Self {
        Value::Error(s.into())
    }

    pub fn integer(i: i64) -> Self {
        Value::Integer(i.to_string().into())
    }

    pub fn bulk(b: impl Into<Bytes>) -> Self {
        Value::Bulk(Some(b.into()))
    }

    pub fn null() -> Self {
        Value::Bulk(None)
    }

    /// Decodes one value from the front of `buf`.
    ///
    /// Returns the value and the number of bytes it occupied, or
    /// [`Error::Incomplete`] if `buf` ends before the value does.
    /// # Examples
    /// ```
    /// # use respcodec::{Error, Value};
    /// let (len, val) = Value::parse(b"+OK\r\n:1\r\n").unwrap();
    /// assert_eq!((len, val), (5, Value::simple("OK")));
    /// assert!(matches!(Value::parse(b"$5\r\nhel"), Err(Error::Incomplete)));
    /// ```
    pub fn parse(buf: &[u8]) -> Result<(usize, Value)> {
        let mut decoder = Decoder::new(buf);
        match decoder.decode() {
            Ok(value) => Ok((buf.len() - decoder.get_ref().len(), value)),
            Err(e) if e.is_eof() => Err(Error::Incomplete),
            Err(e) => Err(e),
        }
    }

    /// Returns `true` if the value is a null bulk string.
    /// # Examples
    /// ```
    /// # use respcodec::Value;
    /// assert_eq!(Value::Bulk(None).is_null(), true);
    /// assert_eq!(Value::Array(vec![]).is_null(), false);
    /// ```
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Bulk(None))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Parses an integer reply's text.
    /// # Examples
    /// ```
    /// # use respcodec::Value;
    /// assert_eq!(Value::Integer("-42".into()).as_integer(), Some(-42));
    /// assert_eq!(Value::Integer("4x".into()).as_integer(), None);
    /// assert_eq!(Value::simple("42").as_integer(), None);
    /// ```
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(text) => parse_length(text).ok(),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Simple(b) | Value::Error(b) | Value::Integer(b) | Value::Bulk(Some(b)) => {
                Some(&b[..])
            }
            Value::Bulk(None) | Value::Array(_) => None,
        }
    }

    /// Appends the encoded value to `buf`, returning the number of bytes added.
    pub fn encode(&self, buf: &mut BytesMut) -> usize {
        put_reply(self, buf)
    }

    /// Encode the value to RESP binary buffer.
    /// # Examples
    /// ```
    /// # use respcodec::Value;
    /// let val = Value::simple("OK正");
    /// assert_eq!(val.to_vec(), vec![43, 79, 75, 230, 173, 163, 13, 10]);
    /// ```
    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = BytesMut::new();
        self.encode(&mut buf);
        buf.to_vec()
    }

    pub fn serialize_len(&self) -> usize {
        const CRLF_LEN: usize = 2;
        match self {
            Value::Simple(s) | Value::Error(s) | Value::Integer(s) => 1 + s.len() + CRLF_LEN,
            Value::Bulk(None) => 1 + b"-1".len() + CRLF_LEN,
            Value::Bulk(Some(b)) => 1 + decimal_len(b.len()) + CRLF_LEN + b.len() + CRLF_LEN,
            Value::Array(items) => {
                1 + decimal_len(items.len())
                    + CRLF_LEN
                    + items.iter().map(Value::serialize_len).sum::<usize>()
            }
        }
    }
}

fn decimal_len(mut n: usize) -> usize {
    let mut len = 1;
    while n >= 10 {
        n /= 10;
        len += 1;
    }
    len
}

/// Renders the wire form, replacing invalid UTF-8.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_is_null() {
        assert!(Value::Bulk(None).is_null());
        assert!(!Value::Bulk(Some(Bytes::new())).is_null());
        assert!(!Value::Array(Vec::new()).is_null());
        assert!(!Value::simple("OK").is_null());
        assert!(!Value::integer(123).is_null());
        assert!(!Value::Array(vec![Value::null()]).is_null());
    }

    #[test]
    fn enum_is_error() {
        assert!(Value::error("").is_error());
        assert!(Value::error("Err").is_error());
        assert!(!Value::null().is_error());
        assert!(!Value::simple("OK").is_error());
        assert!(!Value::Array(vec![Value::error("x")]).is_error());
    }

    #[test]
    fn enum_encode_null() {
        assert_eq!(Value::null().to_vec(), b"$-1\r\n");
    }

    #[test]
    fn enum_encode_string() {
        let val = Value::simple("OK正");
        assert_eq!(val.to_vec(), "+OK正\r\n".as_bytes());
    }

    #[test]
    fn enum_encode_error() {
        let val = Value::error("error message");
        assert_eq!(val.to_vec(), b"-error message\r\n");
    }

    #[test]
    fn enum_encode_integer() {
        assert_eq!(Value::integer(123456789).to_vec(), b":123456789\r\n");
        assert_eq!(Value::integer(-123456789).to_vec(), b":-123456789\r\n");
    }

    #[test]
    fn enum_encode_bulk() {
        let val = Value::bulk("OK正".as_bytes().to_vec());
        assert_eq!(val.to_vec(), "$5\r\nOK正\r\n".as_bytes());
        assert_eq!(Value::bulk("").to_vec(), b"$0\r\n\r\n");
    }

    #[test]
    fn enum_encode_array() {
        assert_eq!(Value::Array(Vec::new()).to_vec(), b"*0\r\n");

        let val = Value::Array(vec![
            Value::null(),
            Value::Array(vec![]),
            Value::simple("OK"),
            Value::error("message"),
            Value::integer(123456789),
            Value::bulk("Hello"),
        ]);
        assert_eq!(
            val.to_vec(),
            b"*6\r\n$-1\r\n*0\r\n+OK\r\n-message\r\n:123456789\r\n$5\r\nHello\r\n".to_vec()
        );
    }

    #[test]
    fn serialize_len_matches_encoding() {
        let val = Value::Array(vec![
            Value::bulk(vec![b'x'; 1234]),
            Value::Array(vec![Value::integer(-7), Value::null()]),
            Value::simple(""),
        ]);
        assert_eq!(val.serialize_len(), val.to_vec().len());
        assert_eq!(decimal_len(0), 1);
        assert_eq!(decimal_len(9), 1);
        assert_eq!(decimal_len(10), 2);
        assert_eq!(decimal_len(1000), 4);
    }

    #[test]
    fn parse_reports_consumed_length() {
        let buf = b"*2\r\n:1\r\n$-1\r\n+rest\r\n";
        let (len, val) = Value::parse(buf).unwrap();
        assert_eq!(len, 13);
        assert_eq!(val, Value::Array(vec![Value::integer(1), Value::null()]));
        assert_eq!(Value::parse(&buf[len..]).unwrap(), (7, Value::simple("rest")));
    }

    #[test]
    fn parse_incomplete_and_invalid() {
        assert!(matches!(Value::parse(b""), Err(Error::Incomplete)));
        assert!(matches!(Value::parse(b"+OK\r"), Err(Error::Incomplete)));
        assert!(matches!(Value::parse(b"*2\r\n:1\r\n"), Err(Error::Incomplete)));
        assert!(matches!(Value::parse(b"?\r\n"), Err(Error::Framing(_))));
    }

    #[test]
    fn display_is_wire_form() {
        let val = Value::Array(vec![Value::simple("Foo"), Value::error("Bar")]);
        assert_eq!(val.to_string(), "*2\r\n+Foo\r\n-Bar\r\n");
    }

    #[test]
    fn non_utf8_lines_encode_verbatim() {
        let val = Value::error(&b"ERR caf\xe9"[..]);
        assert_eq!(val.to_vec(), b"-ERR caf\xe9\r\n");
        assert_eq!(val.serialize_len(), 11);
        assert_eq!(val.to_string(), "-ERR caf\u{fffd}\r\n");
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::integer(1000).as_integer(), Some(1000));
        assert_eq!(Value::bulk("foo").as_bytes(), Some(&b"foo"[..]));
        assert_eq!(Value::null().as_bytes(), None);
    }
}
