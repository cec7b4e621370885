//! Streaming RESP decoder.

use crate::config::DecoderConfig;
use crate::error::{Error, FramingError, Result};
use crate::parser::{parse_length, strip_crlf};
use crate::value::Value;
use bytes::Bytes;
use std::io::{self, BufRead, BufReader, Read};
use tracing::{debug, trace};

const CRLF_LEN: usize = 2;
/// Upper bound on buffer space reserved from a length prefix alone; larger
/// values grow as bytes actually arrive.
const MAX_PREALLOC_BYTES: usize = 64 * 1024;
const MAX_PREALLOC_ITEMS: usize = 1024;
const MAX_READ_BUFFER: usize = 64 * 1024;

/// Reads one RESP reply per [`decode`](Decoder::decode) call from a buffered stream.
///
/// A decoder owns its read cursor; create one per connection and call
/// `decode` once for every reply expected.
///
/// ```
/// # use respcodec::{Decoder, Value};
/// let mut decoder = Decoder::new(&b"+OK\r\n:1000\r\n"[..]);
/// assert_eq!(decoder.decode().unwrap(), Value::simple("OK"));
/// assert_eq!(decoder.decode().unwrap(), Value::Integer("1000".into()));
/// assert!(decoder.decode().unwrap_err().is_eof());
/// ```
#[derive(Debug)]
pub struct Decoder<R> {
    reader: R,
    config: DecoderConfig,
}

impl<R: Read> Decoder<BufReader<R>> {
    /// Wraps an unbuffered reader, sizing the buffer from `config.max_line_len`.
    pub fn from_read(inner: R, config: DecoderConfig) -> Self {
        let capacity = config
            .max_line_len
            .saturating_add(CRLF_LEN)
            .min(MAX_READ_BUFFER);
        Decoder::with_config(BufReader::with_capacity(capacity, inner), config)
    }
}

impl<R: BufRead> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Decoder::with_config(reader, DecoderConfig::default())
    }

    pub fn with_config(reader: R, config: DecoderConfig) -> Self {
        Decoder { reader, config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Reading from the returned stream directly desynchronizes the decoder
    /// unless it stops on a value boundary.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Decodes exactly one reply, recursing into arrays.
    ///
    /// Stream failures, including end-of-stream, are returned as
    /// [`Error::Io`]; layout violations as [`Error::Framing`]. After an error
    /// the stream position is unspecified.
    pub fn decode(&mut self) -> Result<Value> {
        match self.decode_value(0) {
            Ok(value) => {
                trace!(len = value.serialize_len(), "decoded reply");
                Ok(value)
            }
            Err(e) => {
                if let Error::Framing(violation) = &e {
                    debug!(error = %violation, "rejected malformed reply");
                }
                Err(e)
            }
        }
    }

    fn decode_value(&mut self, depth: usize) -> Result<Value> {
        match self.read_byte()? {
            b'+' => Ok(Value::Simple(self.read_line()?.into())),
            b'-' => Ok(Value::Error(self.read_line()?.into())),
            b':' => Ok(Value::Integer(self.read_line()?.into())),
            b'$' => self.read_bulk(),
            b'*' => self.read_array(depth),
            other => Err(FramingError::UnknownKind(other).into()),
        }
    }

    fn read_byte(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.reader.read_exact(&mut byte)?;
        Ok(byte[0])
    }

    /// Reads through the next `\n` and returns the line without its CRLF.
    fn read_line(&mut self) -> Result<Vec<u8>> {
        let limit = self.config.max_line_len.saturating_add(CRLF_LEN);
        let mut line = Vec::new();
        let n = self
            .reader
            .by_ref()
            .take(limit as u64)
            .read_until(b'\n', &mut line)?;
        if line.last() != Some(&b'\n') {
            if n == limit && !self.reader.fill_buf()?.is_empty() {
                return Err(FramingError::LineTooLong {
                    limit: self.config.max_line_len,
                }
                .into());
            }
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        let len = strip_crlf(&line)?.len();
        line.truncate(len);
        Ok(line)
    }

    fn read_length(&mut self) -> Result<i64> {
        let line = self.read_line()?;
        Ok(parse_length(&line)?)
    }

    fn read_bulk(&mut self) -> Result<Value> {
        let len = self.read_length()?;
        if len == -1 {
            return Ok(Value::Bulk(None));
        }
        let max = self.config.max_bulk_len;
        let size = usize::try_from(len)
            .ok()
            .filter(|&size| size <= max)
            .ok_or(FramingError::BulkLengthOutOfRange { len, max })?;
        let want = size
            .checked_add(CRLF_LEN)
            .ok_or(FramingError::BulkLengthOutOfRange { len, max })?;

        let mut body = Vec::with_capacity(want.min(MAX_PREALLOC_BYTES));
        self.reader.by_ref().take(want as u64).read_to_end(&mut body)?;
        if body.len() < want {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        if strip_crlf(&body).is_err() {
            return Err(FramingError::MissingCrlf.into());
        }
        body.truncate(size);
        Ok(Value::Bulk(Some(Bytes::from(body))))
    }

    fn read_array(&mut self, depth: usize) -> Result<Value> {
        let len = self.read_length()?;
        if len < 0 {
            return Err(FramingError::NegativeArrayLength(len).into());
        }
        let count = usize::try_from(len)
            .map_err(|_| FramingError::InvalidLength(len.to_string()))?;
        let depth = depth + 1;
        if depth > self.config.max_depth {
            return Err(FramingError::TooDeep {
                limit: self.config.max_depth,
            }
            .into());
        }

        let mut items = Vec::with_capacity(count.min(MAX_PREALLOC_ITEMS));
        for _ in 0..count {
            items.push(self.decode_value(depth)?);
        }
        Ok(Value::Array(items))
    }
}
