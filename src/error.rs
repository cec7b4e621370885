//! Error types shared by the decoder and encoder.

use std::fmt;
use std::io;

/// A violation of the RESP byte layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramingError {
    /// The leading type byte is not one of `+ - : $ *`.
    UnknownKind(u8),
    /// A line or bulk body did not end with `\r\n`.
    MissingCrlf,
    /// A length line is not a signed decimal integer.
    InvalidLength(String),
    /// A bulk length below `-1` or above the configured maximum.
    BulkLengthOutOfRange { len: i64, max: usize },
    /// Arrays have no null form in this codec.
    NegativeArrayLength(i64),
    /// A line exceeded the configured maximum before its terminator.
    LineTooLong { limit: usize },
    /// Arrays nested deeper than the configured maximum.
    TooDeep { limit: usize },
}

impl fmt::Display for FramingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind(b) => write!(f, "unrecognized kind: {:?}", char::from(*b)),
            Self::MissingCrlf => f.write_str("expect terminated with CRLF"),
            Self::InvalidLength(text) => write!(f, "invalid length line: {text:?}"),
            Self::BulkLengthOutOfRange { len, max } => {
                write!(f, "invalid bulk length: {len} (max {max})")
            }
            Self::NegativeArrayLength(len) => write!(f, "invalid array length: {len}"),
            Self::LineTooLong { limit } => write!(f, "line exceeds {limit} bytes"),
            Self::TooDeep { limit } => write!(f, "arrays nested deeper than {limit} levels"),
        }
    }
}

impl std::error::Error for FramingError {}

/// Errors returned by decoding and encoding.
#[derive(Debug)]
pub enum Error {
    /// The underlying stream or sink failed, including end-of-stream.
    Io(io::Error),
    /// The bytes read do not form a valid RESP value.
    Framing(FramingError),
    /// [`Value::parse`](crate::Value::parse) ran out of input mid-value.
    Incomplete,
}

impl Error {
    /// Returns true if the stream ended before a complete value was read.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }

    /// Returns the framing violation, if this is one.
    #[must_use]
    pub fn framing(&self) -> Option<&FramingError> {
        match self {
            Self::Framing(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "stream error: {e}"),
            Self::Framing(e) => write!(f, "framing error: {e}"),
            Self::Incomplete => f.write_str("need more data"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Framing(e) => Some(e),
            Self::Incomplete => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<FramingError> for Error {
    fn from(e: FramingError) -> Self {
        Self::Framing(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
