//! RESP(REdis Serialization Protocol) codec for Rust.
//!
//! Decodes RESP2 replies from any [`std::io::BufRead`] and encodes commands
//! and replies into any [`std::io::Write`].
//!
//! ```
//! # use respcodec::{encode_request, Decoder, Request, Value};
//! let mut out = Vec::new();
//! encode_request(&mut out, &["GET".into(), "key".into()]).unwrap();
//! assert_eq!(out, b"*2\r\n$3\r\nGET\r\n$3\r\nkey\r\n");
//!
//! let mut decoder = Decoder::new(&b"$5\r\nhello\r\n"[..]);
//! assert_eq!(decoder.decode().unwrap(), Value::bulk("hello"));
//! ```

mod config;
mod decoder;
mod error;
mod parser;
mod request;
mod serialize;
mod value;

pub use config::DecoderConfig;
pub use decoder::Decoder;
pub use error::{Error, FramingError, Result};
pub use request::{IntWidth, Integer, Request};
pub use serialize::{encode, encode_reply, encode_request};
pub use value::Value;
