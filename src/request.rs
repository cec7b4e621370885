//! Values used to build outgoing commands.

use bytes::Bytes;
use std::fmt;

/// Declared width of an [`Integer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
}

/// An integer argument stored widened to 64 bits alongside its declared width.
///
/// Rendering narrows the stored bits back to the declared width, so a value
/// built with `Integer::new(IntWidth::U8, u64::MAX)` prints as `255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Integer {
    width: IntWidth,
    bits: u64,
}

impl Integer {
    /// Builds an integer from raw widened bits.
    pub fn new(width: IntWidth, bits: u64) -> Self {
        Integer { width, bits }
    }

    pub fn width(&self) -> IntWidth {
        self.width
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits = self.bits;
        match self.width {
            IntWidth::I8 => write!(f, "{}", bits as i8),
            IntWidth::I16 => write!(f, "{}", bits as i16),
            IntWidth::I32 => write!(f, "{}", bits as i32),
            IntWidth::I64 => write!(f, "{}", bits as i64),
            IntWidth::Isize => write!(f, "{}", bits as isize),
            IntWidth::U8 => write!(f, "{}", bits as u8),
            IntWidth::U16 => write!(f, "{}", bits as u16),
            IntWidth::U32 => write!(f, "{}", bits as u32),
            IntWidth::U64 => write!(f, "{}", bits),
            IntWidth::Usize => write!(f, "{}", bits as usize),
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty => $width:ident),* $(,)?) => {
        $(
            impl From<$ty> for Integer {
                fn from(v: $ty) -> Self {
                    // `as u64` sign-extends signed sources
                    Integer::new(IntWidth::$width, v as u64)
                }
            }

            impl From<$ty> for Request {
                fn from(v: $ty) -> Self {
                    Request::Integer(v.into())
                }
            }
        )*
    };
}

impl_from_int! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
}

/// A value written by [`encode`](crate::encode) and
/// [`encode_request`](crate::encode_request).
///
/// ```
/// # use respcodec::Request;
/// let args: Vec<Request> = vec!["SET".into(), "counter".into(), 42u16.into()];
/// assert_eq!(args[2], Request::Integer(42u16.into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Written as the null bulk `$-1\r\n`.
    Null,
    Simple(String),
    Error(String),
    Bulk(Bytes),
    Integer(Integer),
}

impl Request {
    pub fn simple(s: impl Into<String>) -> Self {
        Request::Simple(s.into())
    }

    pub fn error(s: impl Into<String>) -> Self {
        Request::Error(s.into())
    }

    pub fn bulk(b: impl Into<Bytes>) -> Self {
        Request::Bulk(b.into())
    }
}

impl From<&str> for Request {
    fn from(s: &str) -> Self {
        Request::Bulk(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for Request {
    fn from(s: String) -> Self {
        Request::Bulk(s.into())
    }
}

impl From<&[u8]> for Request {
    fn from(b: &[u8]) -> Self {
        Request::Bulk(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for Request {
    fn from(b: Vec<u8>) -> Self {
        Request::Bulk(b.into())
    }
}

impl From<Bytes> for Request {
    fn from(b: Bytes) -> Self {
        Request::Bulk(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widening_keeps_sign() {
        assert_eq!(Integer::from(-1i8).bits(), u64::MAX);
        assert_eq!(Integer::from(255u8).bits(), 255);
        assert_eq!(Integer::from(-2i32).width(), IntWidth::I32);
    }

    #[test]
    fn renders_at_declared_width() {
        assert_eq!(Integer::from(-1i8).to_string(), "-1");
        assert_eq!(Integer::from(255u8).to_string(), "255");
        assert_eq!(Integer::from(i16::MIN).to_string(), "-32768");
        assert_eq!(Integer::from(u32::MAX).to_string(), "4294967295");
        assert_eq!(Integer::from(i64::MIN).to_string(), "-9223372036854775808");
        assert_eq!(Integer::from(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(Integer::from(-5isize).to_string(), "-5");
        assert_eq!(Integer::from(7usize).to_string(), "7");
    }

    #[test]
    fn narrowing_wraps() {
        assert_eq!(Integer::new(IntWidth::U8, u64::MAX).to_string(), "255");
        assert_eq!(Integer::new(IntWidth::I8, 0x80).to_string(), "-128");
        assert_eq!(Integer::new(IntWidth::U16, 0x1_0001).to_string(), "1");
        assert_eq!(Integer::new(IntWidth::I32, 0xFFFF_FFFF).to_string(), "-1");
        assert_eq!(Integer::new(IntWidth::I64, u64::MAX).to_string(), "-1");
    }

    #[test]
    fn conversions() {
        assert_eq!(Request::from("GET"), Request::Bulk(Bytes::from_static(b"GET")));
        assert_eq!(Request::from(String::from("k")), Request::bulk("k"));
        assert_eq!(Request::from(&b"\x00\xff"[..]), Request::bulk(vec![0u8, 255]));
        assert_eq!(Request::from(3u64), Request::Integer(Integer::new(IntWidth::U64, 3)));
    }
}
