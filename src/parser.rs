use crate::error::FramingError;
use nom::character::complete::{char, digit1};
use nom::combinator::{all_consuming, opt, recognize};
use nom::sequence::pair;
use nom::IResult;

const CRLF_BYTES: &[u8] = b"\r\n";

fn signed_decimal(buf: &[u8]) -> IResult<&[u8], &[u8]> {
    recognize(pair(opt(char('-')), digit1))(buf)
}

/// Parses the whole of `line` as `-?[0-9]+` into an `i64`.
pub(crate) fn parse_length(line: &[u8]) -> Result<i64, FramingError> {
    let invalid = || FramingError::InvalidLength(String::from_utf8_lossy(line).into_owned());
    let (_, digits) = all_consuming(signed_decimal)(line).map_err(|_| invalid())?;
    // digits are ASCII by construction
    std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(invalid)
}

/// Strips the CRLF from a line read up to and including `\n`.
pub(crate) fn strip_crlf(line: &[u8]) -> Result<&[u8], FramingError> {
    line.strip_suffix(CRLF_BYTES)
        .ok_or(FramingError::MissingCrlf)
}
