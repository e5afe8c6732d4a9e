const BYTES_PREFIX: &str = "bytes=";

/// Outcome of evaluating an inbound `Range` header against a known file size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRange {
    /// No usable range header; the whole file is served with a 200.
    Full,
    /// A satisfiable single interval, both bounds inclusive.
    Partial { start: u64, end: u64 },
    /// Syntactically valid but out of bounds; the caller must answer 416.
    Unsatisfiable,
}

impl ByteRange {
    pub fn content_length(&self) -> Option<u64> {
        match self {
            ByteRange::Partial { start, end } => Some(end - start + 1),
            _ => None,
        }
    }
}

/// A range header whose byte offsets do not parse as integers. Distinct from
/// `Unsatisfiable`: malformed offsets are a broken request, not a valid
/// request for bytes the file does not have.
#[derive(Debug, thiserror::Error)]
#[error("malformed byte offset in Range header")]
pub struct MalformedRangeError;

/// Parse a `Range` header into a concrete byte interval.
///
/// Only single-range requests are understood; a multi-range header such as
/// `bytes=0-100,200-300` falls into the malformed path because the second
/// token no longer parses as an integer.
pub fn parse_range_header(
    header: Option<&str>,
    file_size: u64,
) -> Result<ByteRange, MalformedRangeError> {
    let header = match header {
        Some(value) if value.starts_with(BYTES_PREFIX) => value,
        _ => return Ok(ByteRange::Full),
    };

    let mut tokens = header[BYTES_PREFIX.len()..].splitn(2, '-');

    let start: u64 = tokens
        .next()
        .unwrap_or("")
        .parse()
        .map_err(|_| MalformedRangeError)?;

    let end: u64 = match tokens.next() {
        Some(token) if !token.is_empty() => token.parse().map_err(|_| MalformedRangeError)?,
        _ => file_size.saturating_sub(1),
    };

    if start >= file_size || end >= file_size || start > end {
        return Ok(ByteRange::Unsatisfiable);
    }

    Ok(ByteRange::Partial { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_err, assert_ok_eq};

    #[test]
    fn absent_header_serves_the_full_file() {
        assert_ok_eq!(parse_range_header(None, 1000), ByteRange::Full);
    }

    #[test]
    fn non_bytes_units_serve_the_full_file() {
        assert_ok_eq!(parse_range_header(Some("items=0-10"), 1000), ByteRange::Full);
    }

    #[test]
    fn bounded_range_is_parsed_inclusively() {
        let range = parse_range_header(Some("bytes=0-99"), 1000).unwrap();
        assert_eq!(range, ByteRange::Partial { start: 0, end: 99 });
        assert_eq!(range.content_length(), Some(100));
    }

    #[test]
    fn open_ended_range_runs_to_the_last_byte() {
        assert_ok_eq!(
            parse_range_header(Some("bytes=500-"), 1000),
            ByteRange::Partial { start: 500, end: 999 }
        );
    }

    #[test]
    fn end_past_the_file_is_unsatisfiable() {
        assert_ok_eq!(
            parse_range_header(Some("bytes=999-1000"), 1000),
            ByteRange::Unsatisfiable
        );
    }

    #[test]
    fn start_past_the_file_is_unsatisfiable() {
        assert_ok_eq!(
            parse_range_header(Some("bytes=1000-"), 1000),
            ByteRange::Unsatisfiable
        );
    }

    #[test]
    fn inverted_bounds_are_unsatisfiable() {
        assert_ok_eq!(
            parse_range_header(Some("bytes=50-10"), 1000),
            ByteRange::Unsatisfiable
        );
    }

    #[test]
    fn non_numeric_offsets_are_malformed() {
        assert_err!(parse_range_header(Some("bytes=abc-"), 1000));
        assert_err!(parse_range_header(Some("bytes=-500"), 1000));
        assert_err!(parse_range_header(Some("bytes=0-1x0"), 1000));
    }

    #[test]
    fn multi_range_headers_take_the_malformed_path() {
        assert_err!(parse_range_header(Some("bytes=0-100,200-300"), 1000));
    }

    #[test]
    fn empty_file_makes_any_range_unsatisfiable() {
        assert_ok_eq!(parse_range_header(Some("bytes=0-"), 0), ByteRange::Unsatisfiable);
    }
}
