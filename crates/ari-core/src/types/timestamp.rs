//! RFC 3339 timestamp parsing with arbitrary fractional precision.
//!
//! ACME servers are free to emit nanosecond (or longer) fractions. The value
//! is rounded to the nearest microsecond instead of truncated, so that the
//! parsed window never drifts earlier than what the server sent.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime};
use thiserror::Error;

/// A timestamp that does not match `YYYY-MM-DDThh:mm:ss[.frac](Z|±hh:mm)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid RFC 3339 timestamp {input:?}: {reason}")]
pub struct ParseError {
    /// The rejected input
    pub input: String,
    /// What was wrong with it
    pub reason: &'static str,
}

/// Parse an RFC 3339 timestamp into a fixed-offset instant with microsecond
/// precision.
///
/// The offset may be `Z`, `±hh:mm` or `±hhmm`. Fractions longer than six
/// digits are rounded half-up; a carry into the next second is applied.
///
/// ```rust
/// use ari_core::parse_timestamp;
///
/// let t = parse_timestamp("2025-01-02T03:04:05.123456789Z").unwrap();
/// assert_eq!(t.timestamp_subsec_micros(), 123_457);
/// ```
pub fn parse_timestamp(input: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    let fail = |reason| ParseError {
        input: input.to_string(),
        reason,
    };
    let b = input.as_bytes();

    // Shortest valid form: YYYY-MM-DDThh:mm:ssZ
    if b.len() < 20 {
        return Err(fail("too short"));
    }
    if b[4] != b'-' || b[7] != b'-' || b[13] != b':' || b[16] != b':' {
        return Err(fail("bad separators"));
    }
    if !matches!(b[10], b'T' | b't') {
        return Err(fail("missing 'T' between date and time"));
    }

    let year = digits(&b[0..4]).ok_or_else(|| fail("bad year"))?;
    let month = digits(&b[5..7]).ok_or_else(|| fail("bad month"))?;
    let day = digits(&b[8..10]).ok_or_else(|| fail("bad day"))?;
    let hour = digits(&b[11..13]).ok_or_else(|| fail("bad hour"))?;
    let minute = digits(&b[14..16]).ok_or_else(|| fail("bad minute"))?;
    let second = digits(&b[17..19]).ok_or_else(|| fail("bad second"))?;

    let mut rest = &b[19..];
    let mut micros = 0;
    if let Some((b'.', tail)) = rest.split_first() {
        let len = tail.iter().take_while(|c| c.is_ascii_digit()).count();
        if len == 0 {
            return Err(fail("empty fraction"));
        }
        micros = fraction_to_micros(&tail[..len]);
        rest = &tail[len..];
    }

    let offset_secs = parse_offset(rest).ok_or_else(|| fail("bad UTC offset"))?;
    let offset =
        FixedOffset::east_opt(offset_secs).ok_or_else(|| fail("UTC offset out of range"))?;

    let date = i32::try_from(year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, month, day))
        .ok_or_else(|| fail("date out of range"))?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)
        .ok_or_else(|| fail("time out of range"))?;
    let local = date.and_time(time) + Duration::microseconds(i64::from(micros));

    local
        .and_local_timezone(offset)
        .single()
        .ok_or_else(|| fail("unrepresentable instant"))
}

/// Decode a run of ASCII digits.
fn digits(bytes: &[u8]) -> Option<u32> {
    bytes.iter().try_fold(0u32, |acc, &c| {
        c.is_ascii_digit().then(|| acc * 10 + u32::from(c - b'0'))
    })
}

/// Round a fraction of any length to microseconds.
///
/// May return 1_000_000 when rounding carries into the next second.
fn fraction_to_micros(frac: &[u8]) -> u32 {
    let mut micros = (0..6).fold(0u32, |acc, i| {
        acc * 10 + frac.get(i).map_or(0, |c| u32::from(c - b'0'))
    });
    if frac.get(6).is_some_and(|&c| c >= b'5') {
        micros += 1;
    }
    micros
}

/// Parse `Z`, `±hh:mm` or `±hhmm` spanning the whole slice, in seconds east of UTC.
fn parse_offset(b: &[u8]) -> Option<i32> {
    let (sign, tail) = match b.split_first()? {
        (b'Z' | b'z', []) => return Some(0),
        (b'+', tail) => (1, tail),
        (b'-', tail) => (-1, tail),
        _ => return None,
    };
    let (hh, mm) = match tail {
        [h1, h2, b':', m1, m2] | [h1, h2, m1, m2] => (digits(&[*h1, *h2])?, digits(&[*m1, *m2])?),
        _ => return None,
    };
    if hh > 23 || mm > 59 {
        return None;
    }
    i32::try_from(hh * 3600 + mm * 60).ok().map(|secs| sign * secs)
}
