//! Parse a field's textual offset spec into a normalized range.
//!
//! The value grammar is `[start[:end]][=default]`. Each numeric literal is
//! decimal, `0x` hexadecimal, or leading-zero octal; an empty literal is 0.

/// Normalized field offsets: `start <= end` always holds, both are bit
/// positions in the buffer's MSB-first numbering. A single bit is
/// `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetRange {
    pub default: u64,
    pub start: usize,
    pub end: usize,
}

impl OffsetRange {
    pub fn is_single_bit(&self) -> bool {
        self.start == self.end
    }

    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }

    /// Index of the 32-bit word containing the field's start bit.
    pub fn word(&self) -> usize {
        self.start / crate::word::WORD_BITS
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    #[error("invalid numeric literal `{0}`")]
    BadLiteral(String),
}

/// Parse one spec string, e.g. `"8:10=0x7"`. Whitespace is ignored anywhere.
/// Inverted offsets are swapped so `start <= end` always holds. Extra `=` or
/// `:` segments beyond the ones the grammar names are ignored.
pub fn parse_spec(text: &str) -> Result<OffsetRange, SpecError> {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    let segments: Vec<&str> = cleaned.split('=').collect();
    let default = if segments.len() > 1 {
        parse_int(segments[1])?
    } else {
        0
    };

    let offsets: Vec<&str> = segments[0].split(':').collect();
    let start = parse_int(offsets[0])? as usize;
    let end = if offsets.len() > 1 {
        parse_int(offsets[1])? as usize
    } else {
        start
    };
    let (start, end) = if start <= end { (start, end) } else { (end, start) };

    Ok(OffsetRange { default, start, end })
}

/// Numeric literal rule: `0x` hex, leading-zero octal, decimal; empty is 0.
fn parse_int(s: &str) -> Result<u64, SpecError> {
    if s.is_empty() {
        return Ok(0);
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).map_err(|_| SpecError::BadLiteral(s.to_string()));
    }
    if s.len() > 1 && s.starts_with('0') {
        return u64::from_str_radix(s, 8).map_err(|_| SpecError::BadLiteral(s.to_string()));
    }
    s.parse::<u64>()
        .map_err(|_| SpecError::BadLiteral(s.to_string()))
}
