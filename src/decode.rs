//! Decode a buffer against an ordered field list.
//!
//! Field offsets are the buffer's canonical MSB-first bit indices, so a
//! field may cross word boundaries freely. A field whose range runs past the
//! buffer is a configuration/data mismatch: it fails without a partial value
//! and is never clamped.

use crate::buffer::{BitBuffer, BufferError};
use crate::spec::OffsetRange;
use crate::template::FieldDef;

/// One decoded row: field name, its offsets, and the rendered value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedField {
    pub name: String,
    pub range: OffsetRange,
    pub value: String,
}

impl DecodedField {
    /// Word containing the field's start bit (drives scroll-to-word).
    pub fn word(&self) -> usize {
        self.range.word()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("field {field}: {source}")]
    Field {
        field: String,
        #[source]
        source: BufferError,
    },
}

/// Decode a single field: a single-bit range renders as `"0"`/`"1"`, a wider
/// one as `"0x"` plus the upper-case hex of its right-aligned bytes.
pub fn decode_field(
    buffer: &BitBuffer,
    name: &str,
    range: &OffsetRange,
) -> Result<DecodedField, BufferError> {
    let value = if range.is_single_bit() {
        match buffer.get(range.start)? {
            true => "1".to_string(),
            false => "0".to_string(),
        }
    } else {
        let bytes = buffer.slice(range.start, range.end)?;
        let hex: String = bytes.iter().map(|b| format!("{:02X}", b)).collect();
        format!("0x{}", hex)
    };
    Ok(DecodedField {
        name: name.to_string(),
        range: *range,
        value,
    })
}

/// Decode every field in declaration order; the first failure aborts.
pub fn decode(buffer: &BitBuffer, fields: &[FieldDef]) -> Result<Vec<DecodedField>, DecodeError> {
    let mut rows = Vec::with_capacity(fields.len());
    for f in fields {
        let row = decode_field(buffer, &f.name, &f.range).map_err(|source| DecodeError::Field {
            field: f.name.clone(),
            source,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Per-row decode outcome: a buffer/field mismatch stays visible on its own
/// row instead of killing the rows that do fit.
#[derive(Debug, Default)]
pub struct DecodeReport {
    pub rows: Vec<DecodedField>,
    pub rejected: Vec<RejectedField>,
}

/// A field that failed to decode, with the reason.
#[derive(Debug)]
pub struct RejectedField {
    pub name: String,
    pub range: OffsetRange,
    pub reason: String,
}

pub fn decode_report(buffer: &BitBuffer, fields: &[FieldDef]) -> DecodeReport {
    let mut report = DecodeReport::default();
    for f in fields {
        match decode_field(buffer, &f.name, &f.range) {
            Ok(row) => report.rows.push(row),
            Err(e) => report.rejected.push(RejectedField {
                name: f.name.clone(),
                range: f.range,
                reason: e.to_string(),
            }),
        }
    }
    report
}
