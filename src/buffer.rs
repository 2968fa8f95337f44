//! Fixed-capacity, bit-addressable view over a byte buffer.
//!
//! Bits are addressed in MSB-first storage order: index 0 is the high bit of
//! the first byte, matching the left-to-right hex-text representation. The
//! length is fixed at construction; there is no implicit resizing.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("bit index {index} out of range for a {len}-bit buffer")]
    OutOfBounds { index: usize, len: usize },
    #[error("inverted bit range {start}:{end}")]
    InvalidRange { start: usize, end: usize },
    #[error("invalid hex input: {0}")]
    InvalidHex(String),
    #[error("bit width {0} out of range (1..=64)")]
    TooManyBits(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitBuffer {
    bytes: Vec<u8>,
    nbits: usize,
}

impl BitBuffer {
    /// Build from hex text (case-insensitive, even digit count), 4 bits per
    /// digit.
    pub fn from_hex(text: &str) -> Result<Self, BufferError> {
        if text.len() % 2 != 0 {
            return Err(BufferError::InvalidHex(format!(
                "odd digit count {}",
                text.len()
            )));
        }
        if let Some(bad) = text.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(BufferError::InvalidHex(format!("non-hex character `{}`", bad)));
        }
        let mut bytes = Vec::with_capacity(text.len() / 2);
        for chunk in text.as_bytes().chunks(2) {
            let digits = std::str::from_utf8(chunk)
                .map_err(|_| BufferError::InvalidHex(text.to_string()))?;
            let byte = u8::from_str_radix(digits, 16)
                .map_err(|_| BufferError::InvalidHex(digits.to_string()))?;
            bytes.push(byte);
        }
        let nbits = text.len() * 4;
        Ok(BitBuffer { bytes, nbits })
    }

    /// Exactly `bit_width` bits of `value`, left-padded with zero bits; bits
    /// of `value` above `bit_width` are dropped.
    pub fn from_int(value: u64, bit_width: usize) -> Result<Self, BufferError> {
        if bit_width == 0 || bit_width > 64 {
            return Err(BufferError::TooManyBits(bit_width));
        }
        let mut buf = BitBuffer {
            bytes: vec![0u8; (bit_width + 7) / 8],
            nbits: bit_width,
        };
        for i in 0..bit_width {
            if (value >> (bit_width - 1 - i)) & 1 == 1 {
                buf.bytes[i / 8] |= 1 << (7 - i % 8);
            }
        }
        Ok(buf)
    }

    pub fn bit_len(&self) -> usize {
        self.nbits
    }

    /// Number of whole 32-bit words the buffer holds.
    pub fn word_count(&self) -> usize {
        self.nbits / crate::word::WORD_BITS
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    pub fn get(&self, index: usize) -> Result<bool, BufferError> {
        if index >= self.nbits {
            return Err(BufferError::OutOfBounds {
                index,
                len: self.nbits,
            });
        }
        Ok((self.bytes[index / 8] >> (7 - index % 8)) & 1 == 1)
    }

    pub fn set(&mut self, index: usize, value: bool) -> Result<(), BufferError> {
        if index >= self.nbits {
            return Err(BufferError::OutOfBounds {
                index,
                len: self.nbits,
            });
        }
        let mask = 1u8 << (7 - index % 8);
        if value {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
        Ok(())
    }

    /// Toggle one bit; returns the new value.
    pub fn flip(&mut self, index: usize) -> Result<bool, BufferError> {
        let value = !self.get(index)?;
        self.set(index, value)?;
        Ok(value)
    }

    /// Bits `start..=end` packed right-aligned into big-endian bytes. Bounds
    /// are never clamped: an inverted or out-of-range pair is an error.
    pub fn slice(&self, start: usize, end: usize) -> Result<Vec<u8>, BufferError> {
        if start > end {
            return Err(BufferError::InvalidRange { start, end });
        }
        if end >= self.nbits {
            return Err(BufferError::OutOfBounds {
                index: end,
                len: self.nbits,
            });
        }
        let width = end - start + 1;
        let mut out = vec![0u8; (width + 7) / 8];
        let lead = out.len() * 8 - width;
        for (k, index) in (start..=end).enumerate() {
            if self.get(index)? {
                let pos = lead + k;
                out[pos / 8] |= 1 << (7 - pos % 8);
            }
        }
        Ok(out)
    }

    /// Canonical upper-case hex, the exact inverse of [`BitBuffer::from_hex`].
    pub fn to_hex(&self) -> String {
        let digits = (self.nbits + 3) / 4;
        let mut hex: String = self.bytes.iter().map(|b| format!("{:02X}", b)).collect();
        hex.truncate(digits);
        hex
    }
}
