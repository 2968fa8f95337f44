//! Editing session: wires buffer text, word selection, struct choice and
//! decoding together, mutate-then-return.
//!
//! The session holds an injected read-only [`Template`] plus the buffer and
//! selection state. Every mutation returns the [`Notice`] the host layer
//! must deliver; the session never calls back into the host, and a fresh
//! decode after each mutation is the host's ordering contract.

use crate::buffer::{BitBuffer, BufferError};
use crate::decode::{self, DecodeError, DecodeReport, DecodedField};
use crate::template::{StructDef, Template};
use crate::word::{word_hex, word_value, WordView, WORD_BITS};

/// Hex digits covered by one 32-bit word in the buffer text.
pub const WORD_DIGITS: usize = WORD_BITS / 4;

/// Notifications the host layer renders. These are the only two contracts
/// between the session and its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The word at `word` now reads `hex` (value edit or view move).
    WordChanged { word: usize, hex: String },
    /// A field row was selected; `word` contains its start bit.
    FieldSelected { word: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("unknown struct: {0}")]
    UnknownStruct(String),
    #[error("no struct selected")]
    NoStructSelected,
    #[error("no field at row {0}")]
    NoSuchRow(usize),
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Single-buffer editing state over an injected template.
#[derive(Debug)]
pub struct Session {
    template: Template,
    buffer: BitBuffer,
    word: usize,
    selected: Option<String>,
}

impl Session {
    /// `hex` must be a whole number of 32-bit words (8 hex digits each).
    pub fn new(template: Template, hex: &str) -> Result<Self, BufferError> {
        let buffer = word_aligned(hex)?;
        Ok(Session {
            template,
            buffer,
            word: 0,
            selected: None,
        })
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn buffer(&self) -> &BitBuffer {
        &self.buffer
    }

    pub fn hex_text(&self) -> String {
        self.buffer.to_hex()
    }

    pub fn selected_word(&self) -> usize {
        self.word
    }

    pub fn selected_struct(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Replace the whole buffer from hex text; selection returns to word 0.
    /// On error the previous buffer stays in place.
    pub fn set_hex_text(&mut self, hex: &str) -> Result<Notice, BufferError> {
        self.buffer = word_aligned(hex)?;
        self.word = 0;
        self.word_notice()
    }

    /// Select the word under character position `pos` of the hex text.
    pub fn select_at_char(&mut self, pos: usize) -> Result<Notice, BufferError> {
        let word = pos / WORD_DIGITS;
        if word >= self.buffer.word_count() {
            return Err(BufferError::OutOfBounds {
                index: word * WORD_BITS,
                len: self.buffer.bit_len(),
            });
        }
        self.word = word;
        self.word_notice()
    }

    /// Toggle one bit (view numbering) of the selected word.
    pub fn flip_bit(&mut self, view_bit: usize) -> Result<Notice, BufferError> {
        WordView::new(&mut self.buffer, self.word)?.flip(view_bit)?;
        self.word_notice()
    }

    pub fn set_bit(&mut self, view_bit: usize, value: bool) -> Result<Notice, BufferError> {
        WordView::new(&mut self.buffer, self.word)?.set(view_bit, value)?;
        self.word_notice()
    }

    /// Set all 32 bits of the selected word.
    pub fn set_all(&mut self) -> Result<Notice, BufferError> {
        WordView::new(&mut self.buffer, self.word)?.set_all(true);
        self.word_notice()
    }

    /// Clear all 32 bits of the selected word.
    pub fn clear_all(&mut self) -> Result<Notice, BufferError> {
        WordView::new(&mut self.buffer, self.word)?.set_all(false);
        self.word_notice()
    }

    /// Overwrite the selected word from an unsigned value.
    pub fn set_word_value(&mut self, value: u32) -> Result<Notice, BufferError> {
        WordView::new(&mut self.buffer, self.word)?.set_value(value);
        self.word_notice()
    }

    pub fn word_value(&self) -> Result<u32, BufferError> {
        word_value(&self.buffer, self.word)
    }

    /// Choose the struct used for decoding.
    pub fn select_struct(&mut self, name: &str) -> Result<(), SessionError> {
        if self.template.get(name).is_none() {
            return Err(SessionError::UnknownStruct(name.to_string()));
        }
        self.selected = Some(name.to_string());
        Ok(())
    }

    /// Decode the buffer against the selected struct, fail-fast.
    pub fn decode(&self) -> Result<Vec<DecodedField>, SessionError> {
        let def = self.selected_def()?;
        Ok(decode::decode(&self.buffer, &def.fields)?)
    }

    /// Decode with per-row outcomes: rejected fields stay visible.
    pub fn decode_report(&self) -> Result<DecodeReport, SessionError> {
        let def = self.selected_def()?;
        Ok(decode::decode_report(&self.buffer, &def.fields))
    }

    /// Select a decoded row: moves the word selection to the field's
    /// containing word and reports it.
    pub fn select_field_row(&mut self, row: usize) -> Result<Notice, SessionError> {
        let (word, start) = {
            let def = self.selected_def()?;
            let field = def.fields.get(row).ok_or(SessionError::NoSuchRow(row))?;
            (field.range.word(), field.range.start)
        };
        if word >= self.buffer.word_count() {
            return Err(SessionError::Buffer(BufferError::OutOfBounds {
                index: start,
                len: self.buffer.bit_len(),
            }));
        }
        self.word = word;
        Ok(Notice::FieldSelected { word })
    }

    fn selected_def(&self) -> Result<&StructDef, SessionError> {
        let name = self
            .selected
            .as_deref()
            .ok_or(SessionError::NoStructSelected)?;
        self.template
            .get(name)
            .ok_or_else(|| SessionError::UnknownStruct(name.to_string()))
    }

    fn word_notice(&self) -> Result<Notice, BufferError> {
        Ok(Notice::WordChanged {
            word: self.word,
            hex: word_hex(&self.buffer, self.word)?,
        })
    }
}

fn word_aligned(hex: &str) -> Result<BitBuffer, BufferError> {
    if hex.is_empty() || hex.len() % WORD_DIGITS != 0 {
        return Err(BufferError::InvalidHex(format!(
            "buffer must be a whole number of {}-digit words, got {} digits",
            WORD_DIGITS,
            hex.len()
        )));
    }
    BitBuffer::from_hex(hex)
}
