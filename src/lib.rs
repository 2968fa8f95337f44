//! # bitscope — bit-field template engine
//!
//! Inspect and edit a fixed-length binary buffer (entered as hex text) as a
//! named collection of bit-fields described by a declarative template, with
//! 32-bit word views using register-style bit numbering.
//!
//! ## Template format
//!
//! INI-style sections: one struct per `[section]`, one `field = spec` per
//! line. A spec is `[start[:end]][=default]`; each numeric literal is
//! decimal, `0x` hex, or leading-zero octal, and offsets count bits from the
//! most significant bit of the buffer (bit 0 = first bit of the hex text).
//!
//! ```text
//! # 802.1Q tag followed by the EtherType word
//! [VlanTag]
//! tpid = 0:15 = 0x8100
//! pcp  = 16:18
//! dei  = 19
//! vid  = 20:31
//! ```
//!
//! ## Usage
//!
//! ```
//! use bitscope::{template, Session};
//!
//! let tpl = template::parse("[VlanTag]\ntpid = 0:15 = 0x8100\nvid = 20:31\n").unwrap();
//! let mut session = Session::new(tpl, "81000123").unwrap();
//! session.select_struct("VlanTag").unwrap();
//!
//! let rows = session.decode().unwrap();
//! assert_eq!(rows[0].value, "0x8100");
//! assert_eq!(rows[1].value, "0x0123");
//!
//! // Word edits use register numbering: view bit 0 is the word's LSB.
//! let notice = session.flip_bit(0).unwrap();
//! assert_eq!(session.hex_text(), "81000122");
//! # let _ = notice;
//! ```

pub mod buffer;
pub mod decode;
pub mod session;
pub mod spec;
pub mod template;
pub mod word;

pub use buffer::{BitBuffer, BufferError};
pub use decode::{
    decode, decode_field, decode_report, DecodeError, DecodeReport, DecodedField, RejectedField,
};
pub use session::{Notice, Session, SessionError, WORD_DIGITS};
pub use spec::{parse_spec, OffsetRange, SpecError};
pub use template::{FieldDef, StructDef, Template, TemplateError};
pub use word::{storage_index, word_hex, word_value, WordView, WORD_BITS};
