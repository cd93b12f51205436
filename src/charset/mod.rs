//! GSM 03.38 charset tables, UTF-8 conversion, and segment arithmetic.
//!
//! This module decides whether a message body fits the GSM 7-bit alphabet,
//! converts arbitrary Unicode text into it (with best-effort transliteration
//! of accented characters), and computes how many physical SMS segments a
//! body occupies under GSM-7 or UCS-2 rules.

mod converter;
mod segments;
mod tables;

pub use converter::{ConversionError, Converter};
pub use segments::{
    BINARY_SEGMENT_PART, BINARY_SINGLE_SEGMENT, BodyEncoding, GSM7_SEGMENT_PART,
    GSM7_SINGLE_SEGMENT, UCS2_SEGMENT_PART, UCS2_SINGLE_SEGMENT, gsm7_septet_len,
    is_gsm7_representable, segment_count, ucs2_unit_len,
};
