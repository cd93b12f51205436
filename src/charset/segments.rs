use super::tables::{GSM_EXTENSION, GSM_TO_UNICODE};

/// Septet budget of a message that fits in one GSM-7 segment.
pub const GSM7_SINGLE_SEGMENT: usize = 160;
/// Septets per part once a GSM-7 message must be concatenated
/// (7 bytes of each part are reserved for the concatenation header).
pub const GSM7_SEGMENT_PART: usize = 153;
/// UTF-16 code units of a message that fits in one UCS-2 segment.
pub const UCS2_SINGLE_SEGMENT: usize = 70;
/// UTF-16 code units per part of a concatenated UCS-2 message.
pub const UCS2_SEGMENT_PART: usize = 67;
/// Bytes of a message that fits in one 8-bit binary segment.
pub const BINARY_SINGLE_SEGMENT: usize = 140;
/// Bytes per part of a concatenated binary message.
pub const BINARY_SEGMENT_PART: usize = 134;

/// On-air encoding a message body will be transmitted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyEncoding {
    /// GSM 03.38, 7 bits per base character, 14 per extension character.
    Gsm7,
    /// UCS-2 (UTF-16BE), two bytes per code unit.
    Ucs2,
    /// Opaque 8-bit payload.
    Binary,
}

/// Whether every codepoint of `text` belongs to the GSM 03.38 base or
/// extension page.
///
/// There is no partial mode: one codepoint outside both pages forces the
/// whole message onto the UCS-2 path.
pub fn is_gsm7_representable(text: &str) -> bool {
    text.chars().all(|ch| char_septets(ch).is_some())
}

/// Septet length of `text` under GSM-7, or `None` if it is not representable.
///
/// Base-page characters cost one septet, extension-page characters two
/// (escape plus value).
pub fn gsm7_septet_len(text: &str) -> Option<usize> {
    text.chars().map(char_septets).sum()
}

/// UTF-16 code-unit length of `text`. Characters outside the Basic
/// Multilingual Plane count as a surrogate pair, i.e. two units.
pub fn ucs2_unit_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Number of physical SMS segments a body of `encoded_len` units occupies.
///
/// `encoded_len` is in the unit native to `encoding`: septets for GSM-7,
/// UTF-16 code units for UCS-2, bytes for binary. A length exactly at the
/// single-segment limit counts as one segment.
pub fn segment_count(encoding: BodyEncoding, encoded_len: usize) -> usize {
    let (single, part) = match encoding {
        BodyEncoding::Gsm7 => (GSM7_SINGLE_SEGMENT, GSM7_SEGMENT_PART),
        BodyEncoding::Ucs2 => (UCS2_SINGLE_SEGMENT, UCS2_SEGMENT_PART),
        BodyEncoding::Binary => (BINARY_SINGLE_SEGMENT, BINARY_SEGMENT_PART),
    };
    if encoded_len <= single {
        1
    } else {
        encoded_len.div_ceil(part)
    }
}

fn char_septets(ch: char) -> Option<usize> {
    if GSM_TO_UNICODE.iter().any(|&(_, c)| c == ch) {
        Some(1)
    } else if GSM_EXTENSION.iter().any(|&(_, c)| c == ch) {
        Some(2)
    } else {
        None
    }
}
