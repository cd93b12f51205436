//! Static GSM 03.38 mapping tables.
//!
//! `GSM_TO_UNICODE` is the source of truth: one entry per base-page septet
//! value (the 0x1B escape has no character of its own). Characters on the
//! extension page are reached through the escape septet and cost two septets
//! on the wire.

/// Escape septet prefixing every extension-page character.
pub(crate) const ESCAPE: u8 = 0x1B;

/// GSM 03.38 base page: septet value to Unicode scalar.
pub(crate) static GSM_TO_UNICODE: [(u8, char); 127] = [
    (0x00, '@'),
    (0x01, '£'),
    (0x02, '$'),
    (0x03, '¥'),
    (0x04, 'è'),
    (0x05, 'é'),
    (0x06, 'ù'),
    (0x07, 'ì'),
    (0x08, 'ò'),
    (0x09, 'Ç'),
    (0x0A, '\n'),
    (0x0B, 'Ø'),
    (0x0C, 'ø'),
    (0x0D, '\r'),
    (0x0E, 'Å'),
    (0x0F, 'å'),
    (0x10, 'Δ'),
    (0x11, '_'),
    (0x12, 'Φ'),
    (0x13, 'Γ'),
    (0x14, 'Λ'),
    (0x15, 'Ω'),
    (0x16, 'Π'),
    (0x17, 'Ψ'),
    (0x18, 'Σ'),
    (0x19, 'Θ'),
    (0x1A, 'Ξ'),
    (0x1C, 'Æ'),
    (0x1D, 'æ'),
    (0x1E, 'ß'),
    (0x1F, 'É'),
    (0x20, ' '),
    (0x21, '!'),
    (0x22, '"'),
    (0x23, '#'),
    (0x24, '¤'),
    (0x25, '%'),
    (0x26, '&'),
    (0x27, '\''),
    (0x28, '('),
    (0x29, ')'),
    (0x2A, '*'),
    (0x2B, '+'),
    (0x2C, ','),
    (0x2D, '-'),
    (0x2E, '.'),
    (0x2F, '/'),
    (0x30, '0'),
    (0x31, '1'),
    (0x32, '2'),
    (0x33, '3'),
    (0x34, '4'),
    (0x35, '5'),
    (0x36, '6'),
    (0x37, '7'),
    (0x38, '8'),
    (0x39, '9'),
    (0x3A, ':'),
    (0x3B, ';'),
    (0x3C, '<'),
    (0x3D, '='),
    (0x3E, '>'),
    (0x3F, '?'),
    (0x40, '¡'),
    (0x41, 'A'),
    (0x42, 'B'),
    (0x43, 'C'),
    (0x44, 'D'),
    (0x45, 'E'),
    (0x46, 'F'),
    (0x47, 'G'),
    (0x48, 'H'),
    (0x49, 'I'),
    (0x4A, 'J'),
    (0x4B, 'K'),
    (0x4C, 'L'),
    (0x4D, 'M'),
    (0x4E, 'N'),
    (0x4F, 'O'),
    (0x50, 'P'),
    (0x51, 'Q'),
    (0x52, 'R'),
    (0x53, 'S'),
    (0x54, 'T'),
    (0x55, 'U'),
    (0x56, 'V'),
    (0x57, 'W'),
    (0x58, 'X'),
    (0x59, 'Y'),
    (0x5A, 'Z'),
    (0x5B, 'Ä'),
    (0x5C, 'Ö'),
    (0x5D, 'Ñ'),
    (0x5E, 'Ü'),
    (0x5F, '§'),
    (0x60, '¿'),
    (0x61, 'a'),
    (0x62, 'b'),
    (0x63, 'c'),
    (0x64, 'd'),
    (0x65, 'e'),
    (0x66, 'f'),
    (0x67, 'g'),
    (0x68, 'h'),
    (0x69, 'i'),
    (0x6A, 'j'),
    (0x6B, 'k'),
    (0x6C, 'l'),
    (0x6D, 'm'),
    (0x6E, 'n'),
    (0x6F, 'o'),
    (0x70, 'p'),
    (0x71, 'q'),
    (0x72, 'r'),
    (0x73, 's'),
    (0x74, 't'),
    (0x75, 'u'),
    (0x76, 'v'),
    (0x77, 'w'),
    (0x78, 'x'),
    (0x79, 'y'),
    (0x7A, 'z'),
    (0x7B, 'ä'),
    (0x7C, 'ö'),
    (0x7D, 'ñ'),
    (0x7E, 'ü'),
    (0x7F, 'à'),
];

/// GSM 03.38 extension page, reached via [`ESCAPE`]. Two septets per character.
pub(crate) static GSM_EXTENSION: [(u8, char); 10] = [
    (0x0A, '\u{000C}'),
    (0x14, '^'),
    (0x28, '{'),
    (0x29, '}'),
    (0x2F, '\\'),
    (0x3C, '['),
    (0x3D, '~'),
    (0x3E, ']'),
    (0x40, '|'),
    (0x65, '€'),
];

/// Best-effort transliteration of common non-GSM characters.
///
/// Every replacement string must itself resolve through the base or extension
/// page; [`super::Converter::new`] enforces this when the derived dictionaries
/// are built.
pub(crate) static TRANSLITERATION: [(char, &str); 87] = [
    // Romanian
    ('ă', "a"),
    ('Ă', "A"),
    ('â', "a"),
    ('Â', "A"),
    ('î', "i"),
    ('Î', "I"),
    ('ș', "s"),
    ('Ș', "S"),
    ('ş', "s"),
    ('Ş', "S"),
    ('ț', "t"),
    ('Ț', "T"),
    ('ţ', "t"),
    ('Ţ', "T"),
    // Latin-1 accents without a GSM slot
    ('á', "a"),
    ('Á', "A"),
    ('À', "A"),
    ('ã', "a"),
    ('Ã', "A"),
    ('ê', "e"),
    ('Ê', "E"),
    ('ë', "e"),
    ('Ë', "E"),
    ('È', "E"),
    ('í', "i"),
    ('Í', "I"),
    ('Ì', "I"),
    ('ï', "i"),
    ('Ï', "I"),
    ('ó', "o"),
    ('Ó', "O"),
    ('Ò', "O"),
    ('ô', "o"),
    ('Ô', "O"),
    ('õ', "o"),
    ('Õ', "O"),
    ('ú', "u"),
    ('Ú', "U"),
    ('Ù', "U"),
    ('û', "u"),
    ('Û', "U"),
    ('ç', "Ç"),
    ('ý', "y"),
    ('Ý', "Y"),
    ('ÿ', "y"),
    // Latin Extended-A
    ('ā', "a"),
    ('ē', "e"),
    ('ī', "i"),
    ('ō', "o"),
    ('ū', "u"),
    ('ą', "a"),
    ('Ą', "A"),
    ('ć', "c"),
    ('Ć', "C"),
    ('č', "c"),
    ('Č', "C"),
    ('đ', "d"),
    ('Đ', "D"),
    ('ę', "e"),
    ('Ę', "E"),
    ('ł', "l"),
    ('Ł', "L"),
    ('ń', "n"),
    ('Ń', "N"),
    ('ő', "o"),
    ('Ő', "O"),
    ('ś', "s"),
    ('Ś', "S"),
    ('š', "s"),
    ('Š', "S"),
    ('ű', "u"),
    ('Ű', "U"),
    ('ź', "z"),
    ('Ź', "Z"),
    ('ż', "z"),
    ('Ż', "Z"),
    ('ž', "z"),
    ('Ž', "Z"),
    // Typographic punctuation
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201A}', "'"),
    ('\u{201E}', "\""),
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
    ('\u{2026}', "..."),
];

/// Look up a base-page septet.
pub(crate) fn base_char(code: u8) -> Option<char> {
    GSM_TO_UNICODE
        .iter()
        .find(|&&(value, _)| value == code)
        .map(|&(_, ch)| ch)
}

/// Look up an extension-page septet (the byte following [`ESCAPE`]).
pub(crate) fn extension_char(code: u8) -> Option<char> {
    GSM_EXTENSION
        .iter()
        .find(|&&(value, _)| value == code)
        .map(|&(_, ch)| ch)
}
