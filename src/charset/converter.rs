use std::collections::HashMap;
use std::sync::LazyLock;

use super::tables::{ESCAPE, GSM_EXTENSION, GSM_TO_UNICODE, TRANSLITERATION, base_char, extension_char};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// The supplied bytes are not well-formed UTF-8.
    #[error("input is not well-formed UTF-8")]
    InvalidInput,

    /// A character has no GSM 03.38 representation and no replacement or
    /// transliteration path exists.
    #[error("character U+{codepoint:04X} cannot be converted and no replacement was provided")]
    UnconvertibleCharacter { codepoint: u32 },

    /// The caller-supplied replacement string itself contains a character
    /// outside the GSM 03.38 alphabet.
    #[error("replacement string contains non-GSM character U+{codepoint:04X}")]
    InvalidReplacement { codepoint: u32 },

    /// The built-in transliteration table maps to a character outside the
    /// GSM 03.38 alphabet. Only reachable when the static table is wrong.
    #[error("transliteration of '{from}' produces non-GSM character '{to}'")]
    InvalidTransliteration { from: char, to: char },
}

/// Converts UTF-8 text to unpacked GSM 03.38 septets.
///
/// The derived dictionaries are built once at construction by flipping the
/// static tables; the transliteration table is pre-expanded into septet form
/// at the same time. The converter holds no mutable state afterwards, so a
/// single instance can serve any number of callers. Use [`Converter::shared`]
/// unless you need a separately owned instance.
pub struct Converter {
    unicode_to_gsm: HashMap<char, Vec<u8>>,
    unicode_to_gsm_translit: HashMap<char, Vec<u8>>,
}

impl Converter {
    /// Build the derived lookup dictionaries from the static tables.
    ///
    /// Fails with [`ConversionError::InvalidTransliteration`] if any
    /// transliteration target does not resolve through the GSM tables.
    pub fn new() -> Result<Self, ConversionError> {
        let mut unicode_to_gsm =
            HashMap::with_capacity(GSM_TO_UNICODE.len() + GSM_EXTENSION.len());
        for &(code, ch) in GSM_TO_UNICODE.iter() {
            unicode_to_gsm.insert(ch, vec![code]);
        }
        for &(code, ch) in GSM_EXTENSION.iter() {
            unicode_to_gsm.insert(ch, vec![ESCAPE, code]);
        }

        let mut unicode_to_gsm_translit = unicode_to_gsm.clone();
        for &(from, to) in TRANSLITERATION.iter() {
            let mut septets = Vec::with_capacity(to.len());
            for ch in to.chars() {
                let resolved = unicode_to_gsm
                    .get(&ch)
                    .ok_or(ConversionError::InvalidTransliteration { from, to: ch })?;
                septets.extend_from_slice(resolved);
            }
            unicode_to_gsm_translit.insert(from, septets);
        }

        Ok(Self {
            unicode_to_gsm,
            unicode_to_gsm_translit,
        })
    }

    /// Process-wide converter, built once on first use.
    pub fn shared() -> &'static Converter {
        static SHARED: LazyLock<Converter> = LazyLock::new(|| {
            // The static tables are covered by unit tests; a failure here
            // means the crate itself ships a broken table.
            Converter::new().expect("built-in transliteration table resolves to the GSM alphabet")
        });
        &SHARED
    }

    /// Convert UTF-8 text to GSM 03.38.
    ///
    /// The output is a sequence of unpacked septets, one per byte with the
    /// top bit zero; packing into octets is a transport concern. Conversion
    /// is all-or-nothing: no partial output is ever returned.
    ///
    /// With `transliterate` set, characters present in the transliteration
    /// table are replaced with their closest GSM equivalent. `replacement`,
    /// when supplied, stands in for any character that still fails to
    /// resolve; it may be empty and must itself be GSM-representable.
    pub fn convert(
        &self,
        text: &str,
        transliterate: bool,
        replacement: Option<&str>,
    ) -> Result<Vec<u8>, ConversionError> {
        let dictionary = if transliterate {
            &self.unicode_to_gsm_translit
        } else {
            &self.unicode_to_gsm
        };

        let replacement = match replacement {
            Some(chars) => Some(self.resolve_replacement(chars)?),
            None => None,
        };

        let mut septets = Vec::with_capacity(text.len());
        for ch in text.chars() {
            if let Some(resolved) = dictionary.get(&ch) {
                septets.extend_from_slice(resolved);
            } else if let Some(fallback) = replacement.as_deref() {
                septets.extend_from_slice(fallback);
            } else {
                return Err(ConversionError::UnconvertibleCharacter {
                    codepoint: ch as u32,
                });
            }
        }

        Ok(septets)
    }

    /// Convert raw bytes, validating that they are well-formed UTF-8 first.
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        transliterate: bool,
        replacement: Option<&str>,
    ) -> Result<Vec<u8>, ConversionError> {
        let text = std::str::from_utf8(bytes).map_err(|_| ConversionError::InvalidInput)?;
        self.convert(text, transliterate, replacement)
    }

    /// Decode unpacked GSM 03.38 septets back into a string.
    ///
    /// Returns `None` when a septet (or escape sequence) has no assigned
    /// character.
    pub fn decode(&self, septets: &[u8]) -> Option<String> {
        let mut decoded = String::with_capacity(septets.len());
        let mut iter = septets.iter();
        while let Some(&code) = iter.next() {
            if code == ESCAPE {
                let &next = iter.next()?;
                decoded.push(extension_char(next)?);
            } else {
                decoded.push(base_char(code)?);
            }
        }
        Some(decoded)
    }

    fn resolve_replacement(&self, replacement: &str) -> Result<Vec<u8>, ConversionError> {
        let mut septets = Vec::with_capacity(replacement.len());
        for ch in replacement.chars() {
            let resolved =
                self.unicode_to_gsm
                    .get(&ch)
                    .ok_or(ConversionError::InvalidReplacement {
                        codepoint: ch as u32,
                    })?;
            septets.extend_from_slice(resolved);
        }
        Ok(septets)
    }
}
