//! Character-level checks shared by the escaping engine and the writers.

use crate::errors::CharError;

/// Checks if the character corresponds to the [`Char`] production of
/// the XML 1.0 specification.
///
/// Any Unicode character, excluding the surrogate blocks, FFFE, and FFFF.
///
/// [`Char`]: https://www.w3.org/TR/xml/#NT-Char
#[inline]
pub fn is_xml_char(ch: char) -> bool {
    matches!(ch,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{0020}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Checks if the byte is a whitespace character as defined by the [`S`]
/// production of the XML specification.
///
/// [`S`]: https://www.w3.org/TR/xml11/#NT-S
#[inline]
pub const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\r' | b'\n' | b'\t')
}

/// Returns `true` if the unit is a leading (high) surrogate.
#[inline]
pub const fn is_high_surrogate(unit: u16) -> bool {
    matches!(unit, 0xD800..=0xDBFF)
}

/// Returns `true` if the unit is a trailing (low) surrogate.
#[inline]
pub const fn is_low_surrogate(unit: u16) -> bool {
    matches!(unit, 0xDC00..=0xDFFF)
}

/// Combines a surrogate pair into one Unicode scalar value.
///
/// Returns an error that names the offending unit when `high` or `low` is not
/// a surrogate of the expected kind.
pub fn combine_surrogates(high: u16, low: u16) -> Result<char, CharError> {
    if !is_high_surrogate(high) {
        return Err(CharError::UnpairedSurrogate(high));
    }
    if !is_low_surrogate(low) {
        return Err(CharError::UnpairedSurrogate(low));
    }
    let code = 0x10000 + (((high as u32) - 0xD800) << 10) + ((low as u32) - 0xDC00);
    char::from_u32(code).ok_or(CharError::UnpairedSurrogate(high))
}

/// Decodes UTF-16 code units into a string, rejecting unpaired surrogates
/// (including a high surrogate which is the last unit of the input).
pub fn decode_utf16(units: &[u16]) -> Result<String, CharError> {
    let mut result = String::with_capacity(units.len());
    for ch in char::decode_utf16(units.iter().copied()) {
        match ch {
            Ok(ch) => result.push(ch),
            Err(e) => return Err(CharError::UnpairedSurrogate(e.unpaired_surrogate())),
        }
    }
    Ok(result)
}

////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn xml_chars() {
        assert!(is_xml_char('\t'));
        assert!(is_xml_char('a'));
        assert!(is_xml_char('\u{10FFFF}'));
        assert!(!is_xml_char('\u{0}'));
        assert!(!is_xml_char('\u{B}'));
        assert!(!is_xml_char('\u{FFFE}'));
        assert!(!is_xml_char('\u{FFFF}'));
    }

    #[test]
    fn surrogates() {
        assert_eq!(combine_surrogates(0xD83D, 0xDE00), Ok('\u{1F600}'));
        assert_eq!(combine_surrogates(0xD800, 0xDC00), Ok('\u{10000}'));
        assert_eq!(combine_surrogates(0xDBFF, 0xDFFF), Ok('\u{10FFFF}'));
        // swapped
        assert_eq!(
            combine_surrogates(0xDE00, 0xD83D),
            Err(CharError::UnpairedSurrogate(0xDE00))
        );
        assert_eq!(
            combine_surrogates(0xD83D, 0x0041),
            Err(CharError::UnpairedSurrogate(0x0041))
        );
    }

    mod utf16 {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn pairs() {
            let units: Vec<u16> = "a\u{1F600}b".encode_utf16().collect();
            assert_eq!(decode_utf16(&units), Ok("a\u{1F600}b".to_owned()));
        }

        #[test]
        fn lone_low() {
            assert_eq!(
                decode_utf16(&[0x61, 0xDC00, 0x62]),
                Err(CharError::UnpairedSurrogate(0xDC00))
            );
        }

        #[test]
        fn lone_high() {
            assert_eq!(
                decode_utf16(&[0xD800, 0x62]),
                Err(CharError::UnpairedSurrogate(0xD800))
            );
        }

        /// A pair split at the end of the input is an error
        #[test]
        fn split_at_end() {
            assert_eq!(
                decode_utf16(&[0x61, 0xD83D]),
                Err(CharError::UnpairedSurrogate(0xD83D))
            );
        }
    }
}
