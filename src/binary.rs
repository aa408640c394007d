//! Chunked binary-to-text codecs: base64 and hex (BinHex).
//!
//! Encoders accept data in arbitrary pieces and produce exactly the same text
//! as if all data were passed at once. Output is produced in bounded chunks
//! (lines of [`BASE64_LINE_CHARS`] or [`HEX_LINE_CHARS`] characters) which are
//! passed to a callback, so that writers can flush their buffers between
//! chunks instead of growing them.
//!
//! ```
//! # use xml_emit::binary::{decode_base64, Base64Encoder};
//! # use pretty_assertions::assert_eq;
//! let mut encoder = Base64Encoder::new();
//! let mut text = String::new();
//! let mut sink = |chunk: &str| -> Result<(), ()> {
//!     text.push_str(chunk);
//!     Ok(())
//! };
//! encoder.encode(b"Ma", &mut sink).unwrap();
//! encoder.encode(b"n", &mut sink).unwrap();
//! encoder.flush(&mut sink).unwrap();
//!
//! assert_eq!(text, "TWFu");
//! assert_eq!(decode_base64(&text).unwrap(), b"Man");
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::{DecodeError, Engine};

use crate::errors::CharError;
use crate::validation::is_whitespace;

/// Number of bytes encoded into one base64 output chunk.
pub const BASE64_LINE_BYTES: usize = 57;
/// Number of characters in one full base64 output chunk.
pub const BASE64_LINE_CHARS: usize = BASE64_LINE_BYTES / 3 * 4;
/// Number of bytes encoded into one hex output chunk.
pub const HEX_LINE_BYTES: usize = 64;
/// Number of characters in one full hex output chunk.
pub const HEX_LINE_CHARS: usize = HEX_LINE_BYTES * 2;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Stateful base64 encoder.
///
/// Keeps up to 2 bytes that do not form a complete 3-byte group between
/// calls of [`encode`](Self::encode). [`flush`](Self::flush) must be called
/// once after the last piece of data, otherwise those bytes are lost.
#[derive(Clone, Debug, Default)]
pub struct Base64Encoder {
    /// Bytes left over from the previous call
    carry: [u8; 3],
    /// Number of valid bytes in `carry`, always less than 3
    carry_len: usize,
    /// Reusable buffer for one output chunk
    line: String,
}

impl Base64Encoder {
    /// Creates an encoder without left-over bytes.
    pub fn new() -> Self {
        Self {
            carry: [0; 3],
            carry_len: 0,
            line: String::with_capacity(BASE64_LINE_CHARS),
        }
    }

    /// Returns `true` if some bytes are kept until the next call.
    #[inline]
    pub fn has_carry(&self) -> bool {
        self.carry_len > 0
    }

    /// Encodes the next piece of data. Complete groups are passed to `emit`,
    /// at most [`BASE64_LINE_CHARS`] characters per call of `emit`.
    pub fn encode<E, F>(&mut self, mut input: &[u8], mut emit: F) -> Result<(), E>
    where
        F: FnMut(&str) -> Result<(), E>,
    {
        // complete the group started by the previous call
        if self.carry_len > 0 {
            let needed = (3 - self.carry_len).min(input.len());
            self.carry[self.carry_len..self.carry_len + needed].copy_from_slice(&input[..needed]);
            self.carry_len += needed;
            input = &input[needed..];
            if self.carry_len < 3 {
                return Ok(());
            }
            self.line.clear();
            STANDARD.encode_string(self.carry, &mut self.line);
            self.carry_len = 0;
            emit(self.line.as_str())?;
        }

        let tail = input.len() % 3;
        let (body, rest) = input.split_at(input.len() - tail);
        for line in body.chunks(BASE64_LINE_BYTES) {
            self.line.clear();
            STANDARD.encode_string(line, &mut self.line);
            emit(self.line.as_str())?;
        }
        self.carry[..tail].copy_from_slice(rest);
        self.carry_len = tail;
        Ok(())
    }

    /// Encodes left-over bytes with `=` padding and resets the encoder.
    /// Does nothing if there are no left-over bytes.
    pub fn flush<E, F>(&mut self, mut emit: F) -> Result<(), E>
    where
        F: FnMut(&str) -> Result<(), E>,
    {
        if self.carry_len == 0 {
            return Ok(());
        }
        let len = self.carry_len;
        self.carry_len = 0;
        self.line.clear();
        STANDARD.encode_string(&self.carry[..len], &mut self.line);
        emit(self.line.as_str())
    }
}

/// Hex encoder, which writes each byte as two uppercase hex digits.
///
/// The encoder keeps no state between calls, but still produces the output
/// in chunks of at most [`HEX_LINE_CHARS`] characters.
#[derive(Clone, Debug, Default)]
pub struct BinHexEncoder {
    line: String,
}

impl BinHexEncoder {
    /// Creates a new encoder.
    pub fn new() -> Self {
        Self {
            line: String::with_capacity(HEX_LINE_CHARS),
        }
    }

    /// Encodes the next piece of data.
    pub fn encode<E, F>(&mut self, input: &[u8], mut emit: F) -> Result<(), E>
    where
        F: FnMut(&str) -> Result<(), E>,
    {
        for line in input.chunks(HEX_LINE_BYTES) {
            self.line.clear();
            for b in line {
                self.line.push(HEX_DIGITS[(b >> 4) as usize] as char);
                self.line.push(HEX_DIGITS[(b & 0x0F) as usize] as char);
            }
            emit(self.line.as_str())?;
        }
        Ok(())
    }
}

/// Encodes the whole data into a hex string.
pub fn encode_hex(input: &[u8]) -> String {
    let mut result = String::with_capacity(input.len() * 2);
    let _ = BinHexEncoder::new().encode(input, |chunk| -> Result<(), ()> {
        result.push_str(chunk);
        Ok(())
    });
    result
}

/// Encodes the whole data into a padded base64 string.
pub fn encode_base64(input: &[u8]) -> String {
    let mut result = String::with_capacity((input.len() + 2) / 3 * 4);
    let mut encoder = Base64Encoder::new();
    let mut push = |chunk: &str| -> Result<(), ()> {
        result.push_str(chunk);
        Ok(())
    };
    let _ = encoder.encode(input, &mut push);
    let _ = encoder.flush(&mut push);
    result
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// Stateful hex decoder.
///
/// XML whitespace between digits is ignored. Both upper- and lowercase digits
/// are accepted. When a piece of input ends in the middle of a byte, the
/// half byte is cached and combined with the first digit of the next piece.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BinHexDecoder {
    cached: Option<u8>,
}

impl BinHexDecoder {
    /// Creates a decoder without a cached half byte.
    #[inline]
    pub const fn new() -> Self {
        Self { cached: None }
    }

    /// Returns `true` if the decoder holds a half byte from the previous input.
    #[inline]
    pub fn has_half_byte(&self) -> bool {
        self.cached.is_some()
    }

    /// Decodes the next piece of input, appending complete bytes to `out`.
    pub fn decode(&mut self, input: &str, out: &mut Vec<u8>) -> Result<(), CharError> {
        out.reserve(input.len() / 2);
        for ch in input.chars() {
            let digit = match ch {
                '0'..='9' => ch as u8 - b'0',
                'a'..='f' => ch as u8 - b'a' + 10,
                'A'..='F' => ch as u8 - b'A' + 10,
                _ if ch.is_ascii() && is_whitespace(ch as u8) => continue,
                _ => return Err(CharError::InvalidHexDigit(ch)),
            };
            match self.cached.take() {
                Some(high) => out.push((high << 4) | digit),
                None => self.cached = Some(digit),
            }
        }
        Ok(())
    }

    /// Finishes decoding. A cached half byte is an error unless `allow_odd`
    /// is set, in which case it is dropped. The decoder is ready for new
    /// input afterwards.
    pub fn finish(&mut self, allow_odd: bool) -> Result<(), CharError> {
        match self.cached.take() {
            Some(_) if !allow_odd => Err(CharError::OddHexLength),
            _ => Ok(()),
        }
    }
}

/// Decodes a whole hex string.
///
/// With `allow_odd`, a trailing half byte is ignored, so an input of `n`
/// digits gives `n / 2` bytes.
///
/// ```
/// # use xml_emit::binary::decode_hex;
/// # use xml_emit::errors::CharError;
/// assert_eq!(decode_hex("0aFf", false), Ok(vec![0x0A, 0xFF]));
/// assert_eq!(decode_hex("0aF", false), Err(CharError::OddHexLength));
/// assert_eq!(decode_hex("0aF", true), Ok(vec![0x0A]));
/// ```
pub fn decode_hex(input: &str, allow_odd: bool) -> Result<Vec<u8>, CharError> {
    let mut decoder = BinHexDecoder::new();
    let mut result = Vec::new();
    decoder.decode(input, &mut result)?;
    decoder.finish(allow_odd)?;
    Ok(result)
}

/// Stateful base64 decoder.
///
/// XML whitespace is ignored. Input may be split at any character: characters
/// of an incomplete 4-character group are kept until the next call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Base64Decoder {
    /// Significant characters not decoded yet
    pending: Vec<u8>,
    /// `true` once the first `=` was seen
    padding: bool,
}

impl Base64Decoder {
    /// Creates a new decoder.
    #[inline]
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
            padding: false,
        }
    }

    /// Decodes the next piece of input, appending complete bytes to `out`.
    pub fn decode(&mut self, input: &str, out: &mut Vec<u8>) -> Result<(), CharError> {
        for ch in input.chars() {
            match ch {
                _ if ch.is_ascii() && is_whitespace(ch as u8) => continue,
                '=' => self.padding = true,
                // data after padding
                _ if self.padding || !ch.is_ascii() => return Err(CharError::InvalidBase64(ch)),
                _ => {}
            }
            self.pending.push(ch as u8);
        }
        let complete = self.pending.len() / 4 * 4;
        STANDARD
            .decode_vec(&self.pending[..complete], out)
            .map_err(invalid_base64)?;
        self.pending.drain(..complete);
        Ok(())
    }

    /// Finishes decoding. Input that does not consist of complete 4-character
    /// groups is an error. The decoder is ready for new input afterwards.
    pub fn finish(&mut self) -> Result<(), CharError> {
        let complete = self.pending.is_empty();
        *self = Self::new();
        if complete {
            Ok(())
        } else {
            Err(CharError::TruncatedBase64)
        }
    }
}

fn invalid_base64(e: DecodeError) -> CharError {
    match e {
        DecodeError::InvalidByte(_, b) | DecodeError::InvalidLastSymbol(_, b) => {
            CharError::InvalidBase64(b as char)
        }
        DecodeError::InvalidPadding => CharError::InvalidBase64('='),
        _ => CharError::TruncatedBase64,
    }
}

/// Decodes a whole base64 string.
pub fn decode_base64(input: &str) -> Result<Vec<u8>, CharError> {
    let mut decoder = Base64Decoder::new();
    let mut result = Vec::new();
    decoder.decode(input, &mut result)?;
    decoder.finish()?;
    Ok(result)
}
