//! Error management module

use std::fmt;
use std::io::Error as IoError;
use std::sync::Arc;

/// An error in the character data that was passed to the writer or to one
/// of the binary decoders.
///
/// When such an error is returned, the part of the call that precedes the
/// offending character may already be written (and even flushed to the sink).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CharError {
    /// A UTF-16 surrogate code unit without its pair: a high surrogate that
    /// is not followed by a low one, a low surrogate without a preceding high
    /// one, or a pair split at the end of the input.
    UnpairedSurrogate(u16),
    /// The character is not allowed in XML 1.0 documents, not even as a
    /// character reference.
    InvalidXmlChar(char),
    /// Hex input ended in the middle of a byte, and odd-length input was not
    /// allowed.
    OddHexLength,
    /// A character that is neither a hex digit nor XML whitespace was found
    /// in hex input.
    InvalidHexDigit(char),
    /// A character that is not part of the base64 alphabet was found in
    /// base64 input.
    InvalidBase64(char),
    /// Base64 input ended with an incomplete 4-character group.
    TruncatedBase64,
}

impl fmt::Display for CharError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnpairedSurrogate(unit) => {
                write!(f, "unpaired surrogate code unit 0x{:X}", unit)
            }
            Self::InvalidXmlChar(ch) => write!(
                f,
                "character 0x{:X} is not allowed in XML",
                *ch as u32
            ),
            Self::OddHexLength => f.write_str("hex data has an odd number of digits"),
            Self::InvalidHexDigit(ch) => write!(f, "invalid hex digit `{}`", ch.escape_debug()),
            Self::InvalidBase64(ch) => {
                write!(f, "invalid base64 character `{}`", ch.escape_debug())
            }
            Self::TruncatedBase64 => f.write_str("base64 data ends with an incomplete group"),
        }
    }
}

impl std::error::Error for CharError {}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// A violation of document structure detected by the
/// [`CDataRouter`](crate::writer::CDataRouter).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StructuralError {
    /// A start tag of a second top-level element was written in a document
    /// that must have exactly one root element. Contains the name of the
    /// rejected element.
    MultipleRoots(String),
    /// The document was closed without any root element written.
    NoRootElement,
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MultipleRoots(name) => write!(
                f,
                "cannot write element `{}`: the document already has a root element",
                name
            ),
            Self::NoRootElement => f.write_str("document was closed without a root element"),
        }
    }
}

impl std::error::Error for StructuralError {}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// The error type used by this crate.
#[derive(Clone, Debug)]
pub enum Error {
    /// The underlying sink failed to accept data or to flush it.
    Io(Arc<IoError>),
    /// Malformed character data was passed to the writer.
    MalformedChar(CharError),
    /// Structural rule of the document was violated.
    Structural(StructuralError),
    /// An asynchronous call was started while the previous call on the same
    /// writer was not completed (its future was dropped before it finished).
    /// The writer state is unknown after that and it cannot be used anymore.
    Reentrancy,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::MalformedChar(e) => write!(f, "malformed character data: {}", e),
            Self::Structural(e) => write!(f, "structural violation: {}", e),
            Self::Reentrancy => f.write_str(
                "previous asynchronous call on this writer was not completed",
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(&**e),
            Self::MalformedChar(e) => Some(e),
            Self::Structural(e) => Some(e),
            Self::Reentrancy => None,
        }
    }
}

impl From<IoError> for Error {
    /// Creates a new `Error::Io` from the given error
    #[inline]
    fn from(error: IoError) -> Error {
        Self::Io(Arc::new(error))
    }
}

impl From<CharError> for Error {
    /// Creates a new `Error::MalformedChar` from the given error
    #[inline]
    fn from(error: CharError) -> Error {
        Self::MalformedChar(error)
    }
}

impl From<StructuralError> for Error {
    /// Creates a new `Error::Structural` from the given error
    #[inline]
    fn from(error: StructuralError) -> Error {
        Self::Structural(error)
    }
}

/// A specialized `Result` type where the error is hard-wired to [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
