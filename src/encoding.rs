//! Output encoding of the writers.
//!
//! Writers keep their buffers in UTF-8. Without the `encoding` feature only
//! UTF-8 output is possible. With it, the buffer is transcoded into any
//! ASCII-compatible encoding supported by [`encoding_rs`] when it is flushed.

#[cfg(feature = "encoding")]
use encoding_rs::{CoderResult, Encoder, Encoding, UTF_8};

/// The encoding in which a writer emits its output.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct OutputEncoding {
    #[cfg(feature = "encoding")]
    encoding: &'static Encoding,
}

impl OutputEncoding {
    /// UTF-8 output. The buffer is written without any conversion.
    #[cfg(not(feature = "encoding"))]
    pub const UTF8: Self = Self {};
    /// UTF-8 output. The buffer is written without any conversion.
    #[cfg(feature = "encoding")]
    pub const UTF8: Self = Self { encoding: UTF_8 };

    /// Resolves an encoding by its [WHATWG label]. Unknown labels, encodings
    /// which are not ASCII-compatible, and (without the `encoding` feature)
    /// everything except UTF-8 fall back to UTF-8 with a warning.
    ///
    /// ```
    /// # use xml_emit::encoding::OutputEncoding;
    /// assert_eq!(OutputEncoding::for_label("UTF8"), OutputEncoding::UTF8);
    /// assert_eq!(OutputEncoding::for_label("klingon"), OutputEncoding::UTF8);
    /// ```
    ///
    /// [WHATWG label]: https://encoding.spec.whatwg.org/#names-and-labels
    pub fn for_label(label: &str) -> Self {
        let label = label.trim();
        #[cfg(feature = "encoding")]
        {
            match Encoding::for_label(label.as_bytes()) {
                Some(encoding) if encoding.is_ascii_compatible() => {
                    Self {
                        encoding: encoding.output_encoding(),
                    }
                }
                Some(encoding) => {
                    log::warn!(
                        "output encoding `{}` is not ASCII-compatible, falling back to UTF-8",
                        encoding.name()
                    );
                    Self::UTF8
                }
                None => {
                    log::warn!("unknown output encoding `{}`, falling back to UTF-8", label);
                    Self::UTF8
                }
            }
        }
        #[cfg(not(feature = "encoding"))]
        {
            if !label.eq_ignore_ascii_case("utf-8") && !label.eq_ignore_ascii_case("utf8") {
                log::warn!(
                    "output encoding `{}` requires the `encoding` feature, falling back to UTF-8",
                    label
                );
            }
            Self::UTF8
        }
    }

    /// Wraps an `encoding_rs` encoding. Encodings which are not
    /// ASCII-compatible are replaced by UTF-8.
    #[cfg(feature = "encoding")]
    pub fn from_encoding(encoding: &'static Encoding) -> Self {
        if encoding.is_ascii_compatible() {
            Self {
                encoding: encoding.output_encoding(),
            }
        } else {
            Self::UTF8
        }
    }

    /// Returns `true` if the output is written in UTF-8.
    #[inline]
    pub fn is_utf8(&self) -> bool {
        #[cfg(feature = "encoding")]
        {
            self.encoding == UTF_8
        }
        #[cfg(not(feature = "encoding"))]
        {
            true
        }
    }

    /// The name of the encoding in lowercase, as it is written in the XML
    /// declaration and in the HTML `<META>` element.
    pub fn name(&self) -> String {
        #[cfg(feature = "encoding")]
        {
            self.encoding.name().to_ascii_lowercase()
        }
        #[cfg(not(feature = "encoding"))]
        {
            "utf-8".to_owned()
        }
    }

    /// Returns a transcoder from UTF-8, or `None` if no transcoding is required.
    #[cfg(feature = "encoding")]
    pub(crate) fn transcoder(&self) -> Option<Transcoder> {
        if self.is_utf8() {
            None
        } else {
            Some(Transcoder {
                encoder: self.encoding.new_encoder(),
                output: Vec::new(),
            })
        }
    }
}

impl Default for OutputEncoding {
    fn default() -> Self {
        Self::UTF8
    }
}

impl std::fmt::Debug for OutputEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "OutputEncoding({})", self.name())
    }
}

/// Converts the UTF-8 content of the buffer into the output encoding.
#[cfg(feature = "encoding")]
pub(crate) struct Transcoder {
    encoder: Encoder,
    /// Reusable buffer for the converted bytes
    output: Vec<u8>,
}

#[cfg(feature = "encoding")]
impl Transcoder {
    /// Converts `text` and returns the bytes to write. Characters that the
    /// encoding cannot represent are replaced with decimal character
    /// references.
    pub fn transcode(&mut self, mut text: &str) -> &[u8] {
        self.output.clear();
        loop {
            let needed = self
                .encoder
                .max_buffer_length_from_utf8_if_no_unmappables(text.len())
                .unwrap_or(text.len() * 4);
            // room for one `&#NNNNNNN;` replacement at least
            self.output.reserve(needed.max(16));
            let (result, read, _) = self
                .encoder
                .encode_from_utf8_to_vec(text, &mut self.output, false);
            text = &text[read..];
            match result {
                CoderResult::InputEmpty => return &self.output,
                CoderResult::OutputFull => continue,
            }
        }
    }
}

#[cfg(feature = "encoding")]
impl std::fmt::Debug for Transcoder {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Transcoder({})", self.encoder.encoding().name())
    }
}
