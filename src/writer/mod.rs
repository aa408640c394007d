//! Contains the writers: the low-level [`RawWrite`] interface, its
//! implementations, and the [`Writer`] that assembles them from
//! [`WriterSettings`].
//!
//! Writers do not check that the sequence of calls forms a well-formed
//! document; they only render calls which are assumed to be valid. A
//! document is written by calls in the following order:
//!
//! ```text
//! document   := decl? misc* element misc*
//! element    := start-tag attr* start-content content* end-tag
//! start-tag  := write_start_element
//! end-tag    := write_end_element | write_full_end_element
//! attr       := write_start_attribute text* write_end_attribute
//!             | write_namespace_declaration
//! content    := text | write_cdata | write_comment | write_pi
//!             | write_entity_ref | write_char_entity | write_raw
//!             | write_base64* write_end_base64 | write_bin_hex* | element
//! misc       := write_comment | write_pi | write_whitespace
//! ```
//!
//! # Examples
//!
//! ```
//! use pretty_assertions::assert_eq;
//! use xml_emit::name::QName;
//! use xml_emit::settings::WriterSettings;
//! use xml_emit::writer::{RawWrite, Writer};
//!
//! let settings = WriterSettings {
//!     indent: true,
//!     ..WriterSettings::default()
//! };
//! let mut writer = Writer::with_settings(Vec::new(), &settings);
//! writer.write_xml_declaration(None)?;
//! writer.write_start_element(QName::local("a"))?;
//! writer.start_element_content()?;
//!
//! writer.write_start_element(QName::local("b"))?;
//! writer.write_start_attribute(QName::local("id"))?;
//! writer.write_text("\"1\"")?;
//! writer.write_end_attribute()?;
//! writer.start_element_content()?;
//! writer.write_text("x")?;
//! writer.write_end_element(QName::local("b"))?;
//!
//! writer.write_end_element(QName::local("a"))?;
//!
//! let xml = writer.into_inner()?;
//! assert_eq!(
//!     std::str::from_utf8(&xml).unwrap(),
//!     "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
//!      <a>\n  \
//!        <b id=\"&quot;1&quot;\">x</b>\n\
//!      </a>"
//! );
//! # Ok::<(), xml_emit::Error>(())
//! ```

use std::io::Write;

use crate::errors::Result;
use crate::name::QName;
use crate::settings::{OutputMethod, WriterSettings};
use crate::validation::{combine_surrogates, decode_utf16};

#[cfg(feature = "async-tokio")]
mod async_tokio;
mod autodetect;
mod buffer;
mod cdata;
mod html;
mod raw;

#[cfg(feature = "async-tokio")]
pub use async_tokio::AsyncWriter;
pub use autodetect::AutoDetectWriter;
pub use buffer::{BUFFER_SIZE, OVERFLOW};
pub use cdata::CDataRouter;
pub use raw::RawWriter;

/// The low-level interface of all writers: one method per structural call.
///
/// All implementations render their input with the same rules, so the same
/// sequence of calls produces the same output regardless of how many
/// wrappers are stacked around the writer that does the rendering.
pub trait RawWrite {
    /// Writes the XML declaration `<?xml version="1.0" encoding="..."?>`,
    /// with `standalone="yes"` or `standalone="no"` if `standalone` is set.
    /// Not written if it is omitted by settings and in HTML output.
    fn write_xml_declaration(&mut self, standalone: Option<bool>) -> Result<()>;

    /// Writes the XML declaration with the given content between `<?xml` and
    /// `?>`. Not written if it is omitted by settings and in HTML output.
    fn write_xml_declaration_text(&mut self, text: &str) -> Result<()>;

    /// Writes a document type declaration. `public_id` is only written
    /// together with `system_id`, if the latter is missing, an empty system
    /// identifier is written.
    fn write_doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
        subset: Option<&str>,
    ) -> Result<()>;

    /// Writes the beginning of a start tag: `<name`.
    fn write_start_element(&mut self, name: QName) -> Result<()>;

    /// Writes a namespace declaration attribute `xmlns:prefix="namespace"`
    /// (or `xmlns="namespace"` for an empty prefix) into the current start tag.
    fn write_namespace_declaration(&mut self, prefix: &str, namespace: &str) -> Result<()>;

    /// Finishes the current start tag. All following calls up to the matching
    /// end tag write the content of the element.
    fn start_element_content(&mut self) -> Result<()>;

    /// Writes the end tag. An element without content is collapsed into an
    /// empty element tag (`<name />`) in XML output.
    fn write_end_element(&mut self, name: QName) -> Result<()>;

    /// Writes the end tag and never collapses the element.
    fn write_full_end_element(&mut self, name: QName) -> Result<()>;

    /// Writes the attribute name, `=` and the opening quote. Text written
    /// before [`write_end_attribute`](Self::write_end_attribute) is the value.
    fn write_start_attribute(&mut self, name: QName) -> Result<()>;

    /// Finishes the current attribute value.
    fn write_end_attribute(&mut self) -> Result<()>;

    /// Writes a CDATA section. `]]>` inside the text is split between two
    /// sections.
    fn write_cdata(&mut self, text: &str) -> Result<()>;

    /// Writes a comment. `--` inside the text is written as `- -`.
    fn write_comment(&mut self, text: &str) -> Result<()>;

    /// Writes a processing instruction. `?>` inside the content is written
    /// as `? >`.
    fn write_pi(&mut self, target: &str, content: &str) -> Result<()>;

    /// Writes an entity reference `&name;`.
    fn write_entity_ref(&mut self, name: &str) -> Result<()>;

    /// Writes a character reference `&#xHHHH;`.
    fn write_char_entity(&mut self, ch: char) -> Result<()>;

    /// Writes a character reference for the character encoded by a UTF-16
    /// surrogate pair.
    fn write_surrogate_char_entity(&mut self, low: u16, high: u16) -> Result<()> {
        let ch = combine_surrogates(high, low)?;
        self.write_char_entity(ch)
    }

    /// Writes whitespace. The text is escaped the same way as [`write_text`].
    ///
    /// [`write_text`]: Self::write_text
    fn write_whitespace(&mut self, ws: &str) -> Result<()>;

    /// Writes text: element content or a part of an attribute value,
    /// escaped as required by the context.
    fn write_text(&mut self, text: &str) -> Result<()>;

    /// Writes text given as UTF-16 code units. An unpaired surrogate is an
    /// error, and nothing is written in that case.
    fn write_chars(&mut self, units: &[u16]) -> Result<()> {
        let text = decode_utf16(units)?;
        self.write_text(&text)
    }

    /// Writes data as is, without any escaping or checks.
    fn write_raw(&mut self, data: &str) -> Result<()>;

    /// Writes binary data in base64. The data of consecutive calls forms one
    /// stream; [`write_end_base64`](Self::write_end_base64) must be called
    /// after the last piece.
    fn write_base64(&mut self, data: &[u8]) -> Result<()>;

    /// Finishes the base64 stream, writing the remaining bytes with padding.
    fn write_end_base64(&mut self) -> Result<()>;

    /// Writes binary data as uppercase hex digits.
    fn write_bin_hex(&mut self, data: &[u8]) -> Result<()>;

    /// Writes all buffered data to the sink and flushes it.
    fn flush(&mut self) -> Result<()>;

    /// Finishes the output. The writer should not be used after that.
    fn close(&mut self) -> Result<()>;
}

impl<'a, R: RawWrite + ?Sized> RawWrite for &'a mut R {
    #[inline]
    fn write_xml_declaration(&mut self, standalone: Option<bool>) -> Result<()> {
        (**self).write_xml_declaration(standalone)
    }
    #[inline]
    fn write_xml_declaration_text(&mut self, text: &str) -> Result<()> {
        (**self).write_xml_declaration_text(text)
    }
    #[inline]
    fn write_doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
        subset: Option<&str>,
    ) -> Result<()> {
        (**self).write_doctype(name, public_id, system_id, subset)
    }
    #[inline]
    fn write_start_element(&mut self, name: QName) -> Result<()> {
        (**self).write_start_element(name)
    }
    #[inline]
    fn write_namespace_declaration(&mut self, prefix: &str, namespace: &str) -> Result<()> {
        (**self).write_namespace_declaration(prefix, namespace)
    }
    #[inline]
    fn start_element_content(&mut self) -> Result<()> {
        (**self).start_element_content()
    }
    #[inline]
    fn write_end_element(&mut self, name: QName) -> Result<()> {
        (**self).write_end_element(name)
    }
    #[inline]
    fn write_full_end_element(&mut self, name: QName) -> Result<()> {
        (**self).write_full_end_element(name)
    }
    #[inline]
    fn write_start_attribute(&mut self, name: QName) -> Result<()> {
        (**self).write_start_attribute(name)
    }
    #[inline]
    fn write_end_attribute(&mut self) -> Result<()> {
        (**self).write_end_attribute()
    }
    #[inline]
    fn write_cdata(&mut self, text: &str) -> Result<()> {
        (**self).write_cdata(text)
    }
    #[inline]
    fn write_comment(&mut self, text: &str) -> Result<()> {
        (**self).write_comment(text)
    }
    #[inline]
    fn write_pi(&mut self, target: &str, content: &str) -> Result<()> {
        (**self).write_pi(target, content)
    }
    #[inline]
    fn write_entity_ref(&mut self, name: &str) -> Result<()> {
        (**self).write_entity_ref(name)
    }
    #[inline]
    fn write_char_entity(&mut self, ch: char) -> Result<()> {
        (**self).write_char_entity(ch)
    }
    #[inline]
    fn write_surrogate_char_entity(&mut self, low: u16, high: u16) -> Result<()> {
        (**self).write_surrogate_char_entity(low, high)
    }
    #[inline]
    fn write_whitespace(&mut self, ws: &str) -> Result<()> {
        (**self).write_whitespace(ws)
    }
    #[inline]
    fn write_text(&mut self, text: &str) -> Result<()> {
        (**self).write_text(text)
    }
    #[inline]
    fn write_chars(&mut self, units: &[u16]) -> Result<()> {
        (**self).write_chars(units)
    }
    #[inline]
    fn write_raw(&mut self, data: &str) -> Result<()> {
        (**self).write_raw(data)
    }
    #[inline]
    fn write_base64(&mut self, data: &[u8]) -> Result<()> {
        (**self).write_base64(data)
    }
    #[inline]
    fn write_end_base64(&mut self) -> Result<()> {
        (**self).write_end_base64()
    }
    #[inline]
    fn write_bin_hex(&mut self, data: &[u8]) -> Result<()> {
        (**self).write_bin_hex(data)
    }
    #[inline]
    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
    #[inline]
    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// The chain of writers selected by settings.
enum Pipeline<W: Write> {
    Raw(RawWriter<W>),
    AutoDetect(AutoDetectWriter<W>),
    Routed(CDataRouter<RawWriter<W>>),
    RoutedAutoDetect(CDataRouter<AutoDetectWriter<W>>),
}

/// Calls the same expression for the writer of any pipeline.
macro_rules! dispatch {
    ($pipeline:expr, $writer:ident => $call:expr) => {
        match $pipeline {
            Pipeline::Raw($writer) => $call,
            Pipeline::AutoDetect($writer) => $call,
            Pipeline::Routed($writer) => $call,
            Pipeline::RoutedAutoDetect($writer) => $call,
        }
    };
}

/// XML or HTML writer configured by [`WriterSettings`].
///
/// Depending on the settings, calls go through:
/// - a [`CDataRouter`], if CDATA section elements or a document type are
///   configured;
/// - an [`AutoDetectWriter`], if the output method is
///   [`AutoDetect`](OutputMethod::AutoDetect);
/// - a [`RawWriter`] which renders the output.
///
/// See the [module documentation](self) for an example.
pub struct Writer<W: Write> {
    pipeline: Pipeline<W>,
}

impl<W: Write> Writer<W> {
    /// Creates a writer with default settings: XML output in UTF-8 without
    /// indentation.
    pub fn new(sink: W) -> Self {
        Self::with_settings(sink, &WriterSettings::default())
    }

    /// Creates a writer configured by `settings`.
    pub fn with_settings(sink: W, settings: &WriterSettings) -> Self {
        let pipeline = match (settings.output_method, settings.requires_router()) {
            (OutputMethod::AutoDetect, false) => {
                Pipeline::AutoDetect(AutoDetectWriter::new(sink, settings))
            }
            (OutputMethod::AutoDetect, true) => Pipeline::RoutedAutoDetect(CDataRouter::new(
                AutoDetectWriter::new(sink, settings),
                settings,
            )),
            (_, false) => Pipeline::Raw(RawWriter::new(sink, settings)),
            (_, true) => {
                Pipeline::Routed(CDataRouter::new(RawWriter::new(sink, settings), settings))
            }
        };
        Self { pipeline }
    }

    /// Returns a reference to the sink.
    pub fn get_ref(&self) -> &W {
        match &self.pipeline {
            Pipeline::Raw(w) => w.get_ref(),
            Pipeline::AutoDetect(w) => w.get_ref(),
            Pipeline::Routed(w) => w.get_ref().get_ref(),
            Pipeline::RoutedAutoDetect(w) => w.get_ref().get_ref(),
        }
    }

    /// Returns a mutable reference to the sink. Writing directly into the
    /// sink while the writer has buffered data reorders the output.
    pub fn get_mut(&mut self) -> &mut W {
        match &mut self.pipeline {
            Pipeline::Raw(w) => w.get_mut(),
            Pipeline::AutoDetect(w) => w.get_mut(),
            Pipeline::Routed(w) => w.get_mut().get_mut(),
            Pipeline::RoutedAutoDetect(w) => w.get_mut().get_mut(),
        }
    }

    /// Flushes all buffered data and returns the sink.
    pub fn into_inner(self) -> Result<W> {
        match self.pipeline {
            Pipeline::Raw(w) => w.into_inner(),
            Pipeline::AutoDetect(w) => w.into_inner(),
            Pipeline::Routed(w) => w.into_inner()?.into_inner(),
            Pipeline::RoutedAutoDetect(w) => w.into_inner()?.into_inner(),
        }
    }
}

impl<W: Write> RawWrite for Writer<W> {
    fn write_xml_declaration(&mut self, standalone: Option<bool>) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_xml_declaration(standalone))
    }
    fn write_xml_declaration_text(&mut self, text: &str) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_xml_declaration_text(text))
    }
    fn write_doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
        subset: Option<&str>,
    ) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_doctype(name, public_id, system_id, subset))
    }
    fn write_start_element(&mut self, name: QName) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_start_element(name))
    }
    fn write_namespace_declaration(&mut self, prefix: &str, namespace: &str) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_namespace_declaration(prefix, namespace))
    }
    fn start_element_content(&mut self) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.start_element_content())
    }
    fn write_end_element(&mut self, name: QName) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_end_element(name))
    }
    fn write_full_end_element(&mut self, name: QName) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_full_end_element(name))
    }
    fn write_start_attribute(&mut self, name: QName) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_start_attribute(name))
    }
    fn write_end_attribute(&mut self) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_end_attribute())
    }
    fn write_cdata(&mut self, text: &str) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_cdata(text))
    }
    fn write_comment(&mut self, text: &str) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_comment(text))
    }
    fn write_pi(&mut self, target: &str, content: &str) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_pi(target, content))
    }
    fn write_entity_ref(&mut self, name: &str) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_entity_ref(name))
    }
    fn write_char_entity(&mut self, ch: char) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_char_entity(ch))
    }
    fn write_surrogate_char_entity(&mut self, low: u16, high: u16) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_surrogate_char_entity(low, high))
    }
    fn write_whitespace(&mut self, ws: &str) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_whitespace(ws))
    }
    fn write_text(&mut self, text: &str) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_text(text))
    }
    fn write_chars(&mut self, units: &[u16]) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_chars(units))
    }
    fn write_raw(&mut self, data: &str) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_raw(data))
    }
    fn write_base64(&mut self, data: &[u8]) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_base64(data))
    }
    fn write_end_base64(&mut self) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_end_base64())
    }
    fn write_bin_hex(&mut self, data: &[u8]) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.write_bin_hex(data))
    }
    fn flush(&mut self) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.flush())
    }
    fn close(&mut self) -> Result<()> {
        dispatch!(&mut self.pipeline, w => w.close())
    }
}

impl<W: Write> std::fmt::Debug for Writer<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let kind = match &self.pipeline {
            Pipeline::Raw(_) => "Raw",
            Pipeline::AutoDetect(_) => "AutoDetect",
            Pipeline::Routed(_) => "Routed",
            Pipeline::RoutedAutoDetect(_) => "RoutedAutoDetect",
        };
        f.debug_struct("Writer").field("pipeline", &kind).finish()
    }
}
