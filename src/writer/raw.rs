//! The writer that renders calls into text.

use std::io::Write;

use crate::binary::{Base64Encoder, BinHexEncoder};
use crate::encoding::OutputEncoding;
use crate::errors::{CharError, Error, Result};
use crate::escape::{Chunk, EscapeContext, Escaper};
use crate::name::QName;
use crate::settings::{OutputMethod, WriterSettings};
use crate::utils::BitStack;
use crate::validation::is_xml_char;
use crate::writer::buffer::{Mark, OutputBuffer};
use crate::writer::html::HtmlState;
use crate::writer::RawWrite;

/// Which rules are used to render markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Flavor {
    Xml,
    Html,
}

/// Indentation settings.
#[derive(Clone, Debug)]
pub(super) struct Indent {
    /// One level of indentation
    pub chars: String,
    /// Put each attribute on its own line
    pub on_attributes: bool,
}

/// A writer that renders calls into XML or HTML text.
///
/// Output is collected in a buffer of [`BUFFER_SIZE`] bytes which is written
/// to the sink when it is full, on [`flush`], [`close`] and
/// [`into_inner`](Self::into_inner). Data that is still in the buffer when
/// the writer is dropped is lost.
///
/// ```
/// # use pretty_assertions::assert_eq;
/// use xml_emit::name::QName;
/// use xml_emit::settings::{OutputMethod, WriterSettings};
/// use xml_emit::writer::{RawWrite, RawWriter};
///
/// let settings = WriterSettings {
///     output_method: OutputMethod::Html,
///     ..WriterSettings::default()
/// };
/// let mut writer = RawWriter::new(Vec::new(), &settings);
/// writer.write_start_element(QName::local("input"))?;
/// writer.write_start_attribute(QName::local("checked"))?;
/// writer.write_text("checked")?;
/// writer.write_end_attribute()?;
/// writer.start_element_content()?;
/// writer.write_end_element(QName::local("input"))?;
///
/// assert_eq!(writer.into_inner()?, b"<input checked>");
/// # Ok::<(), xml_emit::Error>(())
/// ```
///
/// [`BUFFER_SIZE`]: crate::writer::BUFFER_SIZE
/// [`flush`]: RawWrite::flush
/// [`close`]: RawWrite::close
pub struct RawWriter<W> {
    pub(super) buf: OutputBuffer<W>,
    pub(super) flavor: Flavor,
    pub(super) html: HtmlState,
    pub(super) escaper: Escaper,
    check_characters: bool,
    omit_xml_declaration: bool,
    merge_cdata: bool,
    /// Top-level elements start with non-mixed content
    document: bool,
    pub(super) encoding: OutputEncoding,
    /// Replacement for line breaks in text content
    new_line: String,
    pub(super) indent: Option<Indent>,
    /// Number of open elements
    pub(super) indent_level: usize,
    /// Content of the current element contains text, so no indentation
    /// can be inserted into it
    mixed: bool,
    /// `mixed` flags of the parent elements
    mixed_stack: BitStack,
    pub(super) in_attribute: bool,
    base64: Base64Encoder,
    bin_hex: BinHexEncoder,
}

impl<W> RawWriter<W> {
    /// Creates a writer configured by `settings`. An [`AutoDetect`] output
    /// method produces XML.
    ///
    /// [`AutoDetect`]: OutputMethod::AutoDetect
    pub fn new(sink: W, settings: &WriterSettings) -> Self {
        let encoding = OutputEncoding::for_label(&settings.encoding);
        let flavor = match settings.output_method {
            OutputMethod::Html => Flavor::Html,
            OutputMethod::Xml | OutputMethod::AutoDetect => Flavor::Xml,
        };
        Self {
            buf: OutputBuffer::new(sink, encoding),
            flavor,
            html: HtmlState::new(settings),
            escaper: Escaper {
                ascii_only: !encoding.is_utf8(),
                quote: settings.quote_char,
                new_lines: settings.new_line_handling,
            },
            check_characters: settings.check_characters,
            omit_xml_declaration: settings.omit_xml_declaration,
            merge_cdata: settings.merge_cdata_sections,
            document: settings.conformance_level.is_document(),
            encoding,
            new_line: settings.new_line_chars.clone(),
            indent: settings.indent.then(|| Indent {
                chars: settings.indent_chars.clone(),
                on_attributes: settings.new_line_on_attributes,
            }),
            indent_level: 0,
            mixed: false,
            mixed_stack: BitStack::new(),
            in_attribute: false,
            base64: Base64Encoder::new(),
            bin_hex: BinHexEncoder::new(),
        }
    }

    /// Returns `true` if the writer produces HTML.
    #[inline]
    pub fn is_html(&self) -> bool {
        self.flavor == Flavor::Html
    }

    /// Switches the writer to HTML output. Must be called before anything
    /// is written.
    pub(crate) fn use_html(&mut self) {
        debug_assert_eq!(self.indent_level, 0);
        self.flavor = Flavor::Html;
    }

    /// Returns a reference to the sink.
    #[inline]
    pub fn get_ref(&self) -> &W {
        self.buf.get_ref()
    }

    /// Returns a mutable reference to the sink. Writing directly into the
    /// sink while the writer has buffered data reorders the output.
    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        self.buf.get_mut()
    }
}

impl<W: Write> RawWriter<W> {
    /// Flushes all buffered data and returns the sink.
    pub fn into_inner(mut self) -> Result<W> {
        self.buf.flush()?;
        Ok(self.buf.into_sink())
    }

    /// Writes a line break and `level` indentation units. Does nothing if
    /// indentation is disabled.
    pub(super) fn write_indent(&mut self, level: usize) -> Result<()> {
        if let Some(indent) = &self.indent {
            self.buf.push_str(&self.new_line)?;
            for _ in 0..level {
                self.buf.push_str(&indent.chars)?;
            }
        }
        Ok(())
    }

    /// Writes text escaped as required by the context.
    pub(super) fn write_escaped(&mut self, text: &str, context: EscapeContext) -> Result<()> {
        for chunk in self.escaper.chunks(text, context) {
            match chunk {
                Chunk::Literal(s) => self.buf.push_str(s)?,
                Chunk::Entity(e) => self.buf.push_small(e)?,
                Chunk::CharRef(ch) => self.buf.push_char_ref(ch)?,
                Chunk::NewLine => self.buf.push_str(&self.new_line)?,
                Chunk::Percent(ch) => self.buf.push_percent_encoded(ch)?,
                Chunk::TrailingAmp => self.html.pending_amp = true,
                Chunk::Invalid(ch) if self.check_characters => {
                    return Err(Error::MalformedChar(CharError::InvalidXmlChar(ch)));
                }
                Chunk::Invalid(ch) if context == EscapeContext::Raw => self.buf.push(ch)?,
                Chunk::Invalid(ch) => self.buf.push_char_ref(ch)?,
            }
        }
        Ok(())
    }

    /// Writes text that cannot contain references, checking that its
    /// characters are allowed in XML.
    #[inline]
    pub(super) fn write_checked(&mut self, text: &str) -> Result<()> {
        self.write_escaped(text, EscapeContext::Raw)
    }

    /// Writes the content of a comment (`stop == b'-'`) or a processing
    /// instruction (`stop == b'?'`), inserting spaces so that the content
    /// cannot end the markup early.
    pub(super) fn write_comment_or_pi(&mut self, text: &str, stop: u8) -> Result<()> {
        let bytes = text.as_bytes();
        let mut start = 0;
        for i in memchr::memchr_iter(stop, bytes) {
            let next = bytes.get(i + 1).copied();
            let split = match stop {
                b'-' => next.is_none() || next == Some(b'-'),
                _ => next == Some(b'>'),
            };
            if split {
                self.write_checked(&text[start..=i])?;
                self.buf.push(' ')?;
                start = i + 1;
            }
        }
        self.write_checked(&text[start..])
    }

    /// Marks the content of the current element as mixed and remembers the
    /// end of the text.
    #[inline]
    pub(super) fn text_written(&mut self) {
        if !self.in_attribute {
            self.mixed = true;
            self.buf.mark(Mark::TextEnd);
        }
    }

    /// Writes indentation before markup which is not text, unless the
    /// current element contains text.
    fn indent_markup(&mut self) -> Result<()> {
        if self.indent.is_some() && !self.mixed && !self.buf.at(Mark::TextEnd) {
            self.write_indent(self.indent_level)?;
        }
        Ok(())
    }

    /// Writes a qualified name as it appears in markup.
    pub(super) fn write_qname(&mut self, name: QName) -> Result<()> {
        if name.has_prefix() {
            self.buf.push_str(name.prefix)?;
            self.buf.push(':')?;
        }
        self.buf.push_str(name.local)
    }

    /// Writes the separator before an attribute: a line break if attributes
    /// are written on their own lines, or a space.
    pub(super) fn write_attribute_separator(&mut self) -> Result<()> {
        if matches!(&self.indent, Some(indent) if indent.on_attributes) {
            self.write_indent(self.indent_level)?;
        }
        if self.buf.at(Mark::AttributeEnd) {
            self.buf.push(' ')?;
        }
        Ok(())
    }

    /// Writes `="` (or `='`) after an attribute name.
    #[inline]
    pub(super) fn open_attribute_value(&mut self) -> Result<()> {
        self.buf.push('=')?;
        self.buf.push(self.escaper.quote.as_char())?;
        self.in_attribute = true;
        Ok(())
    }

    pub(super) fn xml_start_element(&mut self, name: QName) -> Result<()> {
        self.indent_markup()?;
        self.indent_level += 1;
        self.mixed_stack.push(self.mixed);

        self.buf.push('<')?;
        self.write_qname(name)?;
        self.buf.mark(Mark::AttributeEnd);
        Ok(())
    }

    pub(super) fn xml_start_element_content(&mut self) -> Result<()> {
        self.buf.push('>')?;
        self.buf.mark(Mark::ContentStart);
        self.mixed = if self.indent_level == 1 && self.document {
            false
        } else {
            self.mixed_stack.peek()
        };
        Ok(())
    }

    /// Writes an XML end tag, collapsing the element if `collapse` is set
    /// and the element is empty.
    pub(super) fn xml_end_element(&mut self, name: QName, collapse: bool) -> Result<()> {
        self.indent_level = self.indent_level.saturating_sub(1);
        let empty = self.buf.at(Mark::ContentStart);
        if self.indent.is_some() && !self.mixed && !empty && !self.buf.at(Mark::TextEnd) {
            self.write_indent(self.indent_level)?;
        }
        if collapse && empty && self.buf.pop_suffix(">") {
            self.buf.push_small(" />")?;
        } else {
            self.buf.push_small("</")?;
            self.write_qname(name)?;
            self.buf.push('>')?;
        }
        self.mixed = self.mixed_stack.pop();
        Ok(())
    }

    pub(super) fn xml_start_attribute(&mut self, name: QName) -> Result<()> {
        self.write_attribute_separator()?;
        self.write_qname(name)?;
        self.open_attribute_value()
    }

    pub(super) fn close_attribute_value(&mut self) -> Result<()> {
        self.buf.push(self.escaper.quote.as_char())?;
        self.in_attribute = false;
        self.buf.mark(Mark::AttributeEnd);
        Ok(())
    }

    fn write_xml_cdata(&mut self, text: &str) -> Result<()> {
        // continue the previous section if nothing was written after it
        let merged = self.merge_cdata
            && self.buf.at(Mark::CDataEnd)
            && self.buf.pop_suffix("]]>");
        if !merged {
            self.buf.push_small("<![CDATA[")?;
        }
        let mut start = 0;
        for i in memchr::memmem::find_iter(text.as_bytes(), b"]]>") {
            self.write_checked(&text[start..i + 2])?;
            self.buf.push_small("]]><![CDATA[")?;
            start = i + 2;
        }
        self.write_checked(&text[start..])?;
        self.buf.push_small("]]>")?;
        self.buf.mark(Mark::CDataEnd);
        Ok(())
    }
}

impl<W: Write> RawWrite for RawWriter<W> {
    fn write_xml_declaration(&mut self, standalone: Option<bool>) -> Result<()> {
        if self.omit_xml_declaration || self.is_html() {
            return Ok(());
        }
        self.buf.push_str("<?xml version=\"1.0\" encoding=\"")?;
        self.buf.push_str(&self.encoding.name())?;
        match standalone {
            Some(true) => self.buf.push_str("\" standalone=\"yes")?,
            Some(false) => self.buf.push_str("\" standalone=\"no")?,
            None => {}
        }
        self.buf.push_small("\"?>")
    }

    fn write_xml_declaration_text(&mut self, text: &str) -> Result<()> {
        if self.omit_xml_declaration || self.is_html() {
            return Ok(());
        }
        self.write_pi("xml", text)
    }

    fn write_doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
        subset: Option<&str>,
    ) -> Result<()> {
        if !self.is_html() {
            self.indent_markup()?;
        }
        self.buf.push_str("<!DOCTYPE ")?;
        self.buf.push_str(name)?;
        match (public_id, system_id) {
            (Some(public_id), system_id) => {
                self.buf.push_str(" PUBLIC \"")?;
                self.buf.push_str(public_id)?;
                self.buf.push_str("\" \"")?;
                self.buf.push_str(system_id.unwrap_or(""))?;
                self.buf.push('"')?;
            }
            (None, Some(system_id)) => {
                self.buf.push_str(" SYSTEM \"")?;
                self.buf.push_str(system_id)?;
                self.buf.push('"')?;
            }
            (None, None) => {}
        }
        if let Some(subset) = subset {
            self.buf.push_str(" [")?;
            self.buf.push_str(subset)?;
            self.buf.push(']')?;
        }
        self.buf.push('>')?;
        if self.is_html() {
            self.buf.mark(Mark::BlockEnd);
        }
        Ok(())
    }

    fn write_start_element(&mut self, name: QName) -> Result<()> {
        match self.flavor {
            Flavor::Xml => self.xml_start_element(name),
            Flavor::Html => self.html_start_element(name),
        }
    }

    fn write_namespace_declaration(&mut self, prefix: &str, namespace: &str) -> Result<()> {
        if prefix.is_empty() {
            self.buf.push_str(" xmlns")?;
        } else {
            self.buf.push_str(" xmlns:")?;
            self.buf.push_str(prefix)?;
        }
        self.open_attribute_value()?;
        self.write_escaped(namespace, EscapeContext::Attribute)?;
        self.close_attribute_value()
    }

    fn start_element_content(&mut self) -> Result<()> {
        match self.flavor {
            Flavor::Xml => self.xml_start_element_content(),
            Flavor::Html => self.html_start_element_content(),
        }
    }

    fn write_end_element(&mut self, name: QName) -> Result<()> {
        match self.flavor {
            Flavor::Xml => self.xml_end_element(name, true),
            Flavor::Html => self.html_end_element(name),
        }
    }

    fn write_full_end_element(&mut self, name: QName) -> Result<()> {
        match self.flavor {
            Flavor::Xml => self.xml_end_element(name, false),
            Flavor::Html => self.html_end_element(name),
        }
    }

    fn write_start_attribute(&mut self, name: QName) -> Result<()> {
        match self.flavor {
            Flavor::Xml => self.xml_start_attribute(name),
            Flavor::Html => self.html_start_attribute(name),
        }
    }

    fn write_end_attribute(&mut self) -> Result<()> {
        match self.flavor {
            Flavor::Xml => self.close_attribute_value(),
            Flavor::Html => self.html_end_attribute(),
        }
    }

    fn write_cdata(&mut self, text: &str) -> Result<()> {
        match self.flavor {
            Flavor::Xml => self.write_xml_cdata(text)?,
            Flavor::Html => self.write_checked(text)?,
        }
        self.text_written();
        Ok(())
    }

    fn write_comment(&mut self, text: &str) -> Result<()> {
        if !self.is_html() {
            self.indent_markup()?;
        }
        self.buf.push_small("<!--")?;
        self.write_comment_or_pi(text, b'-')?;
        self.buf.push_small("-->")
    }

    fn write_pi(&mut self, target: &str, content: &str) -> Result<()> {
        if !self.is_html() {
            self.indent_markup()?;
        }
        self.buf.push_small("<?")?;
        self.buf.push_str(target)?;
        if !content.is_empty() {
            self.buf.push(' ')?;
            self.write_comment_or_pi(content, b'?')?;
        }
        match self.flavor {
            Flavor::Xml => self.buf.push_small("?>"),
            Flavor::Html => self.buf.push('>'),
        }
    }

    fn write_entity_ref(&mut self, name: &str) -> Result<()> {
        self.resolve_pending_amp("")?;
        self.buf.push('&')?;
        self.buf.push_str(name)?;
        self.buf.push(';')?;
        self.text_written();
        Ok(())
    }

    fn write_char_entity(&mut self, ch: char) -> Result<()> {
        if self.check_characters && !is_xml_char(ch) {
            return Err(Error::MalformedChar(CharError::InvalidXmlChar(ch)));
        }
        self.resolve_pending_amp("")?;
        self.buf.push_char_ref(ch)?;
        self.text_written();
        Ok(())
    }

    fn write_whitespace(&mut self, ws: &str) -> Result<()> {
        self.write_text(ws)
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.in_attribute {
            return match self.flavor {
                Flavor::Xml => self.write_escaped(text, EscapeContext::Attribute),
                Flavor::Html => self.html_attribute_text(text),
            };
        }
        match self.flavor {
            Flavor::Xml => self.write_escaped(text, EscapeContext::Content)?,
            Flavor::Html => self.html_element_text(text)?,
        }
        self.text_written();
        Ok(())
    }

    fn write_raw(&mut self, data: &str) -> Result<()> {
        self.buf.push_str(data)?;
        self.text_written();
        Ok(())
    }

    fn write_base64(&mut self, data: &[u8]) -> Result<()> {
        let buf = &mut self.buf;
        self.base64.encode(data, |chunk| buf.push_str(chunk))?;
        self.text_written();
        Ok(())
    }

    fn write_end_base64(&mut self) -> Result<()> {
        if self.base64.has_carry() {
            let buf = &mut self.buf;
            self.base64.flush(|chunk| buf.push_str(chunk))?;
            self.text_written();
        }
        Ok(())
    }

    fn write_bin_hex(&mut self, data: &[u8]) -> Result<()> {
        let buf = &mut self.buf;
        self.bin_hex.encode(data, |chunk| buf.push_str(chunk))?;
        self.text_written();
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.buf.flush()
    }

    fn close(&mut self) -> Result<()> {
        log::debug!("closing {:?} writer at nesting level {}", self.flavor, self.indent_level);
        self.write_end_base64()?;
        self.buf.flush()
    }
}

impl<W> std::fmt::Debug for RawWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("RawWriter")
            .field("flavor", &self.flavor)
            .field("encoding", &self.encoding)
            .field("indent_level", &self.indent_level)
            .field("buf", &self.buf)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{ConformanceLevel, NewLineHandling, QuoteChar};
    use pretty_assertions::assert_eq;

    fn render<F>(settings: &WriterSettings, write: F) -> String
    where
        F: FnOnce(&mut RawWriter<Vec<u8>>) -> Result<()>,
    {
        let mut writer = RawWriter::new(Vec::new(), settings);
        write(&mut writer).unwrap();
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    fn element(w: &mut RawWriter<Vec<u8>>, name: &str, text: &str) -> Result<()> {
        w.write_start_element(QName::local(name))?;
        w.start_element_content()?;
        w.write_text(text)?;
        w.write_end_element(QName::local(name))
    }

    mod elements {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn empty_collapses() {
            let xml = render(&WriterSettings::default(), |w| {
                w.write_start_element(QName::local("a"))?;
                w.start_element_content()?;
                w.write_end_element(QName::local("a"))
            });
            assert_eq!(xml, "<a />");
        }

        #[test]
        fn full_end_does_not_collapse() {
            let xml = render(&WriterSettings::default(), |w| {
                w.write_start_element(QName::local("a"))?;
                w.start_element_content()?;
                w.write_full_end_element(QName::local("a"))
            });
            assert_eq!(xml, "<a></a>");
        }

        #[test]
        fn prefixed() {
            let xml = render(&WriterSettings::default(), |w| {
                let name = QName::new("x", "a", "urn:x");
                w.write_start_element(name)?;
                w.write_namespace_declaration("x", "urn:x")?;
                w.write_namespace_declaration("", "urn:default")?;
                w.start_element_content()?;
                w.write_text("1 < 2 & 3 > 2")?;
                w.write_end_element(name)
            });
            assert_eq!(
                xml,
                r#"<x:a xmlns:x="urn:x" xmlns="urn:default">1 &lt; 2 &amp; 3 &gt; 2</x:a>"#
            );
        }

        #[test]
        fn attributes() {
            let xml = render(&WriterSettings::default(), |w| {
                w.write_start_element(QName::local("a"))?;
                w.write_start_attribute(QName::local("x"))?;
                w.write_text("\"it's\"\r\n\t<&>")?;
                w.write_end_attribute()?;
                w.write_start_attribute(QName::new("p", "y", "urn:p"))?;
                w.write_text("1")?;
                w.write_text("2")?;
                w.write_end_attribute()?;
                w.start_element_content()?;
                w.write_end_element(QName::local("a"))
            });
            assert_eq!(
                xml,
                "<a x=\"&quot;it's&quot;&#xD;&#xA;\t&lt;&amp;&gt;\" p:y=\"12\" />"
            );
        }

        #[test]
        fn single_quotes() {
            let settings = WriterSettings {
                quote_char: QuoteChar::Single,
                ..WriterSettings::default()
            };
            let xml = render(&settings, |w| {
                w.write_start_element(QName::local("a"))?;
                w.write_start_attribute(QName::local("x"))?;
                w.write_text("\"it's\"")?;
                w.write_end_attribute()?;
                w.start_element_content()?;
                w.write_end_element(QName::local("a"))
            });
            assert_eq!(xml, "<a x='\"it&apos;s\"' />");
        }
    }

    mod markup {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn declaration() {
            let xml = render(&WriterSettings::default(), |w| {
                w.write_xml_declaration(Some(true))
            });
            assert_eq!(
                xml,
                r#"<?xml version="1.0" encoding="utf-8" standalone="yes"?>"#
            );

            let xml = render(&WriterSettings::default(), |w| {
                w.write_xml_declaration_text("version=\"1.0\"")
            });
            assert_eq!(xml, r#"<?xml version="1.0"?>"#);

            let settings = WriterSettings {
                omit_xml_declaration: true,
                ..WriterSettings::default()
            };
            let xml = render(&settings, |w| {
                w.write_xml_declaration(None)?;
                w.write_xml_declaration_text("version=\"1.0\"")
            });
            assert_eq!(xml, "");
        }

        #[test]
        fn doctype() {
            let xml = render(&WriterSettings::default(), |w| {
                w.write_doctype("a", Some("-//A//EN"), Some("a.dtd"), None)?;
                w.write_doctype("b", None, Some("b.dtd"), Some("<!ENTITY e 'x'>"))?;
                w.write_doctype("c", Some("-//C//EN"), None, None)?;
                w.write_doctype("d", None, None, None)
            });
            assert_eq!(
                xml,
                "<!DOCTYPE a PUBLIC \"-//A//EN\" \"a.dtd\">\
                 <!DOCTYPE b SYSTEM \"b.dtd\" [<!ENTITY e 'x'>]>\
                 <!DOCTYPE c PUBLIC \"-//C//EN\" \"\">\
                 <!DOCTYPE d>"
            );
        }

        #[test]
        fn comments() {
            let xml = render(&WriterSettings::default(), |w| {
                w.write_comment("a--b")?;
                w.write_comment("a---b")?;
                w.write_comment("trailing-")?;
                w.write_comment("")
            });
            assert_eq!(
                xml,
                "<!--a- -b--><!--a- - -b--><!--trailing- --><!---->"
            );
        }

        #[test]
        fn processing_instructions() {
            let xml = render(&WriterSettings::default(), |w| {
                w.write_pi("target", "a?>b")?;
                w.write_pi("empty", "")
            });
            assert_eq!(xml, "<?target a? >b?><?empty?>");
        }

        #[test]
        fn cdata() {
            let xml = render(&WriterSettings::default(), |w| {
                w.write_cdata("a]]>b")?;
                w.write_cdata("<&>")
            });
            assert_eq!(
                xml,
                "<![CDATA[a]]]]><![CDATA[>b]]><![CDATA[<&>]]>"
            );
        }

        #[test]
        fn merged_cdata() {
            let settings = WriterSettings {
                merge_cdata_sections: true,
                ..WriterSettings::default()
            };
            let xml = render(&settings, |w| {
                w.write_cdata("a")?;
                w.write_cdata("b")?;
                w.write_text("c")?;
                w.write_cdata("d")
            });
            assert_eq!(xml, "<![CDATA[ab]]>c<![CDATA[d]]>");
        }

        #[test]
        fn references() {
            let xml = render(&WriterSettings::default(), |w| {
                w.write_entity_ref("nbsp")?;
                w.write_char_entity('\u{A0}')?;
                w.write_surrogate_char_entity(0xDE00, 0xD83D)
            });
            assert_eq!(xml, "&nbsp;&#xA0;&#x1F600;");
        }

        #[test]
        fn raw() {
            let xml = render(&WriterSettings::default(), |w| w.write_raw("<not&escaped>"));
            assert_eq!(xml, "<not&escaped>");
        }
    }

    mod characters {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn invalid_is_error() {
            let mut writer = RawWriter::new(Vec::new(), &WriterSettings::default());
            match writer.write_text("a\u{1}b") {
                Err(Error::MalformedChar(CharError::InvalidXmlChar('\u{1}'))) => {}
                x => panic!("expected InvalidXmlChar, got {:?}", x),
            }
            match writer.write_char_entity('\u{FFFE}') {
                Err(Error::MalformedChar(CharError::InvalidXmlChar('\u{FFFE}'))) => {}
                x => panic!("expected InvalidXmlChar, got {:?}", x),
            }
            match writer.write_comment("\u{0}") {
                Err(Error::MalformedChar(CharError::InvalidXmlChar('\u{0}'))) => {}
                x => panic!("expected InvalidXmlChar, got {:?}", x),
            }
        }

        #[test]
        fn invalid_as_reference() {
            let settings = WriterSettings {
                check_characters: false,
                ..WriterSettings::default()
            };
            let xml = render(&settings, |w| w.write_text("a\u{1}b"));
            assert_eq!(xml, "a&#x1;b");
        }

        #[test]
        fn utf16() {
            let xml = render(&WriterSettings::default(), |w| {
                let units: Vec<u16> = "\u{1F600}<".encode_utf16().collect();
                w.write_chars(&units)
            });
            assert_eq!(xml, "\u{1F600}&lt;");

            let mut writer = RawWriter::new(Vec::new(), &WriterSettings::default());
            match writer.write_chars(&[0x61, 0xD83D]) {
                Err(Error::MalformedChar(CharError::UnpairedSurrogate(0xD83D))) => {}
                x => panic!("expected UnpairedSurrogate, got {:?}", x),
            }
            match writer.write_surrogate_char_entity(0xD83D, 0xDE00) {
                Err(Error::MalformedChar(CharError::UnpairedSurrogate(_))) => {}
                x => panic!("expected UnpairedSurrogate, got {:?}", x),
            }
            // nothing was written by failed calls
            assert_eq!(writer.into_inner().unwrap(), b"");
        }

        #[test]
        fn new_lines() {
            let text = "a\r\nb\rc\nd";
            let xml = render(&WriterSettings::default(), |w| w.write_text(text));
            assert_eq!(xml, text);

            let settings = WriterSettings {
                new_line_handling: NewLineHandling::Replace,
                new_line_chars: "\r\n".into(),
                ..WriterSettings::default()
            };
            let xml = render(&settings, |w| w.write_text(text));
            assert_eq!(xml, "a\r\nb\r\nc\r\nd");

            let settings = WriterSettings {
                new_line_handling: NewLineHandling::Entitize,
                ..WriterSettings::default()
            };
            let xml = render(&settings, |w| w.write_text(text));
            assert_eq!(xml, "a&#xD;\nb&#xD;c\nd");
        }
    }

    mod binary {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn base64() {
            let xml = render(&WriterSettings::default(), |w| {
                w.write_start_element(QName::local("a"))?;
                w.start_element_content()?;
                w.write_base64(b"Ma")?;
                w.write_base64(b"n")?;
                w.write_base64(b"Ma")?;
                w.write_end_base64()?;
                w.write_end_element(QName::local("a"))
            });
            assert_eq!(xml, "<a>TWFuTWE=</a>");
        }

        #[test]
        fn bin_hex() {
            let xml = render(&WriterSettings::default(), |w| {
                w.write_bin_hex(&[0x00, 0xAB])?;
                w.write_bin_hex(&[0xFF])
            });
            assert_eq!(xml, "00ABFF");
        }

        #[test]
        fn close_flushes_base64() {
            let mut writer = RawWriter::new(Vec::new(), &WriterSettings::default());
            writer.write_base64(b"M").unwrap();
            writer.close().unwrap();
            assert_eq!(writer.get_ref(), b"TQ==");
        }
    }

    mod indent {
        use super::*;
        use pretty_assertions::assert_eq;

        fn indented() -> WriterSettings {
            WriterSettings {
                indent: true,
                ..WriterSettings::default()
            }
        }

        #[test]
        fn nested() {
            let xml = render(&indented(), |w| {
                w.write_start_element(QName::local("a"))?;
                w.start_element_content()?;
                element(w, "b", "x")?;
                w.write_start_element(QName::local("c"))?;
                w.start_element_content()?;
                w.write_comment("note")?;
                w.write_end_element(QName::local("c"))?;
                w.write_end_element(QName::local("a"))
            });
            assert_eq!(
                xml,
                "<a>\n  <b>x</b>\n  <c>\n    <!--note-->\n  </c>\n</a>"
            );
        }

        #[test]
        fn mixed_content_is_not_indented() {
            let xml = render(&indented(), |w| {
                w.write_start_element(QName::local("p"))?;
                w.start_element_content()?;
                w.write_text("a")?;
                element(w, "b", "x")?;
                w.write_text("c")?;
                w.write_end_element(QName::local("p"))
            });
            assert_eq!(xml, "<p>a<b>x</b>c</p>");
        }

        #[test]
        fn empty_elements() {
            let xml = render(&indented(), |w| {
                w.write_start_element(QName::local("a"))?;
                w.start_element_content()?;
                w.write_start_element(QName::local("b"))?;
                w.start_element_content()?;
                w.write_end_element(QName::local("b"))?;
                w.write_end_element(QName::local("a"))
            });
            assert_eq!(xml, "<a>\n  <b />\n</a>");
        }

        #[test]
        fn attributes_on_new_lines() {
            let settings = WriterSettings {
                indent: true,
                new_line_on_attributes: true,
                indent_chars: "\t".into(),
                ..WriterSettings::default()
            };
            let xml = render(&settings, |w| {
                w.write_start_element(QName::local("a"))?;
                for name in ["x", "y"] {
                    w.write_start_attribute(QName::local(name))?;
                    w.write_text("1")?;
                    w.write_end_attribute()?;
                }
                w.start_element_content()?;
                w.write_end_element(QName::local("a"))
            });
            assert_eq!(xml, "<a\n\tx=\"1\"\n\ty=\"1\" />");
        }

        /// Text between top-level fragments makes the following fragment mixed
        #[test]
        fn fragment_inherits_mixed() {
            let fragment = WriterSettings {
                conformance_level: ConformanceLevel::Fragment,
                ..indented()
            };
            let write = |w: &mut RawWriter<Vec<u8>>| {
                w.write_text("t")?;
                w.write_start_element(QName::local("a"))?;
                w.start_element_content()?;
                element(w, "b", "x")?;
                w.write_end_element(QName::local("a"))
            };
            assert_eq!(render(&fragment, write), "t<a><b>x</b></a>");
            assert_eq!(render(&indented(), write), "t<a>\n  <b>x</b>\n</a>");
        }
    }
}
