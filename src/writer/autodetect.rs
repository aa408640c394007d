//! Selection of the output method by the first element of the document.

use std::io::Write;
use std::mem::take;

use crate::events::{Event, EventLog};
use crate::name::QName;
use crate::settings::WriterSettings;
use crate::validation::is_whitespace;
use crate::writer::{RawWrite, RawWriter};
use crate::Result;

/// Calls recorded before the output method is known.
#[derive(Debug, Default)]
struct Pending {
    log: EventLog,
    /// Text of consecutive whitespace-only text calls, not yet moved into
    /// the log
    text: String,
}

impl Pending {
    fn push(&mut self, event: Event) {
        self.flush_text();
        self.log.push(event);
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.log.push(Event::Text(take(&mut self.text)));
        }
    }
}

/// A writer which produces HTML if the first element of the document is
/// `<html>` (in any case and without a namespace), and XML otherwise.
///
/// Until the first element is written, all calls are recorded. When the
/// decision is made, they are replayed into a [`RawWriter`] of the selected
/// flavor, and all following calls go directly to that writer. The output is
/// therefore the same as if the right writer was used from the start.
///
/// Only declarations, comments, processing instructions and whitespace can
/// precede the root of an HTML document. Any other content written before
/// the first element (text that is not whitespace, CDATA, references, raw
/// or binary data) selects XML immediately. Flushing, closing or dropping
/// the writer before any element is written also selects XML.
///
/// ```
/// # use pretty_assertions::assert_eq;
/// use xml_emit::name::QName;
/// use xml_emit::settings::WriterSettings;
/// use xml_emit::writer::{AutoDetectWriter, RawWrite};
///
/// let mut writer = AutoDetectWriter::new(Vec::new(), &WriterSettings::default());
/// writer.write_comment("page")?;
/// writer.write_start_element(QName::local("HTML"))?;
/// writer.start_element_content()?;
/// writer.write_start_element(QName::local("br"))?;
/// writer.start_element_content()?;
/// writer.write_end_element(QName::local("br"))?;
/// writer.write_end_element(QName::local("HTML"))?;
///
/// assert!(writer.is_html() == Some(true));
/// assert_eq!(writer.into_inner()?, b"<!--page--><HTML><br></HTML>");
/// # Ok::<(), xml_emit::Error>(())
/// ```
pub struct AutoDetectWriter<W: Write> {
    /// The writer that receives calls. Taken only by `into_inner`
    writer: Option<RawWriter<W>>,
    /// Recorded calls, `None` after the decision
    pending: Option<Pending>,
}

impl<W: Write> AutoDetectWriter<W> {
    /// Creates a writer configured by `settings`. The output method from the
    /// settings is ignored.
    pub fn new(sink: W, settings: &WriterSettings) -> Self {
        Self {
            writer: Some(RawWriter::new(sink, settings)),
            pending: Some(Pending::default()),
        }
    }

    /// Returns `None` if the output method is not selected yet, otherwise
    /// `Some(true)` for HTML and `Some(false)` for XML output.
    pub fn is_html(&self) -> Option<bool> {
        match (&self.pending, &self.writer) {
            (None, Some(writer)) => Some(writer.is_html()),
            _ => None,
        }
    }

    fn writer(&mut self) -> &mut RawWriter<W> {
        match &mut self.writer {
            Some(writer) => writer,
            None => unreachable!("writer is taken only when the selector is consumed"),
        }
    }

    /// Returns a reference to the sink.
    pub fn get_ref(&self) -> &W {
        match &self.writer {
            Some(writer) => writer.get_ref(),
            None => unreachable!("writer is taken only when the selector is consumed"),
        }
    }

    /// Returns a mutable reference to the sink.
    pub fn get_mut(&mut self) -> &mut W {
        self.writer().get_mut()
    }

    /// Selects the output method, if it is not selected yet, and replays the
    /// recorded calls.
    fn decide(&mut self, html: bool) -> Result<&mut RawWriter<W>> {
        if let Some(mut pending) = self.pending.take() {
            pending.flush_text();
            log::debug!(
                "selected {} output, replaying {} recorded calls",
                if html { "HTML" } else { "XML" },
                pending.log.len()
            );
            let writer = self.writer();
            if html {
                writer.use_html();
            }
            pending.log.replay(&mut *writer)?;
        }
        Ok(self.writer())
    }

    /// Returns the writer for content that cannot precede an HTML root.
    #[inline]
    fn content(&mut self) -> Result<&mut RawWriter<W>> {
        self.decide(false)
    }

    /// Returns the writer if the decision is made, or the recorded calls.
    #[inline]
    fn target(&mut self) -> std::result::Result<&mut RawWriter<W>, &mut Pending> {
        match (&mut self.pending, &mut self.writer) {
            (Some(pending), _) => Err(pending),
            (None, Some(writer)) => Ok(writer),
            (None, None) => unreachable!("writer is taken only when the selector is consumed"),
        }
    }

    /// Flushes all buffered data and returns the sink. Selects XML output if
    /// nothing was selected yet.
    pub fn into_inner(mut self) -> Result<W> {
        self.decide(false)?;
        match self.writer.take() {
            Some(writer) => writer.into_inner(),
            None => unreachable!("writer is taken only when the selector is consumed"),
        }
    }
}

/// Forwards the call to the writer if the decision is made, otherwise
/// records the event.
macro_rules! forward {
    ($self:ident, $writer:ident => $call:expr, $event:expr) => {
        match $self.target() {
            Ok($writer) => $call,
            Err(pending) => {
                pending.push($event);
                Ok(())
            }
        }
    };
}

impl<W: Write> RawWrite for AutoDetectWriter<W> {
    fn write_xml_declaration(&mut self, standalone: Option<bool>) -> Result<()> {
        forward!(self, w => w.write_xml_declaration(standalone), Event::XmlDeclaration(standalone))
    }

    fn write_xml_declaration_text(&mut self, text: &str) -> Result<()> {
        forward!(
            self,
            w => w.write_xml_declaration_text(text),
            Event::XmlDeclarationText(text.to_owned())
        )
    }

    fn write_doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
        subset: Option<&str>,
    ) -> Result<()> {
        forward!(
            self,
            w => w.write_doctype(name, public_id, system_id, subset),
            Event::DocType {
                name: name.to_owned(),
                public_id: public_id.map(str::to_owned),
                system_id: system_id.map(str::to_owned),
                subset: subset.map(str::to_owned),
            }
        )
    }

    fn write_start_element(&mut self, name: QName) -> Result<()> {
        let html = name.is_in_no_namespace() && name.local.eq_ignore_ascii_case("html");
        self.decide(html)?.write_start_element(name)
    }

    fn write_namespace_declaration(&mut self, prefix: &str, namespace: &str) -> Result<()> {
        forward!(
            self,
            w => w.write_namespace_declaration(prefix, namespace),
            Event::NamespaceDeclaration {
                prefix: prefix.to_owned(),
                namespace: namespace.to_owned(),
            }
        )
    }

    fn start_element_content(&mut self) -> Result<()> {
        forward!(self, w => w.start_element_content(), Event::StartElementContent)
    }

    fn write_end_element(&mut self, name: QName) -> Result<()> {
        forward!(self, w => w.write_end_element(name), Event::EndElement(name.to_owned()))
    }

    fn write_full_end_element(&mut self, name: QName) -> Result<()> {
        forward!(
            self,
            w => w.write_full_end_element(name),
            Event::FullEndElement(name.to_owned())
        )
    }

    fn write_start_attribute(&mut self, name: QName) -> Result<()> {
        forward!(
            self,
            w => w.write_start_attribute(name),
            Event::StartAttribute(name.to_owned())
        )
    }

    fn write_end_attribute(&mut self) -> Result<()> {
        forward!(self, w => w.write_end_attribute(), Event::EndAttribute)
    }

    fn write_cdata(&mut self, text: &str) -> Result<()> {
        self.content()?.write_cdata(text)
    }

    fn write_comment(&mut self, text: &str) -> Result<()> {
        forward!(self, w => w.write_comment(text), Event::Comment(text.to_owned()))
    }

    fn write_pi(&mut self, target: &str, content: &str) -> Result<()> {
        forward!(
            self,
            w => w.write_pi(target, content),
            Event::PI {
                target: target.to_owned(),
                content: content.to_owned(),
            }
        )
    }

    fn write_entity_ref(&mut self, name: &str) -> Result<()> {
        self.content()?.write_entity_ref(name)
    }

    fn write_char_entity(&mut self, ch: char) -> Result<()> {
        self.content()?.write_char_entity(ch)
    }

    fn write_whitespace(&mut self, ws: &str) -> Result<()> {
        forward!(self, w => w.write_whitespace(ws), Event::Whitespace(ws.to_owned()))
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.pending.is_some() && !is_blank(text) {
            return self.content()?.write_text(text);
        }
        match self.target() {
            Ok(writer) => writer.write_text(text),
            Err(pending) => {
                pending.text.push_str(text);
                Ok(())
            }
        }
    }

    fn write_raw(&mut self, data: &str) -> Result<()> {
        if self.pending.is_some() && !is_blank(data) {
            return self.content()?.write_raw(data);
        }
        forward!(self, w => w.write_raw(data), Event::Raw(data.to_owned()))
    }

    fn write_base64(&mut self, data: &[u8]) -> Result<()> {
        self.content()?.write_base64(data)
    }

    fn write_end_base64(&mut self) -> Result<()> {
        forward!(self, w => w.write_end_base64(), Event::EndBase64)
    }

    fn write_bin_hex(&mut self, data: &[u8]) -> Result<()> {
        self.content()?.write_bin_hex(data)
    }

    fn flush(&mut self) -> Result<()> {
        self.decide(false)?.flush()
    }

    fn close(&mut self) -> Result<()> {
        self.decide(false)?.close()
    }
}

/// Returns `true` if the text consists only of whitespace characters.
#[inline]
fn is_blank(text: &str) -> bool {
    text.bytes().all(is_whitespace)
}

impl<W: Write> Drop for AutoDetectWriter<W> {
    fn drop(&mut self) {
        if self.pending.is_some() && self.writer.is_some() {
            // errors cannot be reported from `drop`
            let _ = self.decide(false).and_then(|writer| writer.flush());
        }
    }
}

impl<W: Write> std::fmt::Debug for AutoDetectWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("AutoDetectWriter")
            .field("writer", &self.writer)
            .field("pending", &self.pending)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::OutputMethod;
    use pretty_assertions::assert_eq;

    /// Writes a small document in which the root element has the specified name
    fn document<R: RawWrite>(w: &mut R, root: QName) -> Result<()> {
        w.write_xml_declaration(None)?;
        w.write_comment("c")?;
        w.write_whitespace("\n")?;
        w.write_text(" \t")?;
        w.write_pi("pi", "x")?;
        w.write_start_element(root)?;
        w.write_start_attribute(QName::local("href"))?;
        w.write_text("\u{E9}")?;
        w.write_end_attribute()?;
        w.start_element_content()?;
        w.write_start_element(QName::local("br"))?;
        w.start_element_content()?;
        w.write_end_element(QName::local("br"))?;
        w.write_end_element(root)
    }

    fn direct(method: OutputMethod, root: QName) -> Vec<u8> {
        let settings = WriterSettings {
            output_method: method,
            ..WriterSettings::default()
        };
        let mut writer = RawWriter::new(Vec::new(), &settings);
        document(&mut writer, root).unwrap();
        writer.into_inner().unwrap()
    }

    fn detected(root: QName) -> (Option<bool>, Vec<u8>) {
        let mut writer = AutoDetectWriter::new(Vec::new(), &WriterSettings::default());
        document(&mut writer, root).unwrap();
        (writer.is_html(), writer.into_inner().unwrap())
    }

    #[test]
    fn html() {
        for name in ["html", "HTML", "Html"] {
            let root = QName::local(name);
            assert_eq!(
                detected(root),
                (Some(true), direct(OutputMethod::Html, root)),
                "{}",
                name
            );
        }
    }

    #[test]
    fn xml() {
        for root in [
            QName::local("root"),
            QName::local("htmlx"),
            QName::new("", "html", "http://www.w3.org/1999/xhtml"),
            QName::new("h", "html", "urn:h"),
        ] {
            assert_eq!(
                detected(root),
                (Some(false), direct(OutputMethod::Xml, root)),
                "{:?}",
                root
            );
        }
    }

    #[test]
    fn undecided() {
        let mut writer = AutoDetectWriter::new(Vec::new(), &WriterSettings::default());
        writer.write_comment("c").unwrap();
        writer.write_text(" ").unwrap();
        writer.write_text("\n").unwrap();
        writer.write_whitespace("\t").unwrap();
        writer.write_raw("\r\n").unwrap();
        assert_eq!(writer.is_html(), None);
        assert_eq!(writer.get_ref(), b"");
        assert_eq!(
            writer.pending.as_ref().map(|p| p.log.iter().cloned().collect::<Vec<_>>()),
            Some(vec![
                Event::Comment("c".into()),
                Event::Text(" \n".into()),
                Event::Whitespace("\t".into()),
                Event::Raw("\r\n".into()),
            ])
        );

        writer.flush().unwrap();
        assert_eq!(writer.is_html(), Some(false));
        assert_eq!(writer.get_ref(), b"<!--c--> \n\t\r\n");

        // decision is not changed by later elements
        writer.write_start_element(QName::local("html")).unwrap();
        assert_eq!(writer.is_html(), Some(false));
    }

    /// Content that cannot precede the root of an HTML document selects XML
    #[test]
    fn content_selects_xml() {
        type Call = fn(&mut AutoDetectWriter<Vec<u8>>) -> Result<()>;
        let calls: [(&str, Call); 7] = [
            ("text", |w| w.write_text("not whitespace")),
            ("chars", |w| w.write_chars(&[0x20, 0x61])),
            ("raw", |w| w.write_raw("<?php ?>")),
            ("cdata", |w| w.write_cdata("")),
            ("entity", |w| w.write_entity_ref("nbsp")),
            ("char entity", |w| w.write_char_entity(' ')),
            ("base64", |w| w.write_base64(b"")),
        ];
        for (name, call) in calls {
            let mut writer = AutoDetectWriter::new(Vec::new(), &WriterSettings::default());
            writer.write_comment("c").unwrap();
            call(&mut writer).unwrap();
            assert_eq!(writer.is_html(), Some(false), "{}", name);
        }

        let mut writer = AutoDetectWriter::new(Vec::new(), &WriterSettings::default());
        writer.write_text("not whitespace").unwrap();
        writer.write_start_element(QName::local("html")).unwrap();
        writer.start_element_content().unwrap();
        writer.write_start_element(QName::local("br")).unwrap();
        writer.start_element_content().unwrap();
        writer.write_end_element(QName::local("br")).unwrap();
        writer.write_end_element(QName::local("html")).unwrap();
        assert_eq!(
            writer.into_inner().unwrap(),
            b"not whitespace<html><br /></html>"
        );
    }

    #[test]
    fn drop_selects_xml() {
        let mut sink = Vec::new();
        {
            let mut writer = AutoDetectWriter::new(&mut sink, &WriterSettings::default());
            writer.write_xml_declaration(Some(false)).unwrap();
        }
        assert_eq!(
            sink,
            br#"<?xml version="1.0" encoding="utf-8" standalone="no"?>"#
        );
    }
}
