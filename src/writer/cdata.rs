//! Routing of text into CDATA sections and checks of the document structure.

use std::collections::BTreeSet;

use crate::errors::StructuralError;
use crate::name::{ExpandedName, QName};
use crate::settings::WriterSettings;
use crate::utils::BitStack;
use crate::writer::RawWrite;
use crate::Result;

/// A wrapper which writes text children of the configured elements as CDATA
/// sections.
///
/// Text, whitespace and raw data written directly inside an element from
/// [`WriterSettings::cdata_section_elements`] is collected and written as a
/// single CDATA section when anything else is written. Text in attributes
/// and in nested elements is not affected.
///
/// The router also:
/// - writes the document type from [`WriterSettings::doc_type_system`] and
///   [`WriterSettings::doc_type_public`] right before the root element,
///   using its name;
/// - in [`Document`] conformance level, rejects a second root element with
///   [`StructuralError::MultipleRoots`] and a document without root element
///   with [`StructuralError::NoRootElement`] on [`close`](RawWrite::close).
///
/// ```
/// # use pretty_assertions::assert_eq;
/// use xml_emit::name::QName;
/// use xml_emit::settings::WriterSettings;
/// use xml_emit::writer::{CDataRouter, RawWrite, RawWriter};
///
/// let mut settings = WriterSettings::default();
/// settings.cdata_section_elements.insert("code".into());
///
/// let mut writer = CDataRouter::new(RawWriter::new(Vec::new(), &settings), &settings);
/// writer.write_start_element(QName::local("code"))?;
/// writer.start_element_content()?;
/// writer.write_text("a < b")?;
/// writer.write_text(" && c")?;
/// writer.write_end_element(QName::local("code"))?;
///
/// let xml = writer.into_inner()?.into_inner()?;
/// assert_eq!(xml, b"<code><![CDATA[a < b && c]]></code>");
/// # Ok::<(), xml_emit::Error>(())
/// ```
///
/// [`Document`]: crate::settings::ConformanceLevel::Document
#[derive(Debug)]
pub struct CDataRouter<R: RawWrite> {
    inner: R,
    cdata_elements: BTreeSet<ExpandedName>,
    /// For each open element, whether its text is written as CDATA
    stack: BitStack,
    in_attribute: bool,
    /// Redirected text which is not written yet
    pending: String,
    document: bool,
    doc_type_public: Option<String>,
    doc_type_system: Option<String>,
    root_written: bool,
}

impl<R: RawWrite> CDataRouter<R> {
    /// Wraps `inner`. Only the CDATA elements, the document type and the
    /// conformance level are taken from `settings`.
    pub fn new(inner: R, settings: &WriterSettings) -> Self {
        Self {
            inner,
            cdata_elements: settings.cdata_section_elements.clone(),
            stack: BitStack::new(),
            in_attribute: false,
            pending: String::new(),
            document: settings.conformance_level.is_document(),
            doc_type_public: settings.doc_type_public.clone(),
            doc_type_system: settings.doc_type_system.clone(),
            root_written: false,
        }
    }

    /// Returns a reference to the wrapped writer.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Returns a mutable reference to the wrapped writer. Text collected for
    /// the current CDATA section is not written to it yet.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Writes collected text and returns the wrapped writer.
    pub fn into_inner(mut self) -> Result<R> {
        self.flush_pending()?;
        Ok(self.inner)
    }

    #[inline]
    fn redirects(&self) -> bool {
        !self.in_attribute && self.stack.peek()
    }

    /// Writes collected text as one CDATA section.
    fn flush_pending(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let result = self.inner.write_cdata(&self.pending);
        self.pending.clear();
        result
    }

    /// Collects the text if it is redirected, otherwise writes it with `write`.
    fn route<F>(&mut self, text: &str, write: F) -> Result<()>
    where
        F: FnOnce(&mut R, &str) -> Result<()>,
    {
        if self.redirects() {
            self.pending.push_str(text);
            Ok(())
        } else {
            write(&mut self.inner, text)
        }
    }

    /// Checks the number of root elements and writes the document type
    /// before the first one.
    fn start_top_level(&mut self, name: QName) -> Result<()> {
        if self.root_written {
            if self.document {
                return Err(StructuralError::MultipleRoots(name.to_string()).into());
            }
            return Ok(());
        }
        self.root_written = true;

        if self.doc_type_system.is_some() || self.doc_type_public.is_some() {
            let name = name.to_string();
            log::debug!("writing document type for the root element `{}`", name);
            self.inner.write_doctype(
                &name,
                self.doc_type_public.as_deref(),
                self.doc_type_system.as_deref(),
                None,
            )?;
        }
        Ok(())
    }
}

impl<R: RawWrite> RawWrite for CDataRouter<R> {
    fn write_xml_declaration(&mut self, standalone: Option<bool>) -> Result<()> {
        self.inner.write_xml_declaration(standalone)
    }

    fn write_xml_declaration_text(&mut self, text: &str) -> Result<()> {
        self.inner.write_xml_declaration_text(text)
    }

    fn write_doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
        subset: Option<&str>,
    ) -> Result<()> {
        self.inner.write_doctype(name, public_id, system_id, subset)
    }

    fn write_start_element(&mut self, name: QName) -> Result<()> {
        self.flush_pending()?;
        if self.stack.is_empty() {
            self.start_top_level(name)?;
        }
        self.inner.write_start_element(name)?;

        let cdata = self.cdata_elements.iter().any(|e| e.matches(name));
        self.stack.push(cdata);
        Ok(())
    }

    fn write_namespace_declaration(&mut self, prefix: &str, namespace: &str) -> Result<()> {
        self.inner.write_namespace_declaration(prefix, namespace)
    }

    fn start_element_content(&mut self) -> Result<()> {
        self.inner.start_element_content()
    }

    fn write_end_element(&mut self, name: QName) -> Result<()> {
        self.flush_pending()?;
        self.stack.pop();
        self.inner.write_end_element(name)
    }

    fn write_full_end_element(&mut self, name: QName) -> Result<()> {
        self.flush_pending()?;
        self.stack.pop();
        self.inner.write_full_end_element(name)
    }

    fn write_start_attribute(&mut self, name: QName) -> Result<()> {
        self.in_attribute = true;
        self.inner.write_start_attribute(name)
    }

    fn write_end_attribute(&mut self) -> Result<()> {
        self.in_attribute = false;
        self.inner.write_end_attribute()
    }

    fn write_cdata(&mut self, text: &str) -> Result<()> {
        self.route(text, R::write_cdata)
    }

    fn write_comment(&mut self, text: &str) -> Result<()> {
        self.flush_pending()?;
        self.inner.write_comment(text)
    }

    fn write_pi(&mut self, target: &str, content: &str) -> Result<()> {
        self.flush_pending()?;
        self.inner.write_pi(target, content)
    }

    fn write_entity_ref(&mut self, name: &str) -> Result<()> {
        self.flush_pending()?;
        self.inner.write_entity_ref(name)
    }

    fn write_char_entity(&mut self, ch: char) -> Result<()> {
        self.flush_pending()?;
        self.inner.write_char_entity(ch)
    }

    fn write_whitespace(&mut self, ws: &str) -> Result<()> {
        self.route(ws, R::write_whitespace)
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.route(text, R::write_text)
    }

    fn write_raw(&mut self, data: &str) -> Result<()> {
        self.route(data, R::write_raw)
    }

    fn write_base64(&mut self, data: &[u8]) -> Result<()> {
        self.flush_pending()?;
        self.inner.write_base64(data)
    }

    fn write_end_base64(&mut self) -> Result<()> {
        self.inner.write_end_base64()
    }

    fn write_bin_hex(&mut self, data: &[u8]) -> Result<()> {
        self.flush_pending()?;
        self.inner.write_bin_hex(data)
    }

    fn flush(&mut self) -> Result<()> {
        self.flush_pending()?;
        self.inner.flush()
    }

    fn close(&mut self) -> Result<()> {
        self.flush_pending()?;
        self.inner.close()?;
        if self.document && !self.root_written {
            return Err(StructuralError::NoRootElement.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::settings::ConformanceLevel;
    use crate::writer::RawWriter;
    use pretty_assertions::assert_eq;

    fn settings() -> WriterSettings {
        let mut settings = WriterSettings::default();
        settings.cdata_section_elements.insert("script".into());
        settings
            .cdata_section_elements
            .insert(ExpandedName::new("urn:x", "code"));
        settings
    }

    fn render<F>(settings: &WriterSettings, f: F) -> Result<String>
    where
        F: FnOnce(&mut CDataRouter<RawWriter<Vec<u8>>>) -> Result<()>,
    {
        let mut writer = CDataRouter::new(RawWriter::new(Vec::new(), settings), settings);
        f(&mut writer)?;
        let bytes = writer.into_inner()?.into_inner()?;
        Ok(String::from_utf8(bytes).unwrap())
    }

    fn element<R: RawWrite>(
        w: &mut R,
        name: QName,
        f: impl FnOnce(&mut R) -> Result<()>,
    ) -> Result<()> {
        w.write_start_element(name)?;
        w.start_element_content()?;
        f(w)?;
        w.write_end_element(name)
    }

    #[test]
    fn merges_text() {
        let xml = render(&settings(), |w| {
            element(w, QName::local("script"), |w| {
                w.write_text("a<b")?;
                w.write_whitespace(" ")?;
                w.write_raw("&amp;")?;
                w.write_cdata("]]>")
            })
        })
        .unwrap();
        assert_eq!(xml, "<script><![CDATA[a<b &amp;]]]]><![CDATA[>]]></script>");
    }

    #[test]
    fn other_elements() {
        let xml = render(&settings(), |w| {
            element(w, QName::local("root"), |w| {
                w.write_text("a<b")?;
                element(w, QName::local("script"), |w| {
                    w.write_text("1")?;
                    element(w, QName::local("p"), |w| w.write_text("2<"))?;
                    w.write_text("3")
                })
            })
        })
        .unwrap();
        assert_eq!(
            xml,
            "<root>a&lt;b<script><![CDATA[1]]><p>2&lt;</p><![CDATA[3]]></script></root>"
        );
    }

    #[test]
    fn namespaces() {
        let xml = render(&settings(), |w| {
            element(w, QName::new("x", "code", "urn:x"), |w| w.write_text("<"))?;
            Ok(())
        })
        .unwrap();
        assert_eq!(xml, "<x:code><![CDATA[<]]></x:code>");

        // same local name in other namespace
        let mut fragment = settings();
        fragment.conformance_level = ConformanceLevel::Fragment;
        let xml = render(&fragment, |w| {
            element(w, QName::local("code"), |w| w.write_text("<"))?;
            element(w, QName::new("y", "script", "urn:y"), |w| w.write_text("<"))
        })
        .unwrap();
        assert_eq!(xml, "<code>&lt;</code><y:script>&lt;</y:script>");
    }

    #[test]
    fn attributes() {
        let xml = render(&settings(), |w| {
            w.write_start_element(QName::local("script"))?;
            w.write_start_attribute(QName::local("src"))?;
            w.write_text("a&b")?;
            w.write_end_attribute()?;
            w.start_element_content()?;
            w.write_text("x")?;
            w.write_end_element(QName::local("script"))
        })
        .unwrap();
        assert_eq!(xml, r#"<script src="a&amp;b"><![CDATA[x]]></script>"#);
    }

    #[test]
    fn interrupted_sections() {
        let xml = render(&settings(), |w| {
            element(w, QName::local("script"), |w| {
                w.write_text("a")?;
                w.write_comment("c")?;
                w.write_text("b")?;
                w.write_entity_ref("nbsp")?;
                w.write_text("c")?;
                w.write_char_entity('\u{A0}')?;
                w.write_text("d")
            })
        })
        .unwrap();
        assert_eq!(
            xml,
            "<script><![CDATA[a]]><!--c--><![CDATA[b]]>&nbsp;<![CDATA[c]]>&#xA0;<![CDATA[d]]></script>"
        );
    }

    #[test]
    fn doc_type() {
        let mut settings = WriterSettings::default();
        settings.doc_type_system = Some("root.dtd".into());
        let xml = render(&settings, |w| {
            w.write_comment("c")?;
            element(w, QName::new("p", "root", "urn:p"), |_| Ok(()))
        })
        .unwrap();
        assert_eq!(xml, r#"<!--c--><!DOCTYPE p:root SYSTEM "root.dtd"><p:root />"#);

        settings.doc_type_public = Some("-//P//DTD//EN".into());
        let xml = render(&settings, |w| element(w, QName::local("root"), |_| Ok(()))).unwrap();
        assert_eq!(
            xml,
            r#"<!DOCTYPE root PUBLIC "-//P//DTD//EN" "root.dtd"><root />"#
        );
    }

    #[test]
    fn multiple_roots() {
        let result = render(&settings(), |w| {
            element(w, QName::local("a"), |_| Ok(()))?;
            element(w, QName::local("b"), |_| Ok(()))
        });
        match result {
            Err(Error::Structural(StructuralError::MultipleRoots(name))) => {
                assert_eq!(name, "b")
            }
            x => panic!("Expected `MultipleRoots`, but got `{:?}`", x),
        }

        let mut fragment = settings();
        fragment.conformance_level = ConformanceLevel::Auto;
        let xml = render(&fragment, |w| {
            element(w, QName::local("a"), |_| Ok(()))?;
            element(w, QName::local("b"), |_| Ok(()))
        })
        .unwrap();
        assert_eq!(xml, "<a /><b />");
    }

    #[test]
    fn no_root() {
        let result = render(&settings(), |w| {
            w.write_comment("c")?;
            w.close()
        });
        match result {
            Err(Error::Structural(StructuralError::NoRootElement)) => {}
            x => panic!("Expected `NoRootElement`, but got `{:?}`", x),
        }

        let result = render(&settings(), |w| {
            element(w, QName::local("a"), |_| Ok(()))?;
            w.close()
        });
        assert_eq!(result.unwrap(), "<a />");
    }
}
