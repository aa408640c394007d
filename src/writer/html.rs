//! HTML rules of the [`RawWriter`].
//!
//! HTML output differs from XML output in a few ways:
//! - void elements (`<br>`, `<input>`, ...) never get an end tag, and other
//!   elements are never collapsed into `<name />`;
//! - boolean attributes are written without a value (`<option selected>`);
//! - values of URI attributes are percent-encoded;
//! - text of `<script>` and `<style>` is not escaped;
//! - `<head>` gets a `<META>` element which declares the content type;
//! - processing instructions end with `>` and the XML declaration is not
//!   written.
//!
//! Elements and attributes in a namespace are written with XML rules.

use std::io::Write;

use crate::escape::EscapeContext;
use crate::html::{classifier, AttributeProperties, ElementProperties};
use crate::name::QName;
use crate::settings::WriterSettings;
use crate::writer::buffer::Mark;
use crate::writer::raw::RawWriter;
use crate::Result;

/// State of the HTML rendering.
#[derive(Clone, Debug)]
pub(super) struct HtmlState {
    /// Properties of the parent elements of the current one
    scopes: Vec<ElementProperties>,
    /// Properties of the current element
    element: ElementProperties,
    /// Properties of the current attribute on the current element
    attribute: AttributeProperties,
    /// The last text written into an attribute value ended with `&`, which
    /// was not written yet
    pub pending_amp: bool,
    /// Media type announced in the `<META>` element
    media_type: String,
    escape_uris: bool,
}

impl HtmlState {
    pub fn new(settings: &WriterSettings) -> Self {
        Self {
            scopes: Vec::new(),
            element: ElementProperties::DEFAULT,
            attribute: AttributeProperties::DEFAULT,
            pending_amp: false,
            media_type: settings
                .media_type
                .clone()
                .unwrap_or_else(|| "text/html".to_owned()),
            escape_uris: !settings.do_not_escape_uri_attributes,
        }
    }
}

impl<W: Write> RawWriter<W> {
    /// Writes an indent before a block element if the previous output ended
    /// with a tag of a block element.
    fn html_indent_block(&mut self) -> Result<()> {
        if self.indent.is_some() && self.buf.at(Mark::BlockEnd) {
            self.write_indent(self.indent_level)?;
        }
        Ok(())
    }

    pub(super) fn html_start_element(&mut self, name: QName) -> Result<()> {
        self.html.scopes.push(self.html.element);

        if name.is_in_no_namespace() {
            self.html.element = classifier().element(name.local);
            if self.html.element.contains(ElementProperties::BLOCK_WS) {
                self.html_indent_block()?;
            }
            self.indent_level += 1;
            self.buf.push('<')?;
            self.buf.push_str(name.local)?;
        } else {
            self.html.element = ElementProperties::HAS_NS | ElementProperties::BLOCK_WS;
            self.html_indent_block()?;
            self.indent_level += 1;
            self.buf.push('<')?;
            self.write_qname(name)?;
        }
        self.buf.mark(Mark::AttributeEnd);
        Ok(())
    }

    pub(super) fn html_start_element_content(&mut self) -> Result<()> {
        self.buf.push('>')?;
        self.buf.mark(Mark::ContentStart);

        if self.html.element.contains(ElementProperties::HEAD) {
            self.write_indent(self.indent_level)?;
            self.write_meta_element()?;
            self.buf.mark(Mark::BlockEnd);
        } else if self.html.element.contains(ElementProperties::BLOCK_WS) {
            self.buf.mark(Mark::BlockEnd);
        }
        Ok(())
    }

    /// Writes `<META http-equiv="Content-Type" content="...">` with the media
    /// type and the output encoding.
    fn write_meta_element(&mut self) -> Result<()> {
        let encoding = self.encoding.name();
        self.buf.push_str("<META http-equiv=\"Content-Type\" content=\"")?;
        self.buf.push_str(&self.html.media_type)?;
        self.buf.push_str("; charset=")?;
        self.buf.push_str(&encoding)?;
        self.buf.push_small("\">")
    }

    pub(super) fn html_end_element(&mut self, name: QName) -> Result<()> {
        self.indent_level = self.indent_level.saturating_sub(1);
        let element = self.html.element;

        if element.contains(ElementProperties::BLOCK_WS)
            && self.buf.at(Mark::BlockEnd)
            && !self.buf.at(Mark::ContentStart)
        {
            self.html_indent_block()?;
        }

        if element.contains(ElementProperties::HAS_NS) {
            if self.buf.at(Mark::ContentStart) && self.buf.pop_suffix(">") {
                self.buf.push_small(" />")?;
            } else {
                self.buf.push_small("</")?;
                self.write_qname(name)?;
                self.buf.push('>')?;
            }
        } else if !element.contains(ElementProperties::EMPTY) {
            self.buf.push_small("</")?;
            self.buf.push_str(name.local)?;
            self.buf.push('>')?;
        }

        if element.contains(ElementProperties::BLOCK_WS) {
            self.buf.mark(Mark::BlockEnd);
        }
        self.html.element = self.html.scopes.pop().unwrap_or_default();
        Ok(())
    }

    pub(super) fn html_start_attribute(&mut self, name: QName) -> Result<()> {
        if !name.is_in_no_namespace() {
            self.html.attribute = AttributeProperties::DEFAULT;
            return self.xml_start_attribute(name);
        }

        self.write_attribute_separator()?;
        self.buf.push_str(name.local)?;

        let parents = ElementProperties::URI_PARENT
            | ElementProperties::BOOL_PARENT
            | ElementProperties::NAME_PARENT;
        self.html.attribute = if self.html.element.intersects(parents) {
            classifier().attribute(name.local).on(self.html.element)
        } else {
            AttributeProperties::DEFAULT
        };

        if self.html.attribute.contains(AttributeProperties::BOOLEAN) {
            // the value is not written at all
            self.in_attribute = true;
            return Ok(());
        }
        self.open_attribute_value()
    }

    pub(super) fn html_end_attribute(&mut self) -> Result<()> {
        if self.html.attribute.contains(AttributeProperties::BOOLEAN) {
            self.in_attribute = false;
            self.buf.mark(Mark::AttributeEnd);
        } else {
            self.resolve_pending_amp("")?;
            self.close_attribute_value()?;
        }
        self.html.attribute = AttributeProperties::DEFAULT;
        Ok(())
    }

    /// Writes an `&` held back at the end of the previous attribute text,
    /// escaping it unless `next` starts with `{`.
    pub(super) fn resolve_pending_amp(&mut self, next: &str) -> Result<()> {
        if self.html.pending_amp {
            self.html.pending_amp = false;
            if next.starts_with('{') {
                self.buf.push('&')?;
            } else {
                self.buf.push_small("&amp;")?;
            }
        }
        Ok(())
    }

    pub(super) fn html_attribute_text(&mut self, text: &str) -> Result<()> {
        let attribute = self.html.attribute;
        if attribute.contains(AttributeProperties::BOOLEAN) {
            return Ok(());
        }
        self.resolve_pending_amp(text)?;

        let context = if attribute.intersects(AttributeProperties::URI | AttributeProperties::NAME)
            && self.html.escape_uris
        {
            EscapeContext::UriAttribute
        } else if self.html.element.contains(ElementProperties::HAS_NS) {
            EscapeContext::Attribute
        } else {
            EscapeContext::HtmlAttribute
        };
        self.write_escaped(text, context)
    }

    pub(super) fn html_element_text(&mut self, text: &str) -> Result<()> {
        if self.html.element.contains(ElementProperties::NO_ENTITIES) {
            self.write_checked(text)
        } else {
            self.write_escaped(text, EscapeContext::Content)
        }
    }
}
