//! Settings of the writer pipeline.
//!
//! [`WriterSettings`] is consumed by [`Writer::with_settings`] which uses it
//! to pick the writer flavour and to decide which wrappers are needed.
//!
//! [`Writer::with_settings`]: crate::writer::Writer::with_settings

use std::collections::BTreeSet;

use crate::name::ExpandedName;

/// Selects how the document is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-types", derive(serde::Deserialize, serde::Serialize))]
pub enum OutputMethod {
    /// Render the document as XML.
    #[default]
    Xml,
    /// Render the document using HTML rules: void elements without end tags,
    /// boolean attributes without values, no entity escaping inside `<script>`
    /// and `<style>`, percent-encoded URI attributes.
    Html,
    /// Postpone the choice until the first element is written. The output is
    /// HTML if that element is `html` (in any case) in no namespace and XML
    /// otherwise. Content other than comments, processing instructions and
    /// whitespace written before that element selects XML.
    AutoDetect,
}

/// The level of conformance that the written output should have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-types", derive(serde::Deserialize, serde::Serialize))]
pub enum ConformanceLevel {
    /// The output is a well-formed document with exactly one root element.
    #[default]
    Document,
    /// The output is a well-formed fragment, several top-level elements and
    /// top-level text are allowed.
    Fragment,
    /// The conformance level is not known in advance. Treated as `Fragment`
    /// by this crate, since the writer never inspects the call sequence for
    /// document grammar.
    Auto,
}

impl ConformanceLevel {
    /// Returns `true` if the document rules (single root) are enforced.
    #[inline]
    pub fn is_document(&self) -> bool {
        matches!(self, Self::Document)
    }
}

/// Controls how line breaks in text content are written.
///
/// Line breaks inside attribute values are always written as character
/// references (`&#xD;` and `&#xA;`), so that they survive attribute-value
/// normalization of the reading side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-types", derive(serde::Deserialize, serde::Serialize))]
pub enum NewLineHandling {
    /// Line breaks in text are written as is.
    #[default]
    None,
    /// Every line break in text (`\r\n`, `\r` or `\n`) is replaced with
    /// [`WriterSettings::new_line_chars`].
    Replace,
    /// `\r` in text is written as `&#xD;`, so that it is not normalized to
    /// `\n` when the document is read back.
    Entitize,
}

/// The character used to quote attribute values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-types", derive(serde::Deserialize, serde::Serialize))]
pub enum QuoteChar {
    /// `"`. Double quotes in values are written as `&quot;`.
    #[default]
    Double,
    /// `'`. Single quotes in values are written as `&apos;`.
    Single,
}

impl QuoteChar {
    /// The quote character itself.
    #[inline]
    pub const fn as_char(&self) -> char {
        match self {
            Self::Double => '"',
            Self::Single => '\'',
        }
    }

    /// The entity used to write the quote character inside an attribute value.
    #[inline]
    pub(crate) const fn entity(&self) -> &'static str {
        match self {
            Self::Double => "&quot;",
            Self::Single => "&apos;",
        }
    }
}

/// Settings of the writer.
///
/// All fields are public; start from [`WriterSettings::default()`] and change
/// what you need:
///
/// ```
/// # use xml_emit::settings::{OutputMethod, WriterSettings};
/// let mut settings = WriterSettings::default();
/// settings.indent = true;
/// settings.output_method = OutputMethod::AutoDetect;
/// settings.cdata_section_elements.insert("script".into());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-types", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde-types", serde(default))]
pub struct WriterSettings {
    /// Whether to break the output into lines and indent nested markup.
    ///
    /// Whitespace is never inserted where it would change the text content
    /// of the document: once text was written as a child of an element,
    /// nothing is inserted before the rest of its children.
    ///
    /// Default: `false`
    pub indent: bool,
    /// String written once per nesting level when indenting.
    ///
    /// Default: two spaces
    pub indent_chars: String,
    /// String written as a line break when indenting, and as the replacement
    /// of line breaks with [`NewLineHandling::Replace`].
    ///
    /// Default: `"\n"`
    pub new_line_chars: String,
    /// Whether to write each attribute on its own line, indented one level
    /// deeper than its element. Takes effect only when `indent` is set.
    ///
    /// Default: `false`
    pub new_line_on_attributes: bool,
    /// How line breaks in text are written.
    ///
    /// Default: [`NewLineHandling::None`]
    pub new_line_handling: NewLineHandling,
    /// Selects XML or HTML rendering, or postpones the choice.
    ///
    /// Default: [`OutputMethod::Xml`]
    pub output_method: OutputMethod,
    /// Whether to disable `%XX` escaping of non-ASCII characters in URI
    /// attributes (`href`, `src`, ...) in HTML output.
    ///
    /// Default: `false`
    pub do_not_escape_uri_attributes: bool,
    /// Elements whose text children are written as CDATA sections.
    ///
    /// Default: empty
    pub cdata_section_elements: BTreeSet<ExpandedName>,
    /// Public identifier of the `<!DOCTYPE>` written before the root element.
    /// If [`doc_type_system`](Self::doc_type_system) is not set, an empty
    /// system identifier is written after it.
    ///
    /// Default: `None`
    pub doc_type_public: Option<String>,
    /// System identifier of the `<!DOCTYPE>` written before the root element.
    ///
    /// Default: `None`
    pub doc_type_system: Option<String>,
    /// Media type written into the `<META http-equiv="Content-Type">` element
    /// which HTML output injects at the start of `<head>`.
    ///
    /// Default: `None`, which means `text/html`
    pub media_type: Option<String>,
    /// Whether the output is a document or a fragment.
    ///
    /// Default: [`ConformanceLevel::Document`]
    pub conformance_level: ConformanceLevel,
    /// Whether a character that is not allowed in XML is reported as an error.
    /// When `false`, such characters are written as character references.
    ///
    /// Default: `true`
    pub check_characters: bool,
    /// Whether to skip writing the XML declaration.
    ///
    /// Default: `false`
    pub omit_xml_declaration: bool,
    /// Character used to quote attribute values.
    ///
    /// Default: [`QuoteChar::Double`]
    pub quote_char: QuoteChar,
    /// Whether adjacent CDATA sections are merged into one section.
    ///
    /// Default: `false`
    pub merge_cdata_sections: bool,
    /// Label of the output encoding, for example `utf-8` or `windows-1252`.
    ///
    /// Encodings other than UTF-8 require the `encoding` feature. When the
    /// label is unknown or the feature is disabled, UTF-8 is used.
    ///
    /// Default: `"utf-8"`
    pub encoding: String,
}

impl WriterSettings {
    /// Returns `true` if calls must go through the
    /// [`CDataRouter`](crate::writer::CDataRouter).
    pub(crate) fn requires_router(&self) -> bool {
        !self.cdata_section_elements.is_empty()
            || self.doc_type_system.is_some()
            || self.doc_type_public.is_some()
    }
}

impl Default for WriterSettings {
    fn default() -> Self {
        Self {
            indent: false,
            indent_chars: "  ".to_owned(),
            new_line_chars: "\n".to_owned(),
            new_line_on_attributes: false,
            new_line_handling: NewLineHandling::None,
            output_method: OutputMethod::Xml,
            do_not_escape_uri_attributes: false,
            cdata_section_elements: BTreeSet::new(),
            doc_type_public: None,
            doc_type_system: None,
            media_type: None,
            conformance_level: ConformanceLevel::Document,
            check_characters: true,
            omit_xml_declaration: false,
            quote_char: QuoteChar::Double,
            merge_cdata_sections: false,
            encoding: "utf-8".to_owned(),
        }
    }
}
