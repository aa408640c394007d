//! Manage xml character escapes
//!
//! The writers never escape a whole string at once. Instead they iterate over
//! [`Chunk`]s produced by an [`Escaper`]: long runs of characters which can
//! be copied verbatim, interleaved with replacements for single characters.
//! The writer decides what to do with each chunk, which lets it flush its
//! buffer between chunks and report malformed characters with its own policy.

use std::borrow::Cow;
use std::fmt::Write;

use crate::settings::{NewLineHandling, QuoteChar};
use crate::validation::is_xml_char;

/// The context in which the text is written. Each context has its own set of
/// characters which can be written verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EscapeContext {
    /// Text content of an element.
    Content,
    /// Value of an attribute in XML output.
    Attribute,
    /// Value of an ordinary attribute in HTML output. `<` and `>` are left
    /// as is and `&{` is not escaped.
    HtmlAttribute,
    /// Value of an attribute holding a URI in HTML output. Non-ASCII
    /// characters are converted to UTF-8 and percent-encoded.
    UriAttribute,
    /// Text that is not escaped at all, for example the content of HTML
    /// `<script>` and `<style>` elements. Characters are still checked.
    Raw,
}

/// A piece of escaped text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Chunk<'t> {
    /// Text that should be written verbatim.
    Literal(&'t str),
    /// A predefined entity reference, for example `&lt;`.
    Entity(&'static str),
    /// A character that should be written as a numeric character reference.
    CharRef(char),
    /// A line break that should be replaced with the configured new line
    /// characters.
    NewLine,
    /// A character that should be written as percent-encoded UTF-8 bytes.
    Percent(char),
    /// A character that is not allowed in XML.
    Invalid(char),
    /// An `&` that is the last character of the text. In HTML attributes its
    /// escaping depends on the first character of the next text.
    TrailingAmp,
}

const fn build_table(special: &[u8], controls: bool, html_controls: bool) -> [bool; 256] {
    let mut table = [false; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = if i >= 0x80 {
            true
        } else if i < 0x20 {
            // `\t` is always safe, `\r` and `\n` are unsafe only with `controls`
            i != 0x09 && (controls || !(i == 0x0A || i == 0x0D))
        } else {
            html_controls && i == 0x7F
        };
        i += 1;
    }
    let mut j = 0;
    while j < special.len() {
        table[special[j] as usize] = true;
        j += 1;
    }
    table
}

static CONTENT: [bool; 256] = build_table(b"<>&", true, false);
static CONTENT_KEEP_NEW_LINES: [bool; 256] = build_table(b"<>&", false, false);
static ATTRIBUTE_DQ: [bool; 256] = build_table(b"<>&\"", true, false);
static ATTRIBUTE_SQ: [bool; 256] = build_table(b"<>&'", true, false);
static HTML_ATTRIBUTE_DQ: [bool; 256] = build_table(b"&\"", true, false);
static HTML_ATTRIBUTE_SQ: [bool; 256] = build_table(b"&'", true, false);
static URI_DQ: [bool; 256] = build_table(b"&\"", true, true);
static URI_SQ: [bool; 256] = build_table(b"&'", true, true);
static RAW: [bool; 256] = build_table(b"", false, false);

/// Rules of escaping shared by all contexts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Escaper {
    /// Write every non-ASCII character as a character reference. Used when
    /// the output encoding is not UTF-8.
    pub ascii_only: bool,
    /// Quote character around attribute values.
    pub quote: QuoteChar,
    /// Handling of line breaks in text content.
    pub new_lines: NewLineHandling,
}

impl Escaper {
    /// Escaping rules that produce output safe in any ASCII-compatible encoding.
    pub const UNIVERSAL: Escaper = Escaper {
        ascii_only: true,
        quote: QuoteChar::Double,
        new_lines: NewLineHandling::None,
    };

    /// Starts escaping of `text` in the specified context.
    #[inline]
    pub fn chunks<'t>(&self, text: &'t str, context: EscapeContext) -> Chunks<'t> {
        Chunks {
            text,
            pos: 0,
            context,
            escaper: *self,
        }
    }

    fn table(&self, context: EscapeContext) -> &'static [bool; 256] {
        match (context, self.quote) {
            (EscapeContext::Content, _) if self.new_lines == NewLineHandling::None => {
                &CONTENT_KEEP_NEW_LINES
            }
            (EscapeContext::Content, _) => &CONTENT,
            (EscapeContext::Attribute, QuoteChar::Double) => &ATTRIBUTE_DQ,
            (EscapeContext::Attribute, QuoteChar::Single) => &ATTRIBUTE_SQ,
            (EscapeContext::HtmlAttribute, QuoteChar::Double) => &HTML_ATTRIBUTE_DQ,
            (EscapeContext::HtmlAttribute, QuoteChar::Single) => &HTML_ATTRIBUTE_SQ,
            (EscapeContext::UriAttribute, QuoteChar::Double) => &URI_DQ,
            (EscapeContext::UriAttribute, QuoteChar::Single) => &URI_SQ,
            (EscapeContext::Raw, _) => &RAW,
        }
    }

    /// Returns `true` if a non-ASCII character can be written verbatim in
    /// the context.
    #[inline]
    fn is_literal(&self, ch: char, context: EscapeContext) -> bool {
        match context {
            EscapeContext::UriAttribute => false,
            EscapeContext::Raw => is_xml_char(ch),
            _ => !self.ascii_only && is_xml_char(ch),
        }
    }
}

/// Iterator over escaped pieces of a text, created by [`Escaper::chunks`].
#[derive(Clone, Debug)]
pub(crate) struct Chunks<'t> {
    text: &'t str,
    /// Position of the first character that has not been returned yet
    pos: usize,
    context: EscapeContext,
    escaper: Escaper,
}

impl<'t> Chunks<'t> {
    /// Length of the longest prefix of `rest` which can be written verbatim.
    fn safe_len(&self, rest: &str) -> usize {
        let table = self.escaper.table(self.context);
        let bytes = rest.as_bytes();
        let mut end = 0;
        loop {
            end += bytes[end..]
                .iter()
                .position(|b| table[*b as usize])
                .unwrap_or(bytes.len() - end);
            if end == bytes.len() || bytes[end] < 0x80 {
                return end;
            }
            // `end` is always on a character boundary, because we skip whole
            // characters and ASCII bytes only
            match rest[end..].chars().next() {
                Some(ch) if self.escaper.is_literal(ch, self.context) => end += ch.len_utf8(),
                _ => return end,
            }
        }
    }

    fn escape_char(&mut self, ch: char, rest: &'t str) -> Chunk<'t> {
        let after = &rest[ch.len_utf8()..];
        match (self.context, ch) {
            (EscapeContext::Raw, _) => Chunk::Invalid(ch),

            // URI attributes: everything that is not safe ASCII is percent-encoded.
            // `&{` script macros are not kept in URI values
            (EscapeContext::UriAttribute, '&') => Chunk::Entity("&amp;"),
            (EscapeContext::UriAttribute, _) if ch == self.escaper.quote.as_char() => {
                Chunk::Entity(self.escaper.quote.entity())
            }
            (EscapeContext::UriAttribute, _) => Chunk::Percent(ch),

            (EscapeContext::HtmlAttribute, '&') if after.is_empty() => Chunk::TrailingAmp,
            (EscapeContext::HtmlAttribute, '&') if after.starts_with('{') => Chunk::Literal("&"),

            (_, '<') => Chunk::Entity("&lt;"),
            (_, '>') => Chunk::Entity("&gt;"),
            (_, '&') => Chunk::Entity("&amp;"),
            (EscapeContext::Content, '\n') => match self.escaper.new_lines {
                NewLineHandling::Replace => Chunk::NewLine,
                _ => Chunk::Literal("\n"),
            },
            (EscapeContext::Content, '\r') => match self.escaper.new_lines {
                NewLineHandling::Replace => {
                    if after.starts_with('\n') {
                        self.pos += 1;
                    }
                    Chunk::NewLine
                }
                NewLineHandling::Entitize => Chunk::CharRef('\r'),
                NewLineHandling::None => Chunk::Literal("\r"),
            },
            // line breaks in attribute values would be normalized to spaces
            // by the reading side
            (_, '\n') | (_, '\r') => Chunk::CharRef(ch),
            (_, _) if ch == self.escaper.quote.as_char() => {
                Chunk::Entity(self.escaper.quote.entity())
            }
            (_, _) if !is_xml_char(ch) => Chunk::Invalid(ch),
            (_, _) => Chunk::CharRef(ch),
        }
    }
}

impl<'t> Iterator for Chunks<'t> {
    type Item = Chunk<'t>;

    fn next(&mut self) -> Option<Chunk<'t>> {
        let rest = &self.text[self.pos..];
        let safe = self.safe_len(rest);
        if safe > 0 {
            self.pos += safe;
            return Some(Chunk::Literal(&rest[..safe]));
        }
        let ch = rest.chars().next()?;
        self.pos += ch.len_utf8();
        Some(self.escape_char(ch, rest))
    }
}

impl<'t> std::iter::FusedIterator for Chunks<'t> {}

////////////////////////////////////////////////////////////////////////////////////////////////////

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Writes a character reference of the form `&#xHHHH;` with uppercase digits.
#[inline]
pub(crate) fn write_char_ref(out: &mut String, ch: char) {
    // writing into a `String` cannot fail
    let _ = write!(out, "&#x{:X};", ch as u32);
}

/// Writes UTF-8 bytes of the character as `%XX` sequences with uppercase digits.
pub(crate) fn write_percent_encoded(out: &mut String, ch: char) {
    let mut utf8 = [0u8; 4];
    for b in ch.encode_utf8(&mut utf8).bytes() {
        out.push('%');
        out.push(HEX_UPPER[(b >> 4) as usize] as char);
        out.push(HEX_UPPER[(b & 0xF) as usize] as char);
    }
}

/// Escapes all chunks of `text` with the universal rules. Returns a borrowed
/// value when nothing needs escaping.
fn escape_universal(text: &str, context: EscapeContext, quote: QuoteChar) -> Cow<str> {
    let escaper = Escaper {
        quote,
        ..Escaper::UNIVERSAL
    };
    let mut chunks = escaper.chunks(text, context);
    match chunks.next() {
        None => return Cow::Borrowed(text),
        Some(Chunk::Literal(s)) if s.len() == text.len() => return Cow::Borrowed(text),
        Some(first) => {
            let mut escaped = String::with_capacity(text.len() + 16);
            for chunk in std::iter::once(first).chain(chunks) {
                match chunk {
                    Chunk::Literal(s) => escaped.push_str(s),
                    Chunk::Entity(e) => escaped.push_str(e),
                    Chunk::NewLine => escaped.push('\n'),
                    Chunk::TrailingAmp => escaped.push_str("&amp;"),
                    Chunk::Percent(ch) => write_percent_encoded(&mut escaped, ch),
                    Chunk::CharRef(ch) | Chunk::Invalid(ch) => write_char_ref(&mut escaped, ch),
                }
            }
            Cow::Owned(escaped)
        }
    }
}

/// Escapes text content so that it can be placed between tags in a document
/// of any ASCII-compatible encoding.
///
/// Characters `<`, `>` and `&` are replaced by predefined entities; any
/// character outside of printable ASCII (except `\t`, `\r` and `\n`) is
/// replaced by a character reference:
///
/// ```
/// # use xml_emit::escape::escape_content;
/// # use pretty_assertions::assert_eq;
/// assert_eq!(escape_content("a < b"), "a &lt; b");
/// assert_eq!(escape_content("caf\u{E9}"), "caf&#xE9;");
/// assert_eq!(escape_content("\u{1F600}"), "&#x1F600;");
/// ```
///
/// Characters that are not allowed in XML are written as character
/// references too; use a [`Writer`](crate::writer::Writer) if you need them
/// to be reported as errors.
pub fn escape_content(text: &str) -> Cow<str> {
    escape_universal(text, EscapeContext::Content, QuoteChar::Double)
}

/// Escapes an attribute value that is enclosed in double quotes.
///
/// In addition to the rules of [`escape_content`], `"` is replaced by
/// `&quot;` and line breaks are replaced by character references:
///
/// ```
/// # use xml_emit::escape::escape_attribute;
/// # use pretty_assertions::assert_eq;
/// assert_eq!(escape_attribute("say \"hi\"\n"), "say &quot;hi&quot;&#xA;");
/// assert_eq!(escape_attribute("it's"), "it's");
/// ```
pub fn escape_attribute(text: &str) -> Cow<str> {
    escape_universal(text, EscapeContext::Attribute, QuoteChar::Double)
}

/// Escapes an attribute value that is enclosed in the specified quotes.
///
/// ```
/// # use xml_emit::escape::escape_attribute_with;
/// # use xml_emit::settings::QuoteChar;
/// # use pretty_assertions::assert_eq;
/// assert_eq!(escape_attribute_with("it's \"ok\"", QuoteChar::Single), "it&apos;s \"ok\"");
/// ```
pub fn escape_attribute_with(text: &str, quote: QuoteChar) -> Cow<str> {
    escape_universal(text, EscapeContext::Attribute, quote)
}
