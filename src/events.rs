//! Owned writer calls that can be recorded and replayed later.
//!
//! An [`Event`] stores the arguments of one [`RawWrite`] call. Events are
//! recorded into an [`EventLog`] when the writer that should receive them is
//! not known yet, and replayed into that writer once it is:
//!
//! ```
//! # use xml_emit::events::{Event, EventLog};
//! # use xml_emit::name::QName;
//! # use xml_emit::writer::RawWriter;
//! # use xml_emit::settings::WriterSettings;
//! # use pretty_assertions::assert_eq;
//! let mut log = EventLog::new();
//! log.push(Event::Comment("generated".into()));
//! log.push(Event::StartElement(QName::local("root").to_owned()));
//! log.push(Event::StartElementContent);
//! log.push(Event::Text("1 < 2".into()));
//! log.push(Event::EndElement(QName::local("root").to_owned()));
//!
//! let mut writer = RawWriter::new(Vec::new(), &WriterSettings::default());
//! log.replay(&mut writer).unwrap();
//! assert_eq!(
//!     writer.into_inner().unwrap(),
//!     b"<!--generated--><root>1 &lt; 2</root>"
//! );
//! ```
//!
//! [`RawWrite`]: crate::writer::RawWrite

use std::fmt;

use crate::name::OwnedQName;
use crate::writer::RawWrite;
use crate::Result;

/// Number of events in one page of an [`EventLog`].
const PAGE_SIZE: usize = 32;

/// A recorded call of a [`RawWrite`] method with owned arguments.
///
/// UTF-16 input and surrogate pairs are recorded already decoded, as
/// [`Text`](Self::Text) and [`CharEntity`](Self::CharEntity).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// [`RawWrite::write_xml_declaration`]
    XmlDeclaration(Option<bool>),
    /// [`RawWrite::write_xml_declaration_text`]
    XmlDeclarationText(String),
    /// [`RawWrite::write_doctype`]
    DocType {
        /// Name of the root element
        name: String,
        /// Public identifier
        public_id: Option<String>,
        /// System identifier
        system_id: Option<String>,
        /// Internal subset
        subset: Option<String>,
    },
    /// [`RawWrite::write_start_element`]
    StartElement(OwnedQName),
    /// [`RawWrite::write_namespace_declaration`]
    NamespaceDeclaration {
        /// Declared prefix, empty for the default namespace
        prefix: String,
        /// Namespace URI
        namespace: String,
    },
    /// [`RawWrite::start_element_content`]
    StartElementContent,
    /// [`RawWrite::write_end_element`]
    EndElement(OwnedQName),
    /// [`RawWrite::write_full_end_element`]
    FullEndElement(OwnedQName),
    /// [`RawWrite::write_start_attribute`]
    StartAttribute(OwnedQName),
    /// [`RawWrite::write_end_attribute`]
    EndAttribute,
    /// [`RawWrite::write_cdata`]
    CData(String),
    /// [`RawWrite::write_comment`]
    Comment(String),
    /// [`RawWrite::write_pi`]
    PI {
        /// Target of the instruction
        target: String,
        /// Content after the target
        content: String,
    },
    /// [`RawWrite::write_entity_ref`]
    EntityRef(String),
    /// [`RawWrite::write_char_entity`]
    CharEntity(char),
    /// [`RawWrite::write_whitespace`]
    Whitespace(String),
    /// [`RawWrite::write_text`]
    Text(String),
    /// [`RawWrite::write_raw`]
    Raw(String),
    /// [`RawWrite::write_base64`]
    Base64(Vec<u8>),
    /// [`RawWrite::write_end_base64`]
    EndBase64,
    /// [`RawWrite::write_bin_hex`]
    BinHex(Vec<u8>),
}

impl Event {
    /// Performs the recorded call on `writer`.
    pub fn write_to<R: RawWrite + ?Sized>(&self, writer: &mut R) -> Result<()> {
        match self {
            Self::XmlDeclaration(standalone) => writer.write_xml_declaration(*standalone),
            Self::XmlDeclarationText(text) => writer.write_xml_declaration_text(text),
            Self::DocType {
                name,
                public_id,
                system_id,
                subset,
            } => writer.write_doctype(
                name,
                public_id.as_deref(),
                system_id.as_deref(),
                subset.as_deref(),
            ),
            Self::StartElement(name) => writer.write_start_element(name.borrow()),
            Self::NamespaceDeclaration { prefix, namespace } => {
                writer.write_namespace_declaration(prefix, namespace)
            }
            Self::StartElementContent => writer.start_element_content(),
            Self::EndElement(name) => writer.write_end_element(name.borrow()),
            Self::FullEndElement(name) => writer.write_full_end_element(name.borrow()),
            Self::StartAttribute(name) => writer.write_start_attribute(name.borrow()),
            Self::EndAttribute => writer.write_end_attribute(),
            Self::CData(text) => writer.write_cdata(text),
            Self::Comment(text) => writer.write_comment(text),
            Self::PI { target, content } => writer.write_pi(target, content),
            Self::EntityRef(name) => writer.write_entity_ref(name),
            Self::CharEntity(ch) => writer.write_char_entity(*ch),
            Self::Whitespace(text) => writer.write_whitespace(text),
            Self::Text(text) => writer.write_text(text),
            Self::Raw(data) => writer.write_raw(data),
            Self::Base64(data) => writer.write_base64(data),
            Self::EndBase64 => writer.write_end_base64(),
            Self::BinHex(data) => writer.write_bin_hex(data),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////

/// An append-only list of events, stored in pages of fixed size.
///
/// Appending never moves already recorded events, and a long log does not
/// require one large contiguous allocation.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    pages: Vec<Vec<Event>>,
}

impl EventLog {
    /// Creates an empty log.
    pub const fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Appends an event to the end of the log.
    pub fn push(&mut self, event: Event) {
        match self.pages.last_mut() {
            Some(page) if page.len() < PAGE_SIZE => page.push(event),
            _ => {
                let mut page = Vec::with_capacity(PAGE_SIZE);
                page.push(event);
                self.pages.push(page);
            }
        }
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        match self.pages.split_last() {
            Some((last, full)) => full.len() * PAGE_SIZE + last.len(),
            None => 0,
        }
    }

    /// Returns `true` if no events were recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterates over recorded events in the order of recording.
    pub fn iter(&self) -> impl Iterator<Item = &Event> + '_ {
        self.pages.iter().flatten()
    }

    /// Performs all recorded calls on `writer` in the order of recording.
    /// Stops at the first error.
    pub fn replay<R: RawWrite + ?Sized>(self, writer: &mut R) -> Result<()> {
        for event in self.pages.iter().flatten() {
            event.write_to(writer)?;
        }
        Ok(())
    }
}

impl fmt::Debug for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
