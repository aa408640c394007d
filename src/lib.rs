//! Buffered XML and HTML writer.
//!
//! # Description
//!
//! xml-emit turns a sequence of structural calls (start an element, write an
//! attribute, write text, end the element, ...) into well-escaped markup. The
//! calls are made through the [`RawWrite`] trait, which is implemented by:
//!
//! - [`RawWriter`]: renders the output as XML or HTML into any
//!   [`std::io::Write`] sink, through an internal buffer;
//! - [`AutoDetectWriter`]: records calls until the first element shows
//!   whether the document is HTML, then replays them into a [`RawWriter`];
//! - [`CDataRouter`]: writes text of the configured elements as CDATA
//!   sections, writes the document type and checks the number of root
//!   elements;
//! - [`Writer`]: the combination of the above, selected by
//!   [`WriterSettings`].
//!
//! The writers assume that calls come in a valid order. They escape all text,
//! check characters, indent output and choose the HTML specific forms of
//! elements and attributes, but do not check that end tags match start tags.
//!
//! xml-emit contains optional support of asynchronous writing using [tokio].
//! To get it enable the [`async-tokio`](#async-tokio) feature.
//!
//! # Examples
//!
//! ```
//! # use pretty_assertions::assert_eq;
//! use xml_emit::name::QName;
//! use xml_emit::settings::{OutputMethod, WriterSettings};
//! use xml_emit::{RawWrite, Writer};
//!
//! let settings = WriterSettings {
//!     output_method: OutputMethod::AutoDetect,
//!     ..WriterSettings::default()
//! };
//! let mut writer = Writer::with_settings(Vec::new(), &settings);
//! writer.write_start_element(QName::local("html"))?;
//! writer.start_element_content()?;
//! writer.write_start_element(QName::local("input"))?;
//! writer.write_start_attribute(QName::local("checked"))?;
//! writer.write_text("checked")?;
//! writer.write_end_attribute()?;
//! writer.start_element_content()?;
//! writer.write_end_element(QName::local("input"))?;
//! writer.write_end_element(QName::local("html"))?;
//!
//! assert_eq!(writer.into_inner()?, b"<html><input checked></html>");
//! # Ok::<(), xml_emit::Error>(())
//! ```
//!
//! # Features
//!
//! `xml-emit` supports the following features:
//!
//! [tokio]: https://tokio.rs/
//! [`RawWriter`]: crate::writer::RawWriter
//! [`AutoDetectWriter`]: crate::writer::AutoDetectWriter
//! [`CDataRouter`]: crate::writer::CDataRouter
//! [`WriterSettings`]: crate::settings::WriterSettings
#![cfg_attr(
    feature = "document-features",
    cfg_attr(doc, doc = ::document_features::document_features!(
        feature_label = "<a id=\"{feature}\" href=\"#{feature}\"><strong><code>{feature}</code></strong></a>"
    ))
)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]
// docs.rs defines `docsrs` when building documentation
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod binary;
pub mod encoding;
pub mod errors;
pub mod escape;
pub mod events;
pub mod html;
pub mod name;
pub mod settings;
/// Not an official API, public for integration tests
#[doc(hidden)]
pub mod utils;
pub mod validation;
pub mod writer;

// reexports
pub use crate::errors::{Error, Result};
pub use crate::writer::{RawWrite, Writer};
