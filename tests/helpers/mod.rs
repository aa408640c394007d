//! Utility functions for integration tests
// Not all tests use all helpers
#![allow(dead_code)]

use xml_emit::name::QName;
use xml_emit::settings::WriterSettings;
use xml_emit::{RawWrite, Result, Writer};

/// Creates settings which differ from the default ones by changes made in `f`
pub fn settings<F: FnOnce(&mut WriterSettings)>(f: F) -> WriterSettings {
    let mut settings = WriterSettings::default();
    f(&mut settings);
    settings
}

/// Writes a document with the calls from `f` and returns the output bytes
pub fn render_bytes<F>(settings: &WriterSettings, f: F) -> Result<Vec<u8>>
where
    F: FnOnce(&mut Writer<Vec<u8>>) -> Result<()>,
{
    let mut writer = Writer::with_settings(Vec::new(), settings);
    f(&mut writer)?;
    writer.into_inner()
}

/// Writes a document with the calls from `f` and returns the output, which
/// must be in UTF-8
pub fn render<F>(settings: &WriterSettings, f: F) -> String
where
    F: FnOnce(&mut Writer<Vec<u8>>) -> Result<()>,
{
    let bytes = render_bytes(settings, f).unwrap();
    String::from_utf8(bytes).unwrap()
}

/// Writes an element without attributes, with the content written by `f`
pub fn element<R, F>(w: &mut R, name: QName, f: F) -> Result<()>
where
    R: RawWrite,
    F: FnOnce(&mut R) -> Result<()>,
{
    w.write_start_element(name)?;
    w.start_element_content()?;
    f(w)?;
    w.write_end_element(name)
}

/// Writes an element which contains only text
pub fn text_element<R: RawWrite>(w: &mut R, name: &str, text: &str) -> Result<()> {
    element(w, QName::local(name), |w| w.write_text(text))
}

/// Writes an attribute with the given value into the current start tag
pub fn attribute<R: RawWrite>(w: &mut R, name: QName, value: &str) -> Result<()> {
    w.write_start_attribute(name)?;
    w.write_text(value)?;
    w.write_end_attribute()
}
