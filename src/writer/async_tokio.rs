//! Writer into a [`tokio::io::AsyncWrite`] sink.

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::errors::{Error, Result};
use crate::name::QName;
use crate::settings::WriterSettings;
use crate::writer::{RawWrite, Writer, BUFFER_SIZE};

/// An asynchronous counterpart of [`Writer`].
///
/// Every call is rendered synchronously by a [`Writer`] into an in-memory
/// staging buffer, which is then written into the sink. The output is the
/// same as the output of a [`Writer`] with the same settings.
///
/// If the future of a call is dropped before it is completed, the writer
/// cannot know which part of the output reached the sink. All following
/// calls fail with [`Error::Reentrancy`].
///
/// ```
/// # tokio_test::block_on(async {
/// use xml_emit::name::QName;
/// use xml_emit::writer::AsyncWriter;
///
/// let mut writer = AsyncWriter::new(Vec::new());
/// writer.write_start_element(QName::local("a")).await?;
/// writer.start_element_content().await?;
/// writer.write_text("1 < 2").await?;
/// writer.write_end_element(QName::local("a")).await?;
///
/// assert_eq!(writer.into_inner().await?, b"<a>1 &lt; 2</a>");
/// # Ok::<(), xml_emit::Error>(())
/// # }).unwrap();
/// ```
pub struct AsyncWriter<W> {
    writer: Writer<Vec<u8>>,
    sink: W,
    /// Set while a call is running
    in_flight: bool,
}

impl<W: AsyncWrite + Unpin> AsyncWriter<W> {
    /// Creates a writer with default settings.
    pub fn new(sink: W) -> Self {
        Self::with_settings(sink, &WriterSettings::default())
    }

    /// Creates a writer configured by `settings`.
    pub fn with_settings(sink: W, settings: &WriterSettings) -> Self {
        Self {
            writer: Writer::with_settings(Vec::new(), settings),
            sink,
            in_flight: false,
        }
    }

    /// Returns a reference to the sink.
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Returns a mutable reference to the sink.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Marks the start of a call.
    fn begin(&mut self) -> Result<()> {
        if self.in_flight {
            return Err(Error::Reentrancy);
        }
        self.in_flight = true;
        Ok(())
    }

    /// Writes the staged output into the sink.
    async fn drain(&mut self) -> Result<()> {
        let staged = self.writer.get_mut();
        if !staged.is_empty() {
            self.sink.write_all(&staged[..]).await?;
            staged.clear();
        }
        Ok(())
    }

    /// Performs a synchronous call and writes its output into the sink.
    async fn run<F>(&mut self, call: F) -> Result<()>
    where
        F: FnOnce(&mut Writer<Vec<u8>>) -> Result<()>,
    {
        self.begin()?;
        let result = match call(&mut self.writer) {
            Ok(()) => self.drain().await,
            Err(e) => Err(e),
        };
        self.in_flight = false;
        result
    }

    /// Writes binary data with `call` in pieces, so that the staging buffer
    /// is drained between them.
    async fn run_chunked<F>(&mut self, data: &[u8], mut call: F) -> Result<()>
    where
        F: FnMut(&mut Writer<Vec<u8>>, &[u8]) -> Result<()>,
    {
        self.begin()?;
        let mut result = Ok(());
        for chunk in data.chunks(BUFFER_SIZE) {
            result = match call(&mut self.writer, chunk) {
                Ok(()) => self.drain().await,
                Err(e) => Err(e),
            };
            if result.is_err() {
                break;
            }
        }
        self.in_flight = false;
        result
    }

    /// See [`RawWrite::write_xml_declaration`].
    pub async fn write_xml_declaration(&mut self, standalone: Option<bool>) -> Result<()> {
        self.run(|w| w.write_xml_declaration(standalone)).await
    }

    /// See [`RawWrite::write_xml_declaration_text`].
    pub async fn write_xml_declaration_text(&mut self, text: &str) -> Result<()> {
        self.run(|w| w.write_xml_declaration_text(text)).await
    }

    /// See [`RawWrite::write_doctype`].
    pub async fn write_doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
        subset: Option<&str>,
    ) -> Result<()> {
        self.run(|w| w.write_doctype(name, public_id, system_id, subset))
            .await
    }

    /// See [`RawWrite::write_start_element`].
    pub async fn write_start_element(&mut self, name: QName<'_>) -> Result<()> {
        self.run(|w| w.write_start_element(name)).await
    }

    /// See [`RawWrite::write_namespace_declaration`].
    pub async fn write_namespace_declaration(
        &mut self,
        prefix: &str,
        namespace: &str,
    ) -> Result<()> {
        self.run(|w| w.write_namespace_declaration(prefix, namespace))
            .await
    }

    /// See [`RawWrite::start_element_content`].
    pub async fn start_element_content(&mut self) -> Result<()> {
        self.run(|w| w.start_element_content()).await
    }

    /// See [`RawWrite::write_end_element`].
    pub async fn write_end_element(&mut self, name: QName<'_>) -> Result<()> {
        self.run(|w| w.write_end_element(name)).await
    }

    /// See [`RawWrite::write_full_end_element`].
    pub async fn write_full_end_element(&mut self, name: QName<'_>) -> Result<()> {
        self.run(|w| w.write_full_end_element(name)).await
    }

    /// See [`RawWrite::write_start_attribute`].
    pub async fn write_start_attribute(&mut self, name: QName<'_>) -> Result<()> {
        self.run(|w| w.write_start_attribute(name)).await
    }

    /// See [`RawWrite::write_end_attribute`].
    pub async fn write_end_attribute(&mut self) -> Result<()> {
        self.run(|w| w.write_end_attribute()).await
    }

    /// See [`RawWrite::write_cdata`].
    pub async fn write_cdata(&mut self, text: &str) -> Result<()> {
        self.run(|w| w.write_cdata(text)).await
    }

    /// See [`RawWrite::write_comment`].
    pub async fn write_comment(&mut self, text: &str) -> Result<()> {
        self.run(|w| w.write_comment(text)).await
    }

    /// See [`RawWrite::write_pi`].
    pub async fn write_pi(&mut self, target: &str, content: &str) -> Result<()> {
        self.run(|w| w.write_pi(target, content)).await
    }

    /// See [`RawWrite::write_entity_ref`].
    pub async fn write_entity_ref(&mut self, name: &str) -> Result<()> {
        self.run(|w| w.write_entity_ref(name)).await
    }

    /// See [`RawWrite::write_char_entity`].
    pub async fn write_char_entity(&mut self, ch: char) -> Result<()> {
        self.run(|w| w.write_char_entity(ch)).await
    }

    /// See [`RawWrite::write_surrogate_char_entity`].
    pub async fn write_surrogate_char_entity(&mut self, low: u16, high: u16) -> Result<()> {
        self.run(|w| w.write_surrogate_char_entity(low, high))
            .await
    }

    /// See [`RawWrite::write_whitespace`].
    pub async fn write_whitespace(&mut self, ws: &str) -> Result<()> {
        self.run(|w| w.write_whitespace(ws)).await
    }

    /// See [`RawWrite::write_text`].
    pub async fn write_text(&mut self, text: &str) -> Result<()> {
        self.run(|w| w.write_text(text)).await
    }

    /// See [`RawWrite::write_chars`].
    pub async fn write_chars(&mut self, units: &[u16]) -> Result<()> {
        self.run(|w| w.write_chars(units)).await
    }

    /// See [`RawWrite::write_raw`].
    pub async fn write_raw(&mut self, data: &str) -> Result<()> {
        self.run(|w| w.write_raw(data)).await
    }

    /// See [`RawWrite::write_base64`]. Large data is encoded in pieces, and
    /// the output of each piece is written into the sink before the next one
    /// is encoded.
    pub async fn write_base64(&mut self, data: &[u8]) -> Result<()> {
        self.run_chunked(data, |w, chunk| w.write_base64(chunk))
            .await
    }

    /// See [`RawWrite::write_end_base64`].
    pub async fn write_end_base64(&mut self) -> Result<()> {
        self.run(|w| w.write_end_base64()).await
    }

    /// See [`RawWrite::write_bin_hex`]. Large data is encoded in pieces, as
    /// in [`write_base64`](Self::write_base64).
    pub async fn write_bin_hex(&mut self, data: &[u8]) -> Result<()> {
        self.run_chunked(data, |w, chunk| w.write_bin_hex(chunk))
            .await
    }

    /// Writes all buffered data into the sink and flushes it.
    pub async fn flush(&mut self) -> Result<()> {
        self.run(|w| w.flush()).await?;
        self.begin()?;
        let result = self.sink.flush().await;
        self.in_flight = false;
        Ok(result?)
    }

    /// Finishes the output and flushes the sink. See [`RawWrite::close`].
    pub async fn close(&mut self) -> Result<()> {
        self.run(|w| w.close()).await?;
        self.begin()?;
        let result = self.sink.flush().await;
        self.in_flight = false;
        Ok(result?)
    }

    /// Writes all buffered data into the sink, flushes it and returns it.
    pub async fn into_inner(mut self) -> Result<W> {
        self.begin()?;
        let staged = self.writer.into_inner()?;
        self.sink.write_all(&staged).await?;
        self.sink.flush().await?;
        Ok(self.sink)
    }
}

impl<W> std::fmt::Debug for AsyncWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("AsyncWriter")
            .field("writer", &self.writer)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio_test::{assert_pending, task};

    /// A sink that never accepts data
    struct Stalled;

    impl AsyncWrite for Stalled {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Pending
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Pending
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Pending
        }
    }

    #[tokio::test]
    async fn output() {
        let mut writer = AsyncWriter::new(Vec::new());
        writer.write_start_element(QName::local("a")).await.unwrap();
        writer.start_element_content().await.unwrap();
        writer.write_base64(b"binary").await.unwrap();
        writer.write_end_base64().await.unwrap();
        writer.write_end_element(QName::local("a")).await.unwrap();
        writer.flush().await.unwrap();

        assert_eq!(writer.get_ref(), b"<a>YmluYXJ5</a>");
    }

    #[tokio::test]
    async fn large_binary() {
        let data = vec![0xFF; BUFFER_SIZE * 3 + 1];
        let mut writer = AsyncWriter::new(Vec::new());
        writer.write_bin_hex(&data).await.unwrap();

        let hex = writer.into_inner().await.unwrap();
        assert_eq!(hex.len(), data.len() * 2);
        assert!(hex.iter().all(|b| *b == b'F'));
    }

    #[test]
    fn reentrancy() {
        let mut writer = AsyncWriter::new(Stalled);
        {
            let mut text = task::spawn(writer.write_text("text"));
            // text is buffered, nothing to write
            assert!(text.poll().is_ready());
        }
        {
            let mut flush = task::spawn(writer.flush());
            assert_pending!(flush.poll());
        }

        let mut call = task::spawn(writer.write_text("more"));
        match call.poll() {
            Poll::Ready(Err(Error::Reentrancy)) => {}
            x => panic!("Expected `Reentrancy`, but got `{:?}`", x),
        }
    }
}
