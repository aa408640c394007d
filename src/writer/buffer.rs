//! The buffer between the writers and the sink.

use std::io::Write;

#[cfg(feature = "encoding")]
use crate::encoding::Transcoder;
use crate::encoding::OutputEncoding;
use crate::escape::{write_char_ref, write_percent_encoded};
use crate::Result;

/// Size of the buffer in bytes. When the buffer holds that much data, it is
/// written to the sink before the next piece is appended.
pub const BUFFER_SIZE: usize = 6144;
/// Space that is always available after [`BUFFER_SIZE`], so that small pieces
/// (tags delimiters, entities, character references) can be appended
/// without a capacity check.
pub const OVERFLOW: usize = 32;

/// Positions in the buffer that the writers remember to make decisions about
/// the following output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mark {
    /// Right after the `>` of the last start tag. Used to collapse empty
    /// elements.
    ContentStart,
    /// Right after the last text. Initially set to the start of output.
    TextEnd,
    /// Right after the element name or the last attribute in a start tag.
    AttributeEnd,
    /// Right after the last `]]>`. Used to merge adjacent CDATA sections.
    CDataEnd,
    /// Right after the last tag of a block-level HTML element.
    BlockEnd,
}

const MARKS: usize = 5;

/// A pipelining buffer which owns the sink.
///
/// The buffer collects pieces of output and writes them to the sink when it
/// is full. It also remembers a few [positions](Mark) of interesting places
/// in the output. When the buffer is flushed, a mark that points to the end
/// of the flushed data is moved to the start of the empty buffer, all other
/// marks are forgotten.
pub(crate) struct OutputBuffer<W> {
    sink: W,
    buf: String,
    marks: [Option<usize>; MARKS],
    #[cfg(feature = "encoding")]
    transcoder: Option<Transcoder>,
}

impl<W> OutputBuffer<W> {
    pub fn new(sink: W, encoding: OutputEncoding) -> Self {
        #[cfg(not(feature = "encoding"))]
        let _ = encoding;
        let mut marks = [None; MARKS];
        marks[Mark::TextEnd as usize] = Some(0);
        Self {
            sink,
            buf: String::with_capacity(BUFFER_SIZE + OVERFLOW),
            marks,
            #[cfg(feature = "encoding")]
            transcoder: encoding.transcoder(),
        }
    }

    /// Current write position.
    #[cfg(test)]
    #[inline]
    pub fn cursor(&self) -> usize {
        self.buf.len()
    }

    /// Data that is written but not flushed yet.
    #[cfg(test)]
    #[inline]
    pub fn pending(&self) -> &str {
        &self.buf
    }

    /// Remembers the current position.
    #[inline]
    pub fn mark(&mut self, mark: Mark) {
        self.marks[mark as usize] = Some(self.buf.len());
    }

    /// Returns `true` if nothing was written since the mark was set.
    #[inline]
    pub fn at(&self, mark: Mark) -> bool {
        self.marks[mark as usize] == Some(self.buf.len())
    }

    /// Removes `suffix` from the end of the buffer if the buffer ends with it.
    /// Returns `false` and does nothing if it does not, which also happens if
    /// the suffix was already flushed.
    pub fn pop_suffix(&mut self, suffix: &str) -> bool {
        if self.buf.ends_with(suffix) {
            self.buf.truncate(self.buf.len() - suffix.len());
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Returns the sink. Data that was not flushed is lost.
    #[inline]
    pub fn into_sink(self) -> W {
        self.sink
    }
}

impl<W: Write> OutputBuffer<W> {
    /// Flushes the buffer if it is full.
    #[inline]
    fn reserve(&mut self) -> Result<()> {
        if self.buf.len() >= BUFFER_SIZE {
            self.flush_buffer()?;
        }
        Ok(())
    }

    /// Appends a piece of output of any size. Long pieces are split on
    /// character boundaries, so the buffer never grows above its capacity.
    pub fn push_str(&mut self, mut s: &str) -> Result<()> {
        while !s.is_empty() {
            self.reserve()?;
            let mut end = s.len().min(BUFFER_SIZE - self.buf.len());
            // crossing the limit by the rest of a character fits into the overflow space
            while !s.is_char_boundary(end) {
                end += 1;
            }
            self.buf.push_str(&s[..end]);
            s = &s[end..];
        }
        Ok(())
    }

    /// Appends a single character.
    #[inline]
    pub fn push(&mut self, ch: char) -> Result<()> {
        self.reserve()?;
        self.buf.push(ch);
        Ok(())
    }

    /// Appends a piece of output that is not longer than [`OVERFLOW`] bytes.
    #[inline]
    pub fn push_small(&mut self, s: &str) -> Result<()> {
        debug_assert!(s.len() <= OVERFLOW);
        self.reserve()?;
        self.buf.push_str(s);
        Ok(())
    }

    /// Appends a character reference `&#xHHHH;`.
    #[inline]
    pub fn push_char_ref(&mut self, ch: char) -> Result<()> {
        self.reserve()?;
        write_char_ref(&mut self.buf, ch);
        Ok(())
    }

    /// Appends the character as a sequence of percent-encoded UTF-8 bytes.
    #[inline]
    pub fn push_percent_encoded(&mut self, ch: char) -> Result<()> {
        self.reserve()?;
        write_percent_encoded(&mut self.buf, ch);
        Ok(())
    }

    /// Writes all buffered data to the sink without flushing the sink itself.
    pub fn flush_buffer(&mut self) -> Result<()> {
        let len = self.buf.len();
        if len == 0 {
            return Ok(());
        }
        log::trace!("writing {} buffered bytes to the sink", len);

        #[cfg(feature = "encoding")]
        match &mut self.transcoder {
            Some(transcoder) => self.sink.write_all(transcoder.transcode(&self.buf))?,
            None => self.sink.write_all(self.buf.as_bytes())?,
        }
        #[cfg(not(feature = "encoding"))]
        self.sink.write_all(self.buf.as_bytes())?;

        self.buf.clear();
        for mark in &mut self.marks {
            *mark = match *mark {
                Some(pos) if pos == len => Some(0),
                _ => None,
            };
        }
        Ok(())
    }

    /// Writes all buffered data to the sink and flushes the sink.
    pub fn flush(&mut self) -> Result<()> {
        self.flush_buffer()?;
        self.sink.flush()?;
        Ok(())
    }
}

impl<W> std::fmt::Debug for OutputBuffer<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("OutputBuffer")
            .field("buf", &self.buf)
            .field("marks", &self.marks)
            .finish()
    }
}
