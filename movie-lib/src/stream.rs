use crate::*;
use std::fs;
use std::io;
use std::ops::Range;
use std::path::Path;

/// A whole movie held in memory.
///
/// Frames are addressed by arithmetic on the payload: frame `i` is the
/// characters `i * width * height .. (i + 1) * width * height`. A trailing
/// partial frame is kept in the payload but never addressable.
///
/// The payload is ASCII, so byte offsets and character offsets agree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameStream {
    header: Header,
    payload: String,
}

impl FrameStream {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let text = fs::read_to_string(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => Error::NotFound {
                path: path.to_path_buf(),
            },
            _ => Error::Io(err),
        })?;

        let stream = Self::from_string(text)?;

        log::info!(
            "Loaded {}: {}x{}, {} frames",
            path.display(),
            stream.width(),
            stream.height(),
            stream.frame_count()
        );

        Ok(stream)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Self::from_string(text.to_owned())
    }

    /// Like [`FrameStream::parse`], but reuses `text`'s allocation for the
    /// payload.
    pub fn from_string(mut text: String) -> Result<Self> {
        let (header, payload) = layout(&text)?;

        if !text[payload.clone()].is_ascii() {
            return Err(Error::format("payload contains non-ASCII characters"));
        }

        text.truncate(payload.end);
        text.drain(..payload.start);

        let stream = Self {
            header,
            payload: text,
        };

        let remainder = stream.remainder();

        if remainder > 0 {
            log::warn!(
                "Payload ends with a partial frame ({} of {} characters); ignoring it",
                remainder,
                stream.header.frame_len()
            );
        }

        Ok(stream)
    }

    pub fn header(&self) -> Header {
        self.header
    }

    pub fn width(&self) -> usize {
        self.header.width
    }

    pub fn height(&self) -> usize {
        self.header.height
    }

    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    pub fn frame_count(&self) -> usize {
        self.payload.len() / self.header.frame_len()
    }

    /// Characters past the last full frame.
    pub fn remainder(&self) -> usize {
        self.payload.len() % self.header.frame_len()
    }

    pub fn frame(&self, index: usize) -> Option<Frame<'_>> {
        if index >= self.frame_count() {
            return None;
        }

        Some(self.slice(index))
    }

    pub fn frames(&self) -> impl ExactSizeIterator<Item = Frame<'_>> {
        (0..self.frame_count()).map(move |index| self.slice(index))
    }

    fn slice(&self, index: usize) -> Frame<'_> {
        let len = self.header.frame_len();
        let start = index * len;

        Frame::new(index, self.header, &self.payload[start..start + len])
    }
}

/// Finds the header and the byte range of the payload line, without its
/// line terminator.
fn layout(text: &str) -> Result<(Header, Range<usize>)> {
    let mut lines: Vec<Range<usize>> = Vec::with_capacity(3);
    let mut start = 0;

    while lines.len() < 3 && start < text.len() {
        let end = text[start..].find('\n').map_or(text.len(), |at| start + at);
        let line = &text[start..end];
        let len = line.strip_suffix('\r').unwrap_or(line).len();

        lines.push(start..start + len);
        start = end + 1;
    }

    let [width, height, payload] = lines.as_slice() else {
        return Err(Error::format(format!(
            "expected at least 3 lines, found {}",
            lines.len()
        )));
    };

    let header = Header::parse(&text[width.clone()], &text[height.clone()])?;

    Ok((header, payload.clone()))
}
