use crate::*;
use std::fmt;

/// A borrowed view of one frame's characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame<'a> {
    index: usize,
    header: Header,
    chars: &'a str,
}

impl<'a> Frame<'a> {
    /// `chars` must be ASCII and exactly one frame long.
    pub(crate) fn new(index: usize, header: Header, chars: &'a str) -> Self {
        debug_assert_eq!(chars.len(), header.frame_len());
        debug_assert!(chars.is_ascii());

        Self {
            index,
            header,
            chars,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn width(&self) -> usize {
        self.header.width
    }

    pub fn height(&self) -> usize {
        self.header.height
    }

    pub fn as_str(&self) -> &'a str {
        self.chars
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &'a str> + DoubleEndedIterator {
        let chars = self.chars;
        let width = self.header.width;

        (0..self.header.height).map(move |y| &chars[y * width..(y + 1) * width])
    }
}

impl fmt::Display for Frame<'_> {
    /// Rows separated by newlines, without borders.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }

            f.write_str(row)?;
        }

        Ok(())
    }
}
