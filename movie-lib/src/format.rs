//! The flat movie format.
//!
//! ```text
//! <width>
//! <height>
//! <payload>
//! ```
//!
//! The payload is every frame's characters back to back, with no separators;
//! frame boundaries follow from `width * height` alone.

use crate::*;
use std::io::Write;

/// Pixel at or above the threshold.
pub const FOREGROUND: char = '#';

/// Pixel below the threshold.
pub const BACKGROUND: char = ' ';

pub fn glyph(brightness: u8, threshold: u8) -> char {
    if brightness >= threshold {
        FOREGROUND
    } else {
        BACKGROUND
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub width: usize,
    pub height: usize,
}

impl Header {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::format(format!(
                "frame dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        if width.checked_mul(height).is_none() {
            return Err(Error::format(format!(
                "frame dimensions {}x{} are too large",
                width, height
            )));
        }

        Ok(Self { width, height })
    }

    /// Parses the two header lines.
    pub fn parse(width: &str, height: &str) -> Result<Self> {
        Self::new(
            parse_dimension("width", width)?,
            parse_dimension("height", height)?,
        )
    }

    /// Characters per frame.
    pub fn frame_len(&self) -> usize {
        self.width * self.height
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        writeln!(w, "{}", self.width)?;
        writeln!(w, "{}", self.height)?;
        Ok(())
    }
}

fn parse_dimension(name: &str, line: &str) -> Result<usize> {
    line.trim().parse().map_err(|_| {
        Error::format(format!(
            "{} line is not a positive integer: {:?}",
            name, line
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        assert_eq!(glyph(127, 127), FOREGROUND);
        assert_eq!(glyph(126, 127), BACKGROUND);
        assert_eq!(glyph(255, 0), FOREGROUND);
        assert_eq!(glyph(0, 0), FOREGROUND);
        assert_eq!(glyph(254, 255), BACKGROUND);
    }

    #[test]
    fn parses_header_lines() {
        let header = Header::parse("84", " 48\r").unwrap();

        assert_eq!(header, Header { width: 84, height: 48 });
        assert_eq!(header.frame_len(), 84 * 48);
    }

    #[test]
    fn rejects_bad_dimensions() {
        for (w, h) in [("0", "4"), ("4", "0"), ("abc", "4"), ("4", "-2"), ("", "4"), ("1.5", "2")] {
            assert!(
                matches!(Header::parse(w, h), Err(Error::Format(_))),
                "{:?}x{:?} should be rejected",
                w,
                h
            );
        }
    }

    #[test]
    fn rejects_overflowing_dimensions() {
        let huge = usize::MAX.to_string();

        assert!(matches!(Header::parse(&huge, "2"), Err(Error::Format(_))));
    }

    #[test]
    fn writes_two_lines() {
        let mut buf = Vec::new();
        Header { width: 3, height: 2 }.write_to(&mut buf).unwrap();

        assert_eq!(buf, b"3\n2\n");
    }
}
