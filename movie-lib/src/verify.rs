//! Re-reading a freshly written movie to check it.

use crate::*;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Rows kept at each end of a previewed frame.
const PREVIEW_EDGE_ROWS: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Problem {
    LineCount(usize),
    HeaderMismatch { expected: Header, found: Header },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::LineCount(lines) => write!(f, "expected 3 lines, found {}", lines),
            Problem::HeaderMismatch { expected, found } => write!(
                f,
                "header says {}x{}, expected {}x{}",
                found.width, found.height, expected.width, expected.height
            ),
        }
    }
}

#[derive(Debug)]
pub struct Report {
    pub stream: FrameStream,
    pub problems: Vec<Problem>,
}

impl Report {
    pub fn passed(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn write_to<W: Write>(&self, preview_frames: usize, out: &mut W) -> Result<()> {
        let header = self.stream.header();

        writeln!(out, "- Width: {}", header.width)?;
        writeln!(out, "- Height: {}", header.height)?;
        writeln!(out, "- Characters per frame: {}", header.frame_len())?;
        writeln!(out, "- Frames: {}", self.stream.frame_count())?;
        writeln!(out, "- Total characters: {}", self.stream.payload_len())?;

        for problem in &self.problems {
            writeln!(out, "! {}", problem)?;
        }

        for frame in self.stream.frames().take(preview_frames) {
            let start = frame.index() * header.frame_len();

            writeln!(out)?;
            writeln!(
                out,
                "Frame {} (characters {}..{}):",
                frame.index(),
                start,
                start + header.frame_len()
            )?;
            preview(&frame, out)?;
        }

        Ok(())
    }
}

/// Loads `path` and checks its shape against the dimensions it was written
/// with. Only an unreadable or unparsable file is an error; anything else
/// ends up in [`Report::problems`].
pub fn verify(path: impl AsRef<Path>, expected: Header) -> Result<Report> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let lines = text.lines().count();
    let stream = FrameStream::from_string(text)?;
    let mut problems = Vec::new();

    if lines != 3 {
        problems.push(Problem::LineCount(lines));
    }

    if stream.header() != expected {
        problems.push(Problem::HeaderMismatch {
            expected,
            found: stream.header(),
        });
    }

    for problem in &problems {
        log::warn!("{}: {}", path.display(), problem);
    }

    Ok(Report { stream, problems })
}

/// Draws a frame in a border; tall frames show only their first and last
/// few rows.
pub fn preview<W: Write>(frame: &Frame<'_>, out: &mut W) -> Result<()> {
    let rule = "-".repeat(frame.width());
    let elide = frame.height() > 2 * PREVIEW_EDGE_ROWS;

    writeln!(out, "+{}+", rule)?;

    for (y, row) in frame.rows().enumerate() {
        if elide && y >= PREVIEW_EDGE_ROWS && y < frame.height() - PREVIEW_EDGE_ROWS {
            if y == PREVIEW_EDGE_ROWS {
                writeln!(out, "|{:<width$}|", "...", width = frame.width())?;
            }

            continue;
        }

        writeln!(out, "|{}|", row)?;
    }

    writeln!(out, "+{}+", rule)?;

    Ok(())
}
