//! Interactive frame-by-frame viewing.
//!
//! Each input line becomes a [`Command`]; [`transition`] decides what it does
//! to the [`Cursor`] without touching the terminal, and [`Session`] carries
//! out the result.

use crate::*;
use std::fmt;
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const DEFAULT_FPS: u32 = 10;

const COMMANDS: &str = "n (next), p (prev), g <frame> (goto), a (auto-play), q (quit)";

/// The frame currently on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    current: usize,
}

impl Cursor {
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn next(self, frame_count: usize) -> Self {
        Self {
            current: (self.current + 1).min(frame_count.saturating_sub(1)),
        }
    }

    pub fn prev(self) -> Self {
        Self {
            current: self.current.saturating_sub(1),
        }
    }

    pub fn jump(self, target: i64, frame_count: usize) -> Result<Self> {
        usize::try_from(target)
            .ok()
            .filter(|&target| target < frame_count)
            .map(|current| Self { current })
            .ok_or(Error::OutOfRange {
                index: target,
                frame_count,
            })
    }

    /// Where to land once playback returns.
    pub fn after(self, playback: Playback) -> Self {
        playback
            .last_displayed()
            .map_or(self, |current| Self { current })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Jump(i64),
    Play,
    Quit,
    /// `g` without a usable frame number.
    BadJump,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim().to_lowercase();

        match line.as_str() {
            "" | "n" => Command::Next,
            "p" => Command::Prev,
            "a" => Command::Play,
            "q" => Command::Quit,

            _ => match line.strip_prefix('g') {
                // Only the first argument counts; `g 5 6` goes to 5
                Some(target) => target
                    .split_whitespace()
                    .next()
                    .and_then(|target| target.parse().ok())
                    .map_or(Command::BadJump, Command::Jump),

                None => Command::Unknown(line),
            },
        }
    }
}

#[derive(Debug)]
pub enum Transition {
    /// Move to the given frame and draw it.
    Show(Cursor),
    /// Report the problem; the cursor stays put.
    Reject(Rejection),
    /// Play from the current frame.
    Play,
    Quit,
}

#[derive(Debug)]
pub enum Rejection {
    OutOfRange(Error),
    BadJump,
    Unknown(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::OutOfRange(err) => write!(f, "{}", err),
            Rejection::BadJump => write!(f, "Enter a valid frame number, e.g. g 100"),
            Rejection::Unknown(command) => {
                write!(f, "Unknown command: {}\nAvailable commands: {}", command, COMMANDS)
            }
        }
    }
}

pub fn transition(cursor: Cursor, command: &Command, frame_count: usize) -> Transition {
    match command {
        Command::Next => Transition::Show(cursor.next(frame_count)),
        Command::Prev => Transition::Show(cursor.prev()),

        Command::Jump(target) => match cursor.jump(*target, frame_count) {
            Ok(cursor) => Transition::Show(cursor),
            Err(err) => Transition::Reject(Rejection::OutOfRange(err)),
        },

        Command::Play => Transition::Play,
        Command::Quit => Transition::Quit,
        Command::BadJump => Transition::Reject(Rejection::BadJump),
        Command::Unknown(command) => Transition::Reject(Rejection::Unknown(command.clone())),
    }
}

pub fn parse_fps(line: &str) -> u32 {
    line.trim()
        .parse()
        .ok()
        .filter(|&fps| fps > 0)
        .unwrap_or(DEFAULT_FPS)
}

pub struct Session<'a> {
    stream: &'a FrameStream,
    cursor: Cursor,
    cancel: Arc<AtomicBool>,
    max_rows: usize,
}

impl<'a> Session<'a> {
    /// `cancel` is the flag that stops playback; it is cleared before and
    /// after every playback.
    pub fn new(stream: &'a FrameStream, cancel: Arc<AtomicBool>) -> Self {
        Self {
            stream,
            cursor: Cursor::default(),
            cancel,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Reads commands until `q` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        self.show(out)?;

        loop {
            let Some(line) = prompt(&mut input, out, "> ")? else {
                break;
            };

            let command = Command::parse(&line);

            log::debug!("{:?} at frame {}", command, self.cursor.current());

            match transition(self.cursor, &command, self.stream.frame_count()) {
                Transition::Show(cursor) => {
                    self.cursor = cursor;
                    self.show(out)?;
                }

                Transition::Reject(rejection) => {
                    writeln!(out, "{}", rejection)?;
                }

                Transition::Play => {
                    let fps = prompt(
                        &mut input,
                        out,
                        &format!("Frame rate (default {}): ", DEFAULT_FPS),
                    )?
                    .map_or(DEFAULT_FPS, |line| parse_fps(&line));

                    self.play(fps, out)?;
                }

                Transition::Quit => break,
            }
        }

        writeln!(out, "Bye")?;

        Ok(())
    }

    fn show<W: Write>(&self, out: &mut W) -> Result<()> {
        match render(self.stream, self.cursor.current(), self.max_rows, out) {
            Err(err @ Error::OutOfRange { .. }) => {
                writeln!(out, "Error: {}", err)?;
                Ok(())
            }
            result => result,
        }
    }

    fn play<W: Write>(&mut self, fps: u32, out: &mut W) -> Result<()> {
        let start = self.cursor.current();

        if self.stream.frame(start).is_none() {
            let err = Error::out_of_range(start, self.stream.frame_count());
            writeln!(out, "Error: {}", err)?;
            return Ok(());
        }

        writeln!(out, "Playback started (FPS: {})", fps)?;
        writeln!(out, "Press Ctrl+C to stop")?;

        self.cancel.store(false, Ordering::SeqCst);
        let playback = play(self.stream, start, fps, &self.cancel, out);
        self.cancel.store(false, Ordering::SeqCst);

        let playback = playback?;

        match playback {
            Playback::Completed { .. } => writeln!(out, "Playback finished!")?,
            Playback::Cancelled { .. } => writeln!(out, "Playback stopped")?,
        }

        self.cursor = self.cursor.after(playback);
        self.show(out)
    }
}

/// Prints `prompt` and reads one line; `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> Result<Option<String>> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();

    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line))
}
