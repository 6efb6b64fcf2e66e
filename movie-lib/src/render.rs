use crate::*;
use crossterm::{cursor, queue, terminal};
use std::io::Write;

/// Rows shown when stepping through frames by hand.
pub const DEFAULT_MAX_ROWS: usize = 25;

/// Rows shown during playback; large enough to never cut a frame short.
pub const PLAYBACK_MAX_ROWS: usize = usize::MAX;

pub const COMMAND_HINT: &str = "Commands: (n)ext (p)rev (g)oto <frame> (a)uto-play (q)uit";

/// Clears the terminal and draws frame `index` inside a border.
///
/// Rows past `max_rows` are left out. Everything is written in a single
/// `write_all` so a frame never appears half-drawn.
pub fn render<W: Write>(
    stream: &FrameStream,
    index: usize,
    max_rows: usize,
    out: &mut W,
) -> Result<()> {
    let frame = stream
        .frame(index)
        .ok_or_else(|| Error::out_of_range(index, stream.frame_count()))?;

    let mut buf: Vec<u8> = Vec::new();

    queue!(
        buf,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    draw(&frame, stream.frame_count(), max_rows, &mut buf)?;
    writeln!(buf, "{}", COMMAND_HINT)?;

    out.write_all(&buf)?;
    out.flush()?;

    Ok(())
}

fn draw<W: Write>(
    frame: &Frame<'_>,
    frame_count: usize,
    max_rows: usize,
    out: &mut W,
) -> Result<()> {
    let rule = "-".repeat(frame.width());

    writeln!(out, "=== Frame {}/{} ===", frame.index(), frame_count - 1)?;
    writeln!(out, "+{}+", rule)?;

    for row in frame.rows().take(max_rows) {
        writeln!(out, "|{}|", row)?;
    }

    writeln!(out, "+{}+", rule)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream() -> FrameStream {
        FrameStream::parse("3\n4\n###   # # #### ##       \n").unwrap()
    }

    fn rendered(index: usize, max_rows: usize) -> String {
        let mut out = Vec::new();
        render(&stream(), index, max_rows, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        let start = out.find("===").unwrap();

        out[start..].to_owned()
    }

    #[test]
    fn draws_bordered_frame() {
        assert_eq!(
            rendered(0, DEFAULT_MAX_ROWS),
            format!(
                "=== Frame 0/1 ===\n+---+\n|###|\n|   |\n|# #|\n| ##|\n+---+\n{}\n",
                COMMAND_HINT
            )
        );
    }

    #[test]
    fn omits_rows_past_limit() {
        assert_eq!(
            rendered(1, 2),
            format!("=== Frame 1/1 ===\n+---+\n|## |\n|## |\n+---+\n{}\n", COMMAND_HINT)
        );
    }

    #[test]
    fn clears_screen_first() {
        let mut out = Vec::new();
        render(&stream(), 0, DEFAULT_MAX_ROWS, &mut out).unwrap();

        assert!(out.starts_with(b"\x1b["));
    }

    #[test]
    fn missing_frame_draws_nothing() {
        let mut out = Vec::new();

        assert!(matches!(
            render(&stream(), 2, DEFAULT_MAX_ROWS, &mut out),
            Err(Error::OutOfRange { index: 2, frame_count: 2 })
        ));
        assert!(out.is_empty());
    }
}
