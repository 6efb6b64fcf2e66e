use crate::*;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Longest stretch spent asleep without looking at the cancellation flag.
const CANCEL_POLL: Duration = Duration::from_millis(10);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Playback {
    /// Every frame through the last one was shown.
    Completed { last: usize },

    /// Stopped by the cancellation flag; `last` is the final frame actually
    /// shown, if any.
    Cancelled { last: Option<usize> },
}

impl Playback {
    pub fn last_displayed(&self) -> Option<usize> {
        match *self {
            Playback::Completed { last } => Some(last),
            Playback::Cancelled { last } => last,
        }
    }
}

/// Shows frames `start..frame_count` at `fps` frames per second.
///
/// `cancel` is checked before each frame and while sleeping between frames.
pub fn play<W: Write>(
    stream: &FrameStream,
    start: usize,
    fps: u32,
    cancel: &AtomicBool,
    out: &mut W,
) -> Result<Playback> {
    let frame_count = stream.frame_count();

    if start >= frame_count {
        return Err(Error::out_of_range(start, frame_count));
    }

    if fps == 0 {
        return Err(Error::InvalidFps);
    }

    let delay = Duration::from_secs(1) / fps;
    let mut last = None;

    log::debug!("Playing frames {}..{} at {} fps", start, frame_count, fps);

    for index in start..frame_count {
        if cancel.load(Ordering::SeqCst) {
            return Ok(Playback::Cancelled { last });
        }

        render(stream, index, PLAYBACK_MAX_ROWS, out)?;
        writeln!(out, "Playing... frame {}/{}", index, frame_count - 1)?;
        out.flush()?;
        last = Some(index);

        if index + 1 < frame_count && !sleep(delay, cancel) {
            return Ok(Playback::Cancelled { last });
        }
    }

    Ok(Playback::Completed {
        last: frame_count - 1,
    })
}

/// Sleeps for `duration` unless cancelled first; returns whether the full
/// duration elapsed.
fn sleep(duration: Duration, cancel: &AtomicBool) -> bool {
    let deadline = Instant::now() + duration;

    loop {
        if cancel.load(Ordering::SeqCst) {
            return false;
        }

        let now = Instant::now();

        if now >= deadline {
            return true;
        }

        thread::sleep((deadline - now).min(CANCEL_POLL));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Arc;

    fn stream(frames: usize) -> FrameStream {
        FrameStream::parse(&format!("1\n1\n{}\n", "#".repeat(frames))).unwrap()
    }

    /// Raises the cancellation flag once `limit` frames were drawn.
    struct CancelAfter {
        frames: usize,
        limit: usize,
        cancel: Arc<AtomicBool>,
    }

    impl Write for CancelAfter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if buf.windows(9).any(|w| w == b"=== Frame") {
                self.frames += 1;

                if self.frames >= self.limit {
                    self.cancel.store(true, Ordering::SeqCst);
                }
            }

            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn plays_to_the_end() {
        let cancel = AtomicBool::new(false);
        let mut out = Vec::new();

        let playback = play(&stream(4), 1, 1000, &cancel, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(playback, Playback::Completed { last: 3 });
        assert_eq!(out.matches("=== Frame").count(), 3);
        assert!(out.contains("Playing... frame 3/3"));
        assert!(!out.contains("=== Frame 0/"));
    }

    #[test]
    fn single_frame() {
        let cancel = AtomicBool::new(false);
        let playback = play(&stream(1), 0, 1, &cancel, &mut io::sink()).unwrap();

        assert_eq!(playback, Playback::Completed { last: 0 });
    }

    #[test]
    fn stops_when_cancelled() {
        let cancel = Arc::new(AtomicBool::new(false));
        let mut out = CancelAfter {
            frames: 0,
            limit: 2,
            cancel: Arc::clone(&cancel),
        };

        let playback = play(&stream(10), 3, 1000, &cancel, &mut out).unwrap();

        assert_eq!(playback, Playback::Cancelled { last: Some(4) });
        assert_eq!(out.frames, 2);
    }

    #[test]
    fn cancelled_before_first_frame() {
        let cancel = AtomicBool::new(true);
        let mut out = Vec::new();

        let playback = play(&stream(3), 0, 10, &cancel, &mut out).unwrap();

        assert_eq!(playback, Playback::Cancelled { last: None });
        assert_eq!(playback.last_displayed(), None);
        assert!(out.is_empty());
    }

    #[test]
    fn cancellation_interrupts_sleep() {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            flag.store(true, Ordering::SeqCst);
        });

        let started = Instant::now();
        // 1 fps: only cancellation can end this before the second frame
        let playback = play(&stream(3), 0, 1, &cancel, &mut io::sink());

        handle.join().unwrap();

        assert_eq!(playback.unwrap(), Playback::Cancelled { last: Some(0) });
        assert!(started.elapsed() < Duration::from_millis(900));
    }

    #[test]
    fn rejects_bad_start() {
        let cancel = AtomicBool::new(false);

        assert!(matches!(
            play(&stream(3), 3, 10, &cancel, &mut io::sink()),
            Err(Error::OutOfRange { index: 3, frame_count: 3 })
        ));
        assert!(matches!(
            play(&stream(0), 0, 10, &cancel, &mut io::sink()),
            Err(Error::OutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_zero_fps() {
        let cancel = AtomicBool::new(false);

        assert!(matches!(
            play(&stream(3), 0, 0, &cancel, &mut io::sink()),
            Err(Error::InvalidFps)
        ));
    }
}
