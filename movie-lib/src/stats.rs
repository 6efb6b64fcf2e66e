use crate::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub header: Option<Header>,
    pub frames: usize,
    pub skipped: usize,
    pub chars: usize,
}

impl Stats {
    pub fn expected_chars(&self) -> usize {
        self.header.map_or(0, |header| header.frame_len() * self.frames)
    }

    /// Post-write self-check; informational only.
    pub fn verified(&self) -> bool {
        self.chars == self.expected_chars()
    }
}
