pub const DEFAULT_THRESHOLD: u8 = 127;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    pub(crate) threshold: u8,
}

impl Params {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
