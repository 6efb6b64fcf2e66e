use crate::*;
use ::image::GrayImage;

/// One source image reduced to foreground/background characters, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    header: Header,
    chars: String,
}

impl Image {
    pub fn new(params: &Params, img: &GrayImage) -> Self {
        let chars = img
            .as_raw()
            .iter()
            .map(|&brightness| glyph(brightness, params.threshold))
            .collect();

        Self {
            header: Header {
                width: img.width() as usize,
                height: img.height() as usize,
            },
            chars,
        }
    }

    pub fn header(&self) -> Header {
        self.header
    }

    pub fn as_str(&self) -> &str {
        &self.chars
    }
}
