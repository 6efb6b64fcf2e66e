//! Encoding image sequences into flat ASCII movies and playing them back.
//!
//! The encoder side is [`Source`] → [`Image`] → [`Encoder`]; the player side
//! is [`FrameStream`], [`render`], [`play`] and the interactive [`Session`].

mod error;
mod format;
mod frame;
mod image;
mod params;
mod player;
mod render;
mod session;
mod source;
mod stats;
mod stream;
pub mod verify;

pub use self::{
    error::*, format::*, frame::*, image::*, params::*, player::*, render::*, session::*,
    source::*, stats::*, stream::*,
};
pub use ::image::GrayImage;
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Concatenates binarized images into one payload.
#[derive(Debug, Default)]
pub struct Encoder {
    stats: Stats,
    buffer: String,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a frame. The first frame locks the movie's dimensions.
    pub fn add(&mut self, image: &Image) {
        let header = *self.stats.header.get_or_insert_with(|| image.header());

        if image.header() != header {
            log::warn!(
                "Frame {} is {}x{} but the movie is {}x{}; the stream will be misaligned",
                self.stats.frames,
                image.header().width,
                image.header().height,
                header.width,
                header.height,
            );
        }

        self.buffer.push_str(image.as_str());
        self.stats.frames += 1;
        self.stats.chars = self.buffer.len();
    }

    /// Feeds a decode result. Failures are skipped, except when nothing has
    /// been added yet: without a first frame there are no dimensions.
    pub fn push(&mut self, image: Result<Image>) -> Result<()> {
        match image {
            Ok(image) => {
                self.add(&image);
                Ok(())
            }

            Err(err) if self.stats.header.is_none() => Err(err),

            Err(err) => {
                log::warn!("{}, skipping", err);
                self.stats.skipped += 1;
                Ok(())
            }
        }
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    fn header(&self) -> Result<Header> {
        self.stats
            .header
            .ok_or_else(|| Error::format("no frames were added"))
    }

    pub fn write_to<W: Write>(self, w: &mut W) -> Result<Stats> {
        self.header()?.write_to(w)?;
        writeln!(w, "{}", self.buffer)?;

        Ok(self.stats)
    }

    pub fn save(self, path: impl AsRef<Path>) -> Result<Stats> {
        let path = path.as_ref();

        self.header()?;

        log::info!("Writing {}", path.display());

        let mut writer = BufWriter::new(File::create(path)?);
        let stats = self.write_to(&mut writer)?;
        writer.flush()?;

        if stats.verified() {
            log::info!("Wrote {} frames ({} characters)", stats.frames, stats.chars);
        } else {
            log::warn!(
                "Wrote {} characters, expected {}",
                stats.chars,
                stats.expected_chars()
            );
        }

        Ok(stats)
    }
}

/// Encodes every image in `source_dir` into the movie file at `output`.
///
/// Nothing is written if the directory is missing, holds no images or its
/// first image can't be decoded.
pub fn encode(
    source_dir: impl AsRef<Path>,
    output: impl AsRef<Path>,
    params: &Params,
) -> Result<Stats> {
    let source = Source::from_dir(source_dir)?;

    encode_images(source.images(params).collect::<Vec<_>>(), output)
}

/// Feeds already decoded images, in order, into a new movie file at
/// `output`; see [`Encoder::push`] for how failures are treated.
pub fn encode_images<I>(images: I, output: impl AsRef<Path>) -> Result<Stats>
where
    I: IntoIterator<Item = Result<Image>>,
{
    let mut encoder = Encoder::new();

    for image in images {
        encoder.push(image)?;
    }

    encoder.save(output)
}
