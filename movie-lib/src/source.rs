use crate::*;
use ::image::{ImageError, ImageReader};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

const EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Image files making up a movie, in frame order.
#[derive(Clone, Debug)]
pub struct Source {
    paths: Vec<PathBuf>,
}

impl Source {
    pub fn from_dir(path: impl AsRef<Path>) -> Result<Self> {
        let dir = path.as_ref();

        if !dir.is_dir() {
            return Err(Error::NotFound {
                path: dir.to_path_buf(),
            });
        }

        let pattern = Path::new(&glob::Pattern::escape(&dir.to_string_lossy())).join("*");
        let paths = glob::glob(&pattern.to_string_lossy())
            .map_err(|err| Error::format(format!("bad directory pattern: {}", err)))?;

        let mut paths: Vec<_> = paths
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(err) => {
                    log::warn!("Couldn't read {}: {}", err.path().display(), err.error());
                    None
                }
            })
            .filter(|path| path.is_file() && is_image(path))
            .collect();

        if paths.is_empty() {
            return Err(Error::EmptyInput {
                dir: dir.to_path_buf(),
            });
        }

        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        log::info!("Found {} images in {}", paths.len(), dir.display());

        Ok(Self { paths })
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Decodes and binarizes every image on the rayon pool; items come out
    /// in frame order.
    pub fn images<'a>(
        &'a self,
        params: &'a Params,
    ) -> impl IndexedParallelIterator<Item = Result<Image>> + 'a {
        self.paths.par_iter().map(move |path| load_image(path, params))
    }
}

pub fn load_image(path: &Path, params: &Params) -> Result<Image> {
    log::debug!("Processing: {}", path.display());

    let failure = |source: ImageError| Error::DecodeFailure {
        path: path.to_path_buf(),
        source,
    };

    let image = ImageReader::open(path)
        .map_err(|err| failure(ImageError::IoError(err)))?
        .with_guessed_format()
        .map_err(|err| failure(ImageError::IoError(err)))?
        .decode()
        .map_err(failure)?;

    Ok(Image::new(params, &image.to_luma8()))
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{GrayImage, Luma};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn matches_extensions_case_insensitively() {
        assert!(is_image(Path::new("a.png")));
        assert!(is_image(Path::new("a.JPG")));
        assert!(is_image(Path::new("a.JpEg")));
        assert!(!is_image(Path::new("a.bmp")));
        assert!(!is_image(Path::new("a.png.txt")));
        assert!(!is_image(Path::new("png")));
    }

    #[test]
    fn sorts_by_file_name() {
        let dir = tempdir().unwrap();

        for name in ["frame10.png", "frame02.PNG", "frame01.jpg", "notes.txt"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let source = Source::from_dir(dir.path()).unwrap();
        let names: Vec<_> = source
            .paths()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, ["frame01.jpg", "frame02.PNG", "frame10.png"]);
    }

    #[test]
    fn ignores_subdirectories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("nested.png")).unwrap();
        fs::write(dir.path().join("nested.png").join("inner.png"), b"").unwrap();

        assert!(matches!(
            Source::from_dir(dir.path()),
            Err(Error::EmptyInput { .. })
        ));
    }

    #[test]
    fn missing_dir() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");

        assert!(matches!(
            Source::from_dir(&missing),
            Err(Error::NotFound { path }) if path == missing
        ));
    }

    #[test]
    fn undecodable_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"definitely not a png").unwrap();

        assert!(matches!(
            load_image(&path, &Params::default()),
            Err(Error::DecodeFailure { .. })
        ));
    }

    #[test]
    fn decodes_in_order() {
        let dir = tempdir().unwrap();

        GrayImage::from_pixel(2, 1, Luma([255]))
            .save(dir.path().join("b.png"))
            .unwrap();
        GrayImage::from_pixel(2, 1, Luma([0]))
            .save(dir.path().join("a.png"))
            .unwrap();

        let source = Source::from_dir(dir.path()).unwrap();
        let params = Params::default();
        let images: Vec<_> = source
            .images(&params)
            .map(|image| image.unwrap().as_str().to_owned())
            .collect();

        assert_eq!(images, ["  ", "##"]);
    }
}
