//! Destinations for exported mockups.

use crate::util::MockupResult;
use image::RgbImage;
use std::collections::BTreeMap;

/// Receives finished mockups by export file name.
pub trait ExportSink {
    fn write(&mut self, name: &str, image: &RgbImage) -> MockupResult<()>;
}

/// Keeps exported mockups in memory, ordered by name.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub entries: BTreeMap<String, RgbImage>,
}

impl ExportSink for MemorySink {
    fn write(&mut self, name: &str, image: &RgbImage) -> MockupResult<()> {
        self.entries.insert(name.to_string(), image.clone());
        Ok(())
    }
}

#[cfg(feature = "image-io")]
pub use dir::DirSink;

#[cfg(feature = "image-io")]
mod dir {
    use super::ExportSink;
    use crate::image::io::{encode_jpeg, DEFAULT_JPEG_QUALITY};
    use crate::util::{MockupError, MockupResult};
    use image::RgbImage;
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Writes each mockup as a JPEG file in a directory.
    pub struct DirSink {
        dir: PathBuf,
        quality: u8,
        written: Vec<PathBuf>,
    }

    impl DirSink {
        /// Creates `dir` (and parents) if needed.
        pub fn create(dir: impl Into<PathBuf>) -> MockupResult<Self> {
            let dir = dir.into();
            fs::create_dir_all(&dir).map_err(|err| MockupError::ImageIo {
                reason: format!("{}: {err}", dir.display()),
            })?;
            Ok(Self {
                dir,
                quality: DEFAULT_JPEG_QUALITY,
                written: Vec::new(),
            })
        }

        /// Sets the JPEG quality (1..=100).
        pub fn with_quality(mut self, quality: u8) -> Self {
            self.quality = quality.clamp(1, 100);
            self
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        /// Paths written so far, in write order.
        pub fn written(&self) -> &[PathBuf] {
            &self.written
        }
    }

    impl ExportSink for DirSink {
        fn write(&mut self, name: &str, image: &RgbImage) -> MockupResult<()> {
            let bytes = encode_jpeg(image, self.quality)?;
            let path = self.dir.join(name);
            fs::write(&path, bytes).map_err(|err| MockupError::ImageIo {
                reason: format!("{}: {err}", path.display()),
            })?;
            self.written.push(path);
            Ok(())
        }
    }
}
