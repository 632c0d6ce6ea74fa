use std::path::Path;

use tracing::{debug, error, info, trace, warn};

use crate::error::ViewerError;

/// Turns an image path into a pixel grid.
pub trait ImageSource {
    fn decode(&mut self, path: &Path) -> Result<image::RgbaImage, ViewerError>;
}

/// Decodes from disk with the `image` crate, format guessed from the file
/// contents rather than the extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileImageSource;

impl ImageSource for FileImageSource {
    fn decode(&mut self, path: &Path) -> Result<image::RgbaImage, ViewerError> {
        let decode_err = |source: image::ImageError| ViewerError::ImageDecode {
            path: path.to_path_buf(),
            source,
        };

        let img = image::ImageReader::open(path)
            .map_err(|e| decode_err(e.into()))?
            .with_guessed_format()
            .map_err(|e| decode_err(e.into()))?
            .decode()
            .map_err(decode_err)?;

        debug!(
            "decoded {} ({}x{})",
            path.display(),
            img.width(),
            img.height()
        );

        Ok(img.to_rgba8())
    }
}
