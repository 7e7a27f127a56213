use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::ImageReader;

use super::AssetError;

/// Decoded image pixels, straight-alpha RGBA8, row-major, no row padding.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// Bytes per row of `rgba`.
    #[inline]
    pub fn stride(&self) -> u32 {
        self.width * 4
    }
}

/// Loads and decodes the image at `path`.
///
/// The format is detected from the file contents, not the extension.
pub fn load_image(path: impl AsRef<Path>) -> Result<DecodedImage, AssetError> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| AssetError::Missing {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let decode_err = |e: &dyn std::fmt::Display| AssetError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let reader = ImageReader::new(BufReader::new(file))
        .with_guessed_format()
        .map_err(|e| decode_err(&e))?;
    let img = reader.decode().map_err(|e| decode_err(&e))?.to_rgba8();

    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(AssetError::Empty { path: path.to_path_buf() });
    }

    log::debug!("decoded {} ({width}x{height})", path.display());

    Ok(DecodedImage {
        width,
        height,
        rgba: img.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pacer-assets-{}-{name}", std::process::id()))
    }

    #[test]
    fn missing_file_is_reported() {
        let path = scratch("does-not-exist.png");
        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, AssetError::Missing { .. }));
        assert_eq!(err.path(), &path);
        assert!(err.to_string().contains("does-not-exist.png"));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let path = scratch("garbage.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        let err = load_image(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, AssetError::Decode { .. }));
    }

    #[test]
    fn decodes_png_to_rgba8() {
        let path = scratch("tiny.png");
        let img = image::RgbImage::from_fn(3, 2, |x, y| image::Rgb([x as u8 * 10, y as u8 * 20, 7]));
        img.save_with_format(&path, image::ImageFormat::Png).unwrap();

        let decoded = load_image(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(decoded.stride(), 12);
        assert_eq!(decoded.rgba.len(), 3 * 2 * 4);
        // Pixel (2, 1), alpha filled in by the RGBA conversion.
        let i = (1 * 3 + 2) * 4;
        assert_eq!(&decoded.rgba[i..i + 4], &[20, 20, 7, 255]);
    }
}
