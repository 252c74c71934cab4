use image::{ImageFormat, RgbaImage};

use crate::error::{MuralError, Result};
use crate::format::archive::extension;
use crate::format::Asset;

/// A decoded raster image, RGBA8 row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Picture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for Picture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Picture")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Picture {
    pub fn from_rgba8(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            pixels: image.into_raw(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The checkerboard substituted wherever a graphic is missing.
    pub fn error_picture() -> Self {
        const SIZE: u32 = 32;
        const CELL: u32 = 8;
        let image = RgbaImage::from_fn(SIZE, SIZE, |x, y| {
            if (x / CELL + y / CELL) % 2 == 0 {
                image::Rgba([255, 0, 255, 255])
            } else {
                image::Rgba([0, 0, 0, 255])
            }
        });
        Self::from_rgba8(image)
    }
}

impl Asset for Picture {
    fn load_from_bytes(name: &str, data: Vec<u8>) -> Result<Self> {
        let format = match extension(name).as_deref() {
            Some("png") => ImageFormat::Png,
            Some("jpg") | Some("jpeg") => ImageFormat::Jpeg,
            _ => return Err(MuralError::UnsupportedFormat(name.to_string())),
        };

        let image = image::load_from_memory_with_format(&data, format)
            .map_err(|e| MuralError::decode(name, e))?;

        Ok(Self::from_rgba8(image.to_rgba8()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::png_bytes;

    #[test]
    fn decode_png() {
        let picture = Picture::load_from_bytes("m.png", png_bytes(4, 3)).unwrap();
        assert_eq!(picture.width(), 4);
        assert_eq!(picture.height(), 3);
        assert_eq!(picture.pixels().len(), 4 * 3 * 4);
        assert_eq!(&picture.pixels()[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn reject_unknown_extension() {
        let err = Picture::load_from_bytes("m.bmp", png_bytes(1, 1)).unwrap_err();
        assert!(matches!(err, MuralError::UnsupportedFormat(_)));
    }

    #[test]
    fn garbage_fails_to_decode() {
        let err = Picture::load_from_bytes("m.png", b"not a png".to_vec()).unwrap_err();
        assert!(matches!(err, MuralError::Decode { .. }));
    }

    #[test]
    fn error_picture_is_checkered() {
        let picture = Picture::error_picture();
        assert_eq!((picture.width(), picture.height()), (32, 32));
        assert_eq!(&picture.pixels()[..4], &[255, 0, 255, 255]);
        let second_cell = 8 * 4;
        assert_eq!(&picture.pixels()[second_cell..second_cell + 4], &[0, 0, 0, 255]);
    }
}
