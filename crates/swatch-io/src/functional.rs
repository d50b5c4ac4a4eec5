use std::path::Path;

use swatch_image::{Image, ImageSize};

use crate::error::IoError;

/// A decoded image, with or without a transparency channel.
#[derive(Clone, Debug, PartialEq)]
pub enum GenericImage {
    /// 8-bit RGB image
    Rgb8(Image<u8, 3>),
    /// 8-bit RGB image with alpha channel
    Rgba8(Image<u8, 4>),
}

impl GenericImage {
    /// The size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            GenericImage::Rgb8(image) => image.size(),
            GenericImage::Rgba8(image) => image.size(),
        }
    }

    /// Whether the image carries a transparency channel.
    pub fn has_alpha(&self) -> bool {
        matches!(self, GenericImage::Rgba8(_))
    }
}

/// Decodes an image from an in-memory buffer.
///
/// The format is guessed from the content. Formats carrying an alpha channel
/// decode to [`GenericImage::Rgba8`], every other format (including
/// grayscale and 16-bit variants) decodes to [`GenericImage::Rgb8`].
///
/// # Arguments
///
/// * `bytes` - The encoded image, e.g. the body of an upload.
///
/// # Errors
///
/// Returns [`IoError::EmptyBuffer`] for an empty buffer and
/// [`IoError::ImageDecodeError`] if the data cannot be decoded.
pub fn decode_image(bytes: &[u8]) -> Result<GenericImage, IoError> {
    if bytes.is_empty() {
        return Err(IoError::EmptyBuffer);
    }

    let img = image::load_from_memory(bytes)?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    log::debug!("decoded {:?} image of {}", img.color(), size);

    let image = if img.color().has_alpha() {
        GenericImage::Rgba8(Image::new(size, img.into_rgba8().into_raw())?)
    } else {
        GenericImage::Rgb8(Image::new(size, img.into_rgb8().into_raw())?)
    };

    Ok(image)
}

/// Reads an image from the given file path.
///
/// The method tries to read from any image format supported by the image crate.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<GenericImage, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let bytes = std::fs::read(file_path)?;
    decode_image(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_png(img: image::DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn decode_rgb_png() -> Result<(), IoError> {
        let img = image::RgbImage::from_pixel(4, 3, image::Rgb([10, 20, 30]));
        let bytes = encode_png(image::DynamicImage::ImageRgb8(img));

        let decoded = decode_image(&bytes)?;
        assert!(!decoded.has_alpha());
        assert_eq!(decoded.size(), ImageSize { width: 4, height: 3 });

        let GenericImage::Rgb8(image) = decoded else {
            panic!("expected an rgb image");
        };
        assert!(image.pixels().all(|p| p == [10, 20, 30]));
        Ok(())
    }

    #[test]
    fn decode_rgba_png() -> Result<(), IoError> {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([1, 2, 3, 0]));
        let bytes = encode_png(image::DynamicImage::ImageRgba8(img));

        let decoded = decode_image(&bytes)?;
        assert!(decoded.has_alpha());

        let GenericImage::Rgba8(image) = decoded else {
            panic!("expected an rgba image");
        };
        let expected = vec![1u8, 2, 3, 0].repeat(4);
        assert_eq!(image.as_slice(), expected.as_slice());
        Ok(())
    }

    #[test]
    fn decode_gray_promotes_to_rgb() -> Result<(), IoError> {
        let img = image::GrayImage::from_pixel(3, 1, image::Luma([77]));
        let bytes = encode_png(image::DynamicImage::ImageLuma8(img));

        let GenericImage::Rgb8(image) = decode_image(&bytes)? else {
            panic!("expected an rgb image");
        };
        assert!(image.pixels().all(|p| p == [77, 77, 77]));
        Ok(())
    }

    #[test]
    fn decode_garbage() {
        assert!(matches!(decode_image(&[]), Err(IoError::EmptyBuffer)));
        assert!(matches!(
            decode_image(b"definitely not an image"),
            Err(IoError::ImageDecodeError(_))
        ));
    }

    #[test]
    fn read_from_file() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("swatch.png");

        let img = image::RgbImage::from_pixel(5, 5, image::Rgb([255, 0, 0]));
        std::fs::write(&file_path, encode_png(image::DynamicImage::ImageRgb8(img)))?;

        let decoded = read_image_any(&file_path)?;
        assert_eq!(decoded.size(), ImageSize { width: 5, height: 5 });

        let missing = read_image_any(tmp_dir.path().join("missing.png"));
        assert!(matches!(missing, Err(IoError::FileDoesNotExist(_))));
        Ok(())
    }
}
