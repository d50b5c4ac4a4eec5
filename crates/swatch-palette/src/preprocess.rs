use std::borrow::Cow;
use std::collections::HashMap;

use fast_image_resize as fr;
use swatch_image::Image;

use crate::config::PaletteConfig;
use crate::error::PaletteError;

/// The pixels a palette is extracted from.
#[derive(Clone, Copy, Debug)]
pub enum PixelSource<'a> {
    /// An opaque image.
    Rgb(&'a Image<u8, 3>),
    /// An image with a transparency channel.
    Rgba(&'a Image<u8, 4>),
}

impl<'a> From<&'a Image<u8, 3>> for PixelSource<'a> {
    fn from(image: &'a Image<u8, 3>) -> Self {
        PixelSource::Rgb(image)
    }
}

impl<'a> From<&'a Image<u8, 4>> for PixelSource<'a> {
    fn from(image: &'a Image<u8, 4>) -> Self {
        PixelSource::Rgba(image)
    }
}

/// Downscale an image so that neither side exceeds `max_dimension`.
///
/// The aspect ratio is preserved and bilinear interpolation is used. Images
/// already within bounds are returned as is.
///
/// # Arguments
///
/// * `image` - The input image.
/// * `max_dimension` - The largest allowed side, in pixels.
///
/// # Returns
///
/// The borrowed input or the downscaled copy.
pub fn downscale(
    image: &Image<u8, 3>,
    max_dimension: usize,
) -> Result<Cow<'_, Image<u8, 3>>, PaletteError> {
    let new_size = image.size().fit_within(max_dimension);
    if new_size == image.size() {
        return Ok(Cow::Borrowed(image));
    }

    log::debug!("downscaling {} image to {}", image.size(), new_size);

    // prepare the input image for the fast_image_resize crate
    let src_image = fr::images::ImageRef::new(
        image.width() as u32,
        image.height() as u32,
        image.as_slice(),
        fr::PixelType::U8x3,
    )
    .map_err(|e| PaletteError::Resize(e.to_string()))?;

    let mut dst = Image::<u8, 3>::from_size_val(new_size, 0)?;

    {
        let mut dst_image = fr::images::Image::from_slice_u8(
            new_size.width as u32,
            new_size.height as u32,
            dst.as_slice_mut(),
            fr::PixelType::U8x3,
        )
        .map_err(|e| PaletteError::Resize(e.to_string()))?;

        let options = fr::ResizeOptions::new()
            .resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Bilinear));

        fr::Resizer::new()
            .resize(&src_image, &mut dst_image, &options)
            .map_err(|e| PaletteError::Resize(e.to_string()))?;
    }

    Ok(Cow::Owned(dst))
}

/// Iterate over the color of pixels whose alpha is above `alpha_threshold`.
pub fn opaque_pixels(
    image: &Image<u8, 4>,
    alpha_threshold: u8,
) -> impl Iterator<Item = [u8; 3]> + '_ {
    image
        .pixels()
        .filter(move |p| p[3] > alpha_threshold)
        .map(|p| [p[0], p[1], p[2]])
}

/// Distinct colors of a pixel population with their number of occurrences.
///
/// Colors are kept in ascending channel order so that the clustering of a
/// given population does not depend on hashing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorHistogram {
    colors: Vec<[u8; 3]>,
    counts: Vec<usize>,
    total: usize,
}

impl ColorHistogram {
    /// Count the colors of a pixel population.
    pub fn from_pixels(pixels: impl IntoIterator<Item = [u8; 3]>) -> Self {
        let mut bins: HashMap<[u8; 3], usize> = HashMap::new();
        for pixel in pixels {
            *bins.entry(pixel).or_default() += 1;
        }

        let mut bins: Vec<([u8; 3], usize)> = bins.into_iter().collect();
        bins.sort_unstable_by_key(|(color, _)| *color);

        let total = bins.iter().map(|(_, count)| count).sum();
        let (colors, counts) = bins.into_iter().unzip();

        Self {
            colors,
            counts,
            total,
        }
    }

    /// Count the usable pixels of an image.
    ///
    /// Images with a transparency channel drop the pixels at or below the
    /// alpha threshold and keep their size. Opaque images are downscaled to
    /// the maximum dimension first.
    pub fn from_source(source: PixelSource, config: &PaletteConfig) -> Result<Self, PaletteError> {
        let histogram = match source {
            PixelSource::Rgba(image) => {
                Self::from_pixels(opaque_pixels(image, config.alpha_threshold))
            }
            PixelSource::Rgb(image) => {
                let image = downscale(image, config.max_dimension)?;
                Self::from_pixels(image.pixels().map(|p| [p[0], p[1], p[2]]))
            }
        };

        log::debug!(
            "collected {} pixels with {} distinct colors",
            histogram.total,
            histogram.num_distinct()
        );

        Ok(histogram)
    }

    /// The distinct colors, in ascending order.
    pub fn colors(&self) -> &[[u8; 3]] {
        &self.colors
    }

    /// The number of pixels of each color.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// The total number of pixels.
    pub fn total(&self) -> usize {
        self.total
    }

    /// The number of distinct colors.
    pub fn num_distinct(&self) -> usize {
        self.colors.len()
    }

    /// Whether no pixel was counted.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swatch_image::ImageSize;

    #[test]
    fn alpha_threshold_is_exclusive() -> Result<(), PaletteError> {
        let image = Image::<u8, 4>::new(
            ImageSize {
                width: 3,
                height: 1,
            },
            vec![10, 10, 10, 30, 20, 20, 20, 31, 30, 30, 30, 255],
        )?;

        let pixels: Vec<[u8; 3]> = opaque_pixels(&image, 30).collect();
        assert_eq!(pixels, vec![[20, 20, 20], [30, 30, 30]]);
        Ok(())
    }

    #[test]
    fn transparent_image_is_empty() -> Result<(), PaletteError> {
        let image = Image::<u8, 4>::from_pixel(
            ImageSize {
                width: 4,
                height: 4,
            },
            [255, 0, 0, 0],
        )?;

        let histogram = ColorHistogram::from_source((&image).into(), &PaletteConfig::default())?;
        assert!(histogram.is_empty());
        assert_eq!(histogram.num_distinct(), 0);
        Ok(())
    }

    #[test]
    fn small_image_is_borrowed() -> Result<(), PaletteError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 700,
                height: 10,
            },
            1,
        )?;
        assert!(matches!(downscale(&image, 700)?, Cow::Borrowed(_)));
        Ok(())
    }

    #[test]
    fn downscale_keeps_aspect_ratio() -> Result<(), PaletteError> {
        let image = Image::<u8, 3>::from_pixel(
            ImageSize {
                width: 1400,
                height: 350,
            },
            [40, 80, 120],
        )?;

        let small = downscale(&image, 700)?;
        assert_eq!(
            small.size(),
            ImageSize {
                width: 700,
                height: 175,
            }
        );
        assert!(small.pixels().all(|p| p == [40, 80, 120]));
        Ok(())
    }

    #[test]
    fn alpha_image_is_not_resized() -> Result<(), PaletteError> {
        let size = ImageSize {
            width: 1500,
            height: 900,
        };
        let config = PaletteConfig::default();

        let rgba = Image::<u8, 4>::from_pixel(size, [12, 34, 56, 255])?;
        let histogram = ColorHistogram::from_source((&rgba).into(), &config)?;
        assert_eq!(histogram.total(), 1500 * 900);
        assert_eq!(histogram.colors(), &[[12, 34, 56]]);

        let rgb = Image::<u8, 3>::from_pixel(size, [12, 34, 56])?;
        let histogram = ColorHistogram::from_source((&rgb).into(), &config)?;
        assert_eq!(histogram.total(), 700 * 420);
        Ok(())
    }

    #[test]
    fn histogram_counts() {
        let histogram =
            ColorHistogram::from_pixels([[9, 0, 0], [0, 0, 1], [9, 0, 0], [0, 0, 1], [9, 0, 0]]);

        assert_eq!(histogram.colors(), &[[0, 0, 1], [9, 0, 0]]);
        assert_eq!(histogram.counts(), &[2, 3]);
        assert_eq!(histogram.total(), 5);
    }
}
