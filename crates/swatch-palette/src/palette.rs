use std::sync::atomic::AtomicBool;

use serde::{Deserialize, Serialize};
use swatch_color::{ColorError, ColorSpace, Rgb};
use swatch_reference::{HierarchyProvider, Resolver};

use crate::config::PaletteConfig;
use crate::error::PaletteError;
use crate::kmeans::kmeans;
use crate::preprocess::{ColorHistogram, PixelSource};

/// A dominant color of an image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "PaletteRecord", try_from = "PaletteRecord")]
pub struct PaletteEntry {
    /// The cluster center, rounded to the nearest channel values.
    pub color: Rgb,
    /// Fraction of the usable pixels assigned to this color, in [0, 1].
    pub weight: f64,
    /// Name of the closest reference color.
    pub closest_palette_color: Option<String>,
    /// Parent name of the closest reference color.
    pub closest_palette_color_parent: Option<String>,
}

impl PaletteEntry {
    /// Create an unnamed entry.
    pub fn new(color: Rgb, weight: f64) -> Self {
        Self {
            color,
            weight,
            closest_palette_color: None,
            closest_palette_color_parent: None,
        }
    }

    /// The weight as a percentage in [0, 100].
    pub fn percent(&self) -> f64 {
        self.weight * 100.0
    }
}

#[derive(Serialize, Deserialize)]
struct PaletteRecord {
    r: u8,
    g: u8,
    b: u8,
    html_code: String,
    percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    closest_palette_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    closest_palette_color_parent: Option<String>,
}

impl From<PaletteEntry> for PaletteRecord {
    fn from(entry: PaletteEntry) -> Self {
        let percent = entry.percent();
        PaletteRecord {
            r: entry.color.r,
            g: entry.color.g,
            b: entry.color.b,
            html_code: entry.color.to_hex(),
            percent,
            closest_palette_color: entry.closest_palette_color,
            closest_palette_color_parent: entry.closest_palette_color_parent,
        }
    }
}

impl TryFrom<PaletteRecord> for PaletteEntry {
    type Error = ColorError;

    fn try_from(record: PaletteRecord) -> Result<Self, Self::Error> {
        let color = Rgb::new(record.r, record.g, record.b);
        if Rgb::from_hex(&record.html_code)? != color {
            return Err(ColorError::InvalidFormat(format!(
                "html code {} does not match ({}, {}, {})",
                record.html_code, record.r, record.g, record.b
            )));
        }

        Ok(PaletteEntry {
            color,
            weight: record.percent / 100.0,
            closest_palette_color: record.closest_palette_color,
            closest_palette_color_parent: record.closest_palette_color_parent,
        })
    }
}

/// Extract the dominant colors of an image.
///
/// # Arguments
///
/// * `source` - The image, opaque or with a transparency channel.
/// * `config` - The extraction parameters.
///
/// # Returns
///
/// `config.num_colors` entries sorted by descending weight. The weights sum
/// to one.
///
/// # Errors
///
/// Returns [`PaletteError::DegenerateInput`] when no pixel survives the
/// alpha filter or when the image holds fewer distinct colors than
/// requested, and [`PaletteError::InvalidConfig`] for invalid parameters.
///
/// # Example
///
/// ```
/// use swatch_image::{Image, ImageSize};
/// use swatch_palette::{extract_palette, PaletteConfig};
///
/// let mut data = Vec::new();
/// for _ in 0..3 {
///     data.extend_from_slice(&[255, 0, 0]);
/// }
/// data.extend_from_slice(&[0, 0, 255]);
///
/// let image = Image::<u8, 3>::new(ImageSize { width: 2, height: 2 }, data).unwrap();
///
/// let config = PaletteConfig {
///     num_colors: 2,
///     ..Default::default()
/// };
/// let palette = extract_palette(&image, &config).unwrap();
///
/// assert_eq!(palette[0].color.to_hex(), "ff0000");
/// assert_eq!(palette[0].percent(), 75.0);
/// ```
pub fn extract_palette<'a>(
    source: impl Into<PixelSource<'a>>,
    config: &PaletteConfig,
) -> Result<Vec<PaletteEntry>, PaletteError> {
    extract_palette_with_cancel(source, config, &AtomicBool::new(false))
}

/// Extract the dominant colors of an image, giving up once `cancel` is set.
///
/// The flag is checked between clustering restarts, in which case
/// [`PaletteError::Cancelled`] is returned.
pub fn extract_palette_with_cancel<'a>(
    source: impl Into<PixelSource<'a>>,
    config: &PaletteConfig,
    cancel: &AtomicBool,
) -> Result<Vec<PaletteEntry>, PaletteError> {
    config.validate()?;

    let histogram = ColorHistogram::from_source(source.into(), config)?;

    if histogram.is_empty() {
        return Err(PaletteError::DegenerateInput(
            "the image has no usable pixels".to_string(),
        ));
    }

    if config.num_colors > histogram.num_distinct() {
        return Err(PaletteError::DegenerateInput(format!(
            "requested {} colors but the image holds {} distinct colors",
            config.num_colors,
            histogram.num_distinct()
        )));
    }

    let points: Vec<[f64; 3]> = histogram
        .colors()
        .iter()
        .map(|c| [c[0] as f64, c[1] as f64, c[2] as f64])
        .collect();
    let weights: Vec<f64> = histogram.counts().iter().map(|&n| n as f64).collect();

    let clustering = kmeans(&points, &weights, config.num_colors, &config.kmeans, cancel)?;

    let total = histogram.total() as f64;
    let mut entries: Vec<PaletteEntry> = clustering
        .centroids
        .iter()
        .zip(clustering.cluster_weights.iter())
        .map(|(centroid, mass)| PaletteEntry::new(Rgb::from_f64_rounded(*centroid), mass / total))
        .collect();

    entries.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    log::debug!(
        "extracted {} colors from {} pixels, inertia {:.4}",
        entries.len(),
        histogram.total(),
        clustering.inertia
    );

    Ok(entries)
}

/// Attach the closest reference color and its parent to each entry.
///
/// # Arguments
///
/// * `entries` - The palette to name.
/// * `resolver` - The resolver holding the reference hierarchy.
/// * `space` - The color space to compare colors in.
pub fn name_palette<P: HierarchyProvider>(
    entries: &mut [PaletteEntry],
    resolver: &Resolver<P>,
    space: ColorSpace,
) -> Result<(), PaletteError> {
    for entry in entries.iter_mut() {
        let resolution = resolver.resolve(&entry.color, space)?;
        entry.closest_palette_color = Some(resolution.color_name);
        entry.closest_palette_color_parent = Some(resolution.parent_color_name);
    }
    Ok(())
}
