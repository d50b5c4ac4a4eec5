use serde::{Deserialize, Serialize};

use crate::error::PaletteError;

/// Structure to define the k-means parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeansConfig {
    /// Maximum number of Lloyd iterations per restart.
    pub max_iterations: usize,
    /// Convergence tolerance as the largest centroid shift between two
    /// consecutive iterations, in RGB units.
    pub tolerance: f64,
    /// Number of independent restarts; the lowest inertia run is kept.
    pub restarts: usize,
    /// Seed of the random generators. A random seed is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            max_iterations: 300,
            tolerance: 1e-4,
            restarts: 10,
            seed: None,
        }
    }
}

impl KMeansConfig {
    /// Check the parameters.
    pub fn validate(&self) -> Result<(), PaletteError> {
        if self.restarts < 2 {
            return Err(PaletteError::InvalidConfig(format!(
                "restarts must be at least 2, got {}",
                self.restarts
            )));
        }
        if self.max_iterations == 0 {
            return Err(PaletteError::InvalidConfig(
                "max_iterations must be positive".to_string(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(PaletteError::InvalidConfig(format!(
                "tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Structure to define the palette extraction parameters.
///
/// Deserializes from a partial JSON object, missing fields take their
/// default values.
///
/// # Example
///
/// ```
/// use swatch_palette::PaletteConfig;
///
/// let config = PaletteConfig {
///     num_colors: 5,
///     ..Default::default()
/// };
///
/// assert_eq!(config.alpha_threshold, 30);
/// assert_eq!(config.kmeans.restarts, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Number of palette colors.
    pub num_colors: usize,
    /// Pixels with an alpha value at or below this threshold are dropped.
    pub alpha_threshold: u8,
    /// Opaque images larger than this on either side are downscaled to fit.
    pub max_dimension: usize,
    /// Clustering parameters.
    pub kmeans: KMeansConfig,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            num_colors: 10,
            alpha_threshold: 30,
            max_dimension: 700,
            kmeans: KMeansConfig::default(),
        }
    }
}

impl PaletteConfig {
    /// Check the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidConfig`] if the number of colors or
    /// the maximum dimension is zero, or if the k-means parameters are
    /// invalid.
    pub fn validate(&self) -> Result<(), PaletteError> {
        if self.num_colors == 0 {
            return Err(PaletteError::InvalidConfig(
                "num_colors must be positive".to_string(),
            ));
        }
        if self.max_dimension == 0 {
            return Err(PaletteError::InvalidConfig(
                "max_dimension must be positive".to_string(),
            ));
        }
        self.kmeans.validate()
    }
}
