use serde::{Deserialize, Serialize};
use swatch_color::{ColorSpace, Rgb};

use crate::error::ReferenceError;

/// A color paired with a display name and an optional catalog code.
///
/// Serializes as `{"hex": "...", "name": "...", "pantone": "..."}`, which is
/// also the format of seed files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedColor {
    /// Display name.
    pub name: String,
    /// The color itself.
    #[serde(rename = "hex")]
    pub color: Rgb,
    /// External catalog identifier, e.g. a Pantone code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pantone: Option<String>,
}

impl NamedColor {
    /// Create a named color without a catalog code.
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self {
            name: name.into(),
            color,
            pantone: None,
        }
    }

    /// Create a named color from a hex literal.
    ///
    /// # Errors
    ///
    /// Fails with an invalid format error if `hex` is not 6 hex digits.
    pub fn from_hex(name: impl Into<String>, hex: &str) -> Result<Self, ReferenceError> {
        Ok(Self::new(name, Rgb::from_hex(hex)?))
    }

    /// Attach a catalog code.
    pub fn with_pantone(mut self, pantone: impl Into<String>) -> Self {
        self.pantone = Some(pantone.into());
        self
    }
}

/// A named color acting as the root of a group of leaf colors.
///
/// The `id` is the foreign key stored by hierarchy entries; it defaults to
/// the name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParentColor {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The color itself.
    #[serde(rename = "hex")]
    pub color: Rgb,
}

impl ParentColor {
    /// Create a parent whose identifier is its name.
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            color,
        }
    }

    /// Create a parent from a hex literal.
    pub fn from_hex(name: impl Into<String>, hex: &str) -> Result<Self, ReferenceError> {
        Ok(Self::new(name, Rgb::from_hex(hex)?))
    }

    /// Override the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

impl From<NamedColor> for ParentColor {
    fn from(named: NamedColor) -> Self {
        ParentColor::new(named.name, named.color)
    }
}

/// A leaf color bound to its nearest parent in one color space.
#[derive(Clone, Debug, PartialEq)]
pub struct HierarchyEntry {
    /// The leaf color.
    pub color: NamedColor,
    /// The parent the leaf was bound to.
    pub parent: ParentColor,
    /// Distance between leaf and parent in `space`.
    pub distance: f64,
    /// Color space the binding was computed in.
    pub space: ColorSpace,
}

/// Flat, storage-agnostic form of a [`HierarchyEntry`].
///
/// The vectors are informational: they are recomputed from `hex` whenever
/// a row is loaded back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HierarchyRow {
    /// Leaf name.
    pub color_name: String,
    /// Leaf hex code.
    pub hex: String,
    /// Leaf in RGB.
    pub rgb_vector: [u8; 3],
    /// Leaf in CIE-Lab.
    pub lab_vector: [f64; 3],
    /// Leaf in CMYK.
    pub cmyk_vector: [f64; 4],
    /// Parent identifier; defaults to the parent name when absent.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent_color_id: String,
    /// Parent name.
    pub parent_color_name: String,
    /// Parent hex code.
    pub parent_color_hex: String,
    /// Distance between leaf and parent in `color_space`.
    pub parent_color_distance: f64,
    /// Color space the row was built in.
    pub color_space: ColorSpace,
    /// External catalog identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pantone: Option<String>,
}

impl From<&HierarchyEntry> for HierarchyRow {
    fn from(entry: &HierarchyEntry) -> Self {
        let color = entry.color.color;
        HierarchyRow {
            color_name: entry.color.name.clone(),
            hex: color.to_hex(),
            rgb_vector: color.channels(),
            lab_vector: color.to_lab().to_array(),
            cmyk_vector: color.to_cmyk().to_array(),
            parent_color_id: entry.parent.id.clone(),
            parent_color_name: entry.parent.name.clone(),
            parent_color_hex: entry.parent.color.to_hex(),
            parent_color_distance: entry.distance,
            color_space: entry.space,
            pantone: entry.color.pantone.clone(),
        }
    }
}

impl TryFrom<HierarchyRow> for HierarchyEntry {
    type Error = ReferenceError;

    fn try_from(row: HierarchyRow) -> Result<Self, Self::Error> {
        let color = Rgb::from_hex(&row.hex)?;
        let parent_color = Rgb::from_hex(&row.parent_color_hex)?;
        let parent_id = if row.parent_color_id.is_empty() {
            row.parent_color_name.clone()
        } else {
            row.parent_color_id
        };

        Ok(HierarchyEntry {
            color: NamedColor {
                name: row.color_name,
                color,
                pantone: row.pantone,
            },
            parent: ParentColor {
                id: parent_id,
                name: row.parent_color_name,
                color: parent_color,
            },
            distance: row.parent_color_distance,
            space: row.color_space,
        })
    }
}
