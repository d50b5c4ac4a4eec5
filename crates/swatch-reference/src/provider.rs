use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

use swatch_color::ColorSpace;

use crate::builder::BuildReport;
use crate::error::ReferenceError;
use crate::named::{HierarchyEntry, HierarchyRow};

/// A source of hierarchy entries for a given color space.
///
/// Implementations may hold the entries in memory or fetch them from a
/// persistent store; the resolver only relies on the returned order being
/// stable between calls.
pub trait HierarchyProvider {
    /// Load every entry built for `space`, in canonical order.
    ///
    /// # Errors
    ///
    /// Implementations return [`ReferenceError::NoReferenceData`] when no
    /// hierarchy exists for the color space.
    fn load(&self, space: ColorSpace) -> Result<Cow<'_, [HierarchyEntry]>, ReferenceError>;
}

impl<P: HierarchyProvider + ?Sized> HierarchyProvider for &P {
    fn load(&self, space: ColorSpace) -> Result<Cow<'_, [HierarchyEntry]>, ReferenceError> {
        (**self).load(space)
    }
}

impl<P: HierarchyProvider + ?Sized> HierarchyProvider for Arc<P> {
    fn load(&self, space: ColorSpace) -> Result<Cow<'_, [HierarchyEntry]>, ReferenceError> {
        (**self).load(space)
    }
}

/// In-memory hierarchies, one per color space.
///
/// Read-only once constructed, so it can be shared across threads and
/// queried concurrently.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReferenceHierarchy {
    spaces: BTreeMap<ColorSpace, Vec<HierarchyEntry>>,
}

impl ReferenceHierarchy {
    /// Create an empty reference.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the entries of a build, replacing any hierarchy previously stored
    /// for the same color space.
    pub fn insert_report(&mut self, report: BuildReport) {
        self.spaces.insert(report.space, report.entries);
    }

    /// Build a reference from several build reports.
    pub fn from_reports(reports: impl IntoIterator<Item = BuildReport>) -> Self {
        let mut reference = Self::new();
        for report in reports {
            reference.insert_report(report);
        }
        reference
    }

    /// Build a reference from flat rows, keeping the row order within each
    /// color space.
    ///
    /// # Errors
    ///
    /// Fails if a row carries an invalid hex code.
    pub fn from_rows(rows: impl IntoIterator<Item = HierarchyRow>) -> Result<Self, ReferenceError> {
        let mut spaces: BTreeMap<ColorSpace, Vec<HierarchyEntry>> = BTreeMap::new();
        for row in rows {
            let entry = HierarchyEntry::try_from(row)?;
            spaces.entry(entry.space).or_default().push(entry);
        }
        Ok(Self { spaces })
    }

    /// Parse a JSON array of [`HierarchyRow`]s.
    pub fn from_json(json: &str) -> Result<Self, ReferenceError> {
        let rows: Vec<HierarchyRow> = serde_json::from_str(json)?;
        Self::from_rows(rows)
    }

    /// Serialize every stored entry as a JSON array of rows.
    pub fn to_json(&self) -> Result<String, ReferenceError> {
        let rows: Vec<HierarchyRow> = self
            .spaces
            .values()
            .flatten()
            .map(HierarchyRow::from)
            .collect();
        Ok(serde_json::to_string_pretty(&rows)?)
    }

    /// The entries of a color space, if any were stored.
    pub fn entries(&self, space: ColorSpace) -> Option<&[HierarchyEntry]> {
        self.spaces.get(&space).map(Vec::as_slice)
    }

    /// The color spaces with a non-empty hierarchy.
    pub fn spaces(&self) -> impl Iterator<Item = ColorSpace> + '_ {
        self.spaces
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(space, _)| *space)
    }

    /// Total number of entries across every color space.
    pub fn len(&self) -> usize {
        self.spaces.values().map(Vec::len).sum()
    }

    /// Whether no entry is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HierarchyProvider for ReferenceHierarchy {
    fn load(&self, space: ColorSpace) -> Result<Cow<'_, [HierarchyEntry]>, ReferenceError> {
        match self.spaces.get(&space) {
            Some(entries) if !entries.is_empty() => Ok(Cow::Borrowed(entries.as_slice())),
            _ => Err(ReferenceError::NoReferenceData(space)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_hierarchy;
    use crate::named::{NamedColor, ParentColor};

    fn report(space: ColorSpace) -> Result<BuildReport, ReferenceError> {
        let leaves = vec![
            NamedColor::from_hex("maroon", "800000")?,
            NamedColor::from_hex("navy", "000080")?,
        ];
        let parents = vec![
            ParentColor::from_hex("red", "FF0000")?,
            ParentColor::from_hex("blue", "0000FF")?,
        ];
        build_hierarchy(&leaves, &parents, space)
    }

    #[test]
    fn load_missing_space() -> Result<(), ReferenceError> {
        let reference = ReferenceHierarchy::from_reports([report(ColorSpace::Rgb)?]);

        assert_eq!(reference.load(ColorSpace::Rgb)?.len(), 2);
        assert!(matches!(
            reference.load(ColorSpace::Lab),
            Err(ReferenceError::NoReferenceData(ColorSpace::Lab))
        ));
        assert_eq!(reference.spaces().collect::<Vec<_>>(), vec![ColorSpace::Rgb]);
        Ok(())
    }

    #[test]
    fn empty_report_is_no_data() -> Result<(), ReferenceError> {
        let parents = vec![ParentColor::from_hex("red", "FF0000")?];
        let empty = build_hierarchy(&[], &parents, ColorSpace::Cmyk)?;
        let reference = ReferenceHierarchy::from_reports([empty]);

        assert!(reference.is_empty());
        assert!(matches!(
            reference.load(ColorSpace::Cmyk),
            Err(ReferenceError::NoReferenceData(ColorSpace::Cmyk))
        ));
        Ok(())
    }

    #[test]
    fn json_roundtrip_keeps_order() -> Result<(), ReferenceError> {
        let reference =
            ReferenceHierarchy::from_reports([report(ColorSpace::Lab)?, report(ColorSpace::Rgb)?]);
        let back = ReferenceHierarchy::from_json(&reference.to_json()?)?;

        assert_eq!(back.len(), 4);
        for space in [ColorSpace::Rgb, ColorSpace::Lab] {
            let names = |r: &ReferenceHierarchy| -> Vec<String> {
                r.entries(space)
                    .unwrap_or_default()
                    .iter()
                    .map(|e| e.color.name.clone())
                    .collect()
            };
            assert_eq!(names(&back), names(&reference));
        }
        Ok(())
    }

    #[test]
    fn provider_through_arc() -> Result<(), ReferenceError> {
        let reference = Arc::new(ReferenceHierarchy::from_reports([report(ColorSpace::Rgb)?]));
        let shared = Arc::clone(&reference);
        assert_eq!(shared.load(ColorSpace::Rgb)?.len(), 2);
        Ok(())
    }
}
