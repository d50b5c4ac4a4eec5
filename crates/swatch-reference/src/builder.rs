use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use swatch_color::{ColorSpace, ColorVector};

use crate::error::ReferenceError;
use crate::named::{HierarchyEntry, HierarchyRow, NamedColor, ParentColor};
use crate::resolver::nearest_index;

/// Result of a hierarchy build.
///
/// Leaves that could not be bound to a known parent are not fatal: they are
/// reported in `skipped` and left out of `entries`.
#[derive(Debug)]
pub struct BuildReport {
    /// Color space the hierarchy was built in.
    pub space: ColorSpace,
    /// One entry per bound leaf, in leaf input order.
    pub entries: Vec<HierarchyEntry>,
    /// One [`ReferenceError::UnresolvedEntry`] per skipped leaf.
    pub skipped: Vec<ReferenceError>,
}

impl BuildReport {
    fn new(space: ColorSpace) -> Self {
        Self {
            space,
            entries: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Flatten the entries into storage rows.
    pub fn rows(&self) -> Vec<HierarchyRow> {
        self.entries.iter().map(HierarchyRow::from).collect()
    }

    /// Whether every leaf was bound to a parent.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    fn skip(&mut self, leaf: &NamedColor, parent: &str) {
        log::warn!(
            "skipping leaf color '{}' ({}): parent '{}' is unknown",
            leaf.name,
            leaf.color,
            parent
        );
        self.skipped.push(ReferenceError::UnresolvedEntry {
            leaf: leaf.name.clone(),
            parent: parent.to_string(),
        });
    }

    fn bind(&mut self, leaf: &NamedColor, parent: &ParentColor, distance: f64) {
        log::debug!(
            "{} {} -> {} ({:.4})",
            self.space,
            leaf.name,
            parent.name,
            distance
        );
        self.entries.push(HierarchyEntry {
            color: leaf.clone(),
            parent: parent.clone(),
            distance,
            space: self.space,
        });
    }
}

/// Index from parent identifier to its position in the parent list.
///
/// The first parent carrying an identifier owns it; blank identifiers are
/// never indexed.
struct ParentIndex<'a> {
    by_id: HashMap<&'a str, usize>,
}

impl<'a> ParentIndex<'a> {
    fn new(parents: &'a [ParentColor]) -> Self {
        let mut by_id = HashMap::with_capacity(parents.len());
        for (i, parent) in parents.iter().enumerate() {
            if parent.id.trim().is_empty() {
                log::warn!("parent color '{}' has a blank identifier", parent.name);
                continue;
            }
            by_id.entry(parent.id.as_str()).or_insert(i);
        }
        Self { by_id }
    }

    fn get(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }
}

fn check_parents(parents: &[ParentColor]) -> Result<(), ReferenceError> {
    if parents.is_empty() {
        return Err(ReferenceError::Configuration(
            "at least one parent color is required to build a hierarchy".to_string(),
        ));
    }
    Ok(())
}

/// Bind every leaf color to its nearest parent color in `space`.
///
/// For each leaf the distance to every parent is computed in `space` and the
/// parent with the minimum distance wins. Ties go to the parent appearing
/// first in `parents`.
///
/// The winner is then looked up by identifier; a leaf whose winning parent
/// cannot be found under its own identifier (blank or duplicated ids) is
/// skipped with a warning rather than failing the whole build.
///
/// # Arguments
///
/// * `leaves` - The leaf colors, in canonical order.
/// * `parents` - The parent colors, in canonical order.
/// * `space` - The color space to measure distances in.
///
/// # Errors
///
/// Returns [`ReferenceError::Configuration`] if `parents` is empty.
///
/// # Example
///
/// ```
/// use swatch_color::ColorSpace;
/// use swatch_reference::{build_hierarchy, NamedColor, ParentColor};
///
/// let leaves = vec![NamedColor::from_hex("maroon", "800000").unwrap()];
/// let parents = vec![
///     ParentColor::from_hex("red", "FF0000").unwrap(),
///     ParentColor::from_hex("black", "000000").unwrap(),
/// ];
///
/// let report = build_hierarchy(&leaves, &parents, ColorSpace::Lab).unwrap();
///
/// assert_eq!(report.entries.len(), 1);
/// assert_eq!(report.entries[0].parent.name, "red");
/// ```
pub fn build_hierarchy(
    leaves: &[NamedColor],
    parents: &[ParentColor],
    space: ColorSpace,
) -> Result<BuildReport, ReferenceError> {
    check_parents(parents)?;

    let index = ParentIndex::new(parents);
    let parent_vectors: Vec<ColorVector> =
        parents.iter().map(|p| p.color.to_space(space)).collect();

    let mut report = BuildReport::new(space);

    for leaf in leaves {
        let target = leaf.color.to_space(space);
        let Some((best, distance)) = nearest_index(&target, parent_vectors.iter())? else {
            continue;
        };

        let winner = &parents[best];
        match index.get(&winner.id) {
            Some(i) if i == best => report.bind(leaf, winner, distance),
            _ => report.skip(leaf, &winner.id),
        }
    }

    log::info!(
        "built {} hierarchy: {} entries, {} skipped, {} parents",
        space,
        report.entries.len(),
        report.skipped.len(),
        parents.len()
    );

    Ok(report)
}

/// Curated leaf-name to parent-identifier assignments.
///
/// Serializes as a JSON object from leaf name to parent identifier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParentMapping {
    parents: HashMap<String, String>,
}

impl ParentMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `leaf` to the parent identified by `parent_id`.
    pub fn insert(&mut self, leaf: impl Into<String>, parent_id: impl Into<String>) {
        self.parents.insert(leaf.into(), parent_id.into());
    }

    /// The parent identifier assigned to `leaf`.
    pub fn get(&self, leaf: &str) -> Option<&str> {
        self.parents.get(leaf).map(String::as_str)
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Whether the mapping holds no assignment.
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

impl<L: Into<String>, P: Into<String>> FromIterator<(L, P)> for ParentMapping {
    fn from_iter<I: IntoIterator<Item = (L, P)>>(iter: I) -> Self {
        let mut mapping = ParentMapping::new();
        for (leaf, parent) in iter {
            mapping.insert(leaf, parent);
        }
        mapping
    }
}

/// Bind every leaf color to the parent named by an explicit mapping.
///
/// The recorded distance is the distance between the leaf and its mapped
/// parent in `space`. Leaves missing from the mapping, or mapped to an
/// unknown parent identifier, are skipped with a warning.
///
/// # Errors
///
/// Returns [`ReferenceError::Configuration`] if `parents` is empty.
pub fn assign_hierarchy(
    leaves: &[NamedColor],
    parents: &[ParentColor],
    mapping: &ParentMapping,
    space: ColorSpace,
) -> Result<BuildReport, ReferenceError> {
    check_parents(parents)?;

    let index = ParentIndex::new(parents);
    let mut report = BuildReport::new(space);

    for leaf in leaves {
        let Some(parent_id) = mapping.get(&leaf.name) else {
            report.skip(leaf, "");
            continue;
        };

        match index.get(parent_id) {
            Some(i) => {
                let parent = &parents[i];
                let distance = leaf.color.distance_in(&parent.color, space);
                report.bind(leaf, parent, distance);
            }
            None => report.skip(leaf, parent_id),
        }
    }

    log::info!(
        "assigned {} hierarchy: {} entries, {} skipped",
        space,
        report.entries.len(),
        report.skipped.len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use swatch_color::Rgb;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn parents() -> Result<Vec<ParentColor>, ReferenceError> {
        Ok(vec![
            ParentColor::from_hex("black", "000000")?,
            ParentColor::from_hex("white", "FFFFFF")?,
            ParentColor::from_hex("red", "FF0000")?,
            ParentColor::from_hex("green", "008000")?,
            ParentColor::from_hex("blue", "0000FF")?,
        ])
    }

    fn leaves() -> Result<Vec<NamedColor>, ReferenceError> {
        Ok(vec![
            NamedColor::from_hex("maroon", "800000")?,
            NamedColor::from_hex("firebrick", "B22222")?,
            NamedColor::from_hex("navy", "000080")?,
            NamedColor::from_hex("snow", "FFFAFA")?,
            NamedColor::from_hex("forestgreen", "228B22")?,
            NamedColor::from_hex("dimgray", "696969")?,
        ])
    }

    #[test]
    fn build_empty_parents() -> Result<(), ReferenceError> {
        init_logger();
        let res = build_hierarchy(&leaves()?, &[], ColorSpace::Rgb);
        assert!(matches!(res, Err(ReferenceError::Configuration(_))));

        let res = assign_hierarchy(&leaves()?, &[], &ParentMapping::new(), ColorSpace::Rgb);
        assert!(matches!(res, Err(ReferenceError::Configuration(_))));
        Ok(())
    }

    #[test]
    fn build_distance_is_minimal() -> Result<(), ReferenceError> {
        init_logger();
        let parents = parents()?;
        for space in ColorSpace::ALL {
            let report = build_hierarchy(&leaves()?, &parents, space)?;
            assert!(report.is_complete());
            assert_eq!(report.entries.len(), 6);

            for entry in &report.entries {
                assert_eq!(entry.space, space);
                let expected = entry.color.color.distance_in(&entry.parent.color, space);
                assert_eq!(entry.distance, expected);
                for other in &parents {
                    assert!(entry.distance <= entry.color.color.distance_in(&other.color, space));
                }
            }
        }
        Ok(())
    }

    #[test]
    fn build_assigns_expected_parents() -> Result<(), ReferenceError> {
        let report = build_hierarchy(&leaves()?, &parents()?, ColorSpace::Lab)?;
        let pairs: Vec<(&str, &str)> = report
            .entries
            .iter()
            .map(|e| (e.color.name.as_str(), e.parent.name.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("maroon", "red"),
                ("firebrick", "red"),
                ("navy", "blue"),
                ("snow", "white"),
                ("forestgreen", "green"),
                ("dimgray", "black"),
            ]
        );
        Ok(())
    }

    #[test]
    fn build_tie_goes_to_first_parent() -> Result<(), ReferenceError> {
        // identical parents
        let parents = vec![
            ParentColor::from_hex("first", "102030")?,
            ParentColor::from_hex("second", "102030")?,
        ];
        let leaves = vec![NamedColor::from_hex("leaf", "112233")?];
        for _ in 0..10 {
            let report = build_hierarchy(&leaves, &parents, ColorSpace::Rgb)?;
            assert_eq!(report.entries[0].parent.name, "first");
        }

        // exact geometric tie between two distinct parents
        let parents = vec![
            ParentColor::from_hex("low", "000000")?,
            ParentColor::from_hex("high", "000002")?,
        ];
        let leaves = vec![NamedColor::new("mid", Rgb::new(0, 0, 1))];
        let report = build_hierarchy(&leaves, &parents, ColorSpace::Rgb)?;
        assert_eq!(report.entries[0].parent.name, "low");
        assert_eq!(report.entries[0].distance, 1.0);
        Ok(())
    }

    #[test]
    fn build_skips_shadowed_parent_ids() -> Result<(), ReferenceError> {
        init_logger();
        // "red" is registered twice; the second one can win but its id
        // resolves to the first one
        let parents = vec![
            ParentColor::from_hex("red", "FF0000")?,
            ParentColor::from_hex("dark red", "800000")?.with_id("red"),
            ParentColor::from_hex("blue", "0000FF")?.with_id(" "),
        ];
        let leaves = vec![
            NamedColor::from_hex("crimson", "DC143C")?,
            NamedColor::from_hex("maroon", "800000")?,
            NamedColor::from_hex("navy", "000080")?,
        ];

        let report = build_hierarchy(&leaves, &parents, ColorSpace::Rgb)?;
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].color.name, "crimson");
        assert_eq!(report.skipped.len(), 2);
        assert!(matches!(
            &report.skipped[0],
            ReferenceError::UnresolvedEntry { leaf, parent } if leaf == "maroon" && parent == "red"
        ));
        assert!(matches!(
            &report.skipped[1],
            ReferenceError::UnresolvedEntry { leaf, .. } if leaf == "navy"
        ));
        Ok(())
    }

    #[test]
    fn assign_from_mapping() -> Result<(), ReferenceError> {
        init_logger();
        let mapping: ParentMapping = [
            ("maroon", "red"),
            ("firebrick", "red"),
            ("navy", "blue"),
            ("snow", "white"),
            ("forestgreen", "teal"),
        ]
        .into_iter()
        .collect();

        let report = assign_hierarchy(&leaves()?, &parents()?, &mapping, ColorSpace::Rgb)?;
        assert_eq!(report.entries.len(), 4);
        assert_eq!(report.skipped.len(), 2);

        let maroon = &report.entries[0];
        assert_eq!(maroon.parent.name, "red");
        assert_eq!(maroon.distance, 127.0);

        assert!(matches!(
            &report.skipped[0],
            ReferenceError::UnresolvedEntry { leaf, parent } if leaf == "forestgreen" && parent == "teal"
        ));
        assert!(matches!(
            &report.skipped[1],
            ReferenceError::UnresolvedEntry { leaf, parent } if leaf == "dimgray" && parent.is_empty()
        ));
        Ok(())
    }

    #[test]
    fn rows_follow_entries() -> Result<(), ReferenceError> {
        let report = build_hierarchy(&leaves()?, &parents()?, ColorSpace::Cmyk)?;
        let rows = report.rows();
        assert_eq!(rows.len(), report.entries.len());
        for (row, entry) in rows.iter().zip(report.entries.iter()) {
            assert_eq!(row.color_name, entry.color.name);
            assert_eq!(row.parent_color_name, entry.parent.name);
            assert_eq!(row.color_space, ColorSpace::Cmyk);
        }
        Ok(())
    }
}
