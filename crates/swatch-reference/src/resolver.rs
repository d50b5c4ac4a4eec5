use serde::{Deserialize, Serialize};
use swatch_color::{ColorError, ColorSpace, ColorVector, Rgb};

use crate::error::ReferenceError;
use crate::named::HierarchyEntry;
use crate::provider::HierarchyProvider;
use crate::query::ColorQuery;

/// Find the candidate closest to `target`.
///
/// Returns the index and distance of the first candidate reaching the
/// minimum distance, or `None` when there are no candidates. The comparison
/// is strict, so equidistant candidates never replace an earlier one.
pub(crate) fn nearest_index<'a>(
    target: &ColorVector,
    candidates: impl IntoIterator<Item = &'a ColorVector>,
) -> Result<Option<(usize, f64)>, ColorError> {
    let mut best: Option<(usize, f64)> = None;
    for (i, candidate) in candidates.into_iter().enumerate() {
        let dist = target.distance(candidate)?;
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((i, dist)),
        }
    }
    Ok(best)
}

/// The nearest reference entry for a requested color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Name of the nearest leaf color.
    pub color_name: String,
    /// Hex code of the nearest leaf color.
    pub hex: String,
    /// Name of the leaf's parent.
    pub parent_color_name: String,
    /// Hex code of the leaf's parent.
    pub parent_color_hex: String,
    /// Distance between the requested color and the leaf.
    pub distance: f64,
    /// Catalog code of the leaf, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pantone: Option<String>,
}

impl Resolution {
    fn new(entry: &HierarchyEntry, distance: f64) -> Self {
        Resolution {
            color_name: entry.color.name.clone(),
            hex: entry.color.color.to_hex(),
            parent_color_name: entry.parent.name.clone(),
            parent_color_hex: entry.parent.color.to_hex(),
            distance,
            pantone: entry.color.pantone.clone(),
        }
    }
}

/// Resolves arbitrary colors to the nearest entry of a reference hierarchy.
///
/// The lookup is a linear scan over the entries of the requested color
/// space. Equidistant entries resolve to the one appearing first in the
/// provider's order, so repeated calls with the same input return the same
/// result.
///
/// # Example
///
/// ```
/// use swatch_color::{ColorSpace, Rgb};
/// use swatch_reference::{build_hierarchy, NamedColor, ParentColor, ReferenceHierarchy, Resolver};
///
/// let leaves = vec![
///     NamedColor::from_hex("black", "000000").unwrap(),
///     NamedColor::from_hex("maroon", "800000").unwrap(),
/// ];
/// let parents = vec![
///     ParentColor::from_hex("black", "000000").unwrap(),
///     ParentColor::from_hex("red", "FF0000").unwrap(),
/// ];
/// let report = build_hierarchy(&leaves, &parents, ColorSpace::Rgb).unwrap();
/// let resolver = Resolver::new(ReferenceHierarchy::from_reports([report]));
///
/// let res = resolver.resolve(&Rgb::new(0, 0, 0), ColorSpace::Rgb).unwrap();
///
/// assert_eq!(res.color_name, "black");
/// assert_eq!(res.parent_color_name, "black");
/// assert_eq!(res.distance, 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct Resolver<P> {
    provider: P,
}

impl<P: HierarchyProvider> Resolver<P> {
    /// Create a resolver over a hierarchy provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Find the entry nearest to `color` in `space`, with its distance.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::NoReferenceData`] when the provider holds
    /// no entry for `space`.
    pub fn nearest_entry(
        &self,
        color: &Rgb,
        space: ColorSpace,
    ) -> Result<(HierarchyEntry, f64), ReferenceError> {
        let entries = self.provider.load(space)?;

        let target = color.to_space(space);
        let vectors: Vec<ColorVector> = entries
            .iter()
            .map(|entry| entry.color.color.to_space(space))
            .collect();

        match nearest_index(&target, vectors.iter())? {
            Some((i, distance)) => Ok((entries[i].clone(), distance)),
            None => Err(ReferenceError::NoReferenceData(space)),
        }
    }

    /// Resolve a color to its nearest leaf color and that leaf's parent.
    pub fn resolve(&self, color: &Rgb, space: ColorSpace) -> Result<Resolution, ReferenceError> {
        let (entry, distance) = self.nearest_entry(color, space)?;

        log::debug!(
            "resolved {} in {} to {} (parent {}, distance {:.4})",
            color,
            space,
            entry.color.name,
            entry.parent.name,
            distance
        );

        Ok(Resolution::new(&entry, distance))
    }

    /// Resolve a color given as 6 hex digits.
    ///
    /// # Errors
    ///
    /// Fails with an invalid format error if `hex` is malformed.
    pub fn resolve_hex(&self, hex: &str, space: ColorSpace) -> Result<Resolution, ReferenceError> {
        let color = Rgb::from_hex(hex)?;
        self.resolve(&color, space)
    }

    /// Resolve a parsed request.
    pub fn resolve_query(
        &self,
        query: &ColorQuery,
        space: ColorSpace,
    ) -> Result<Resolution, ReferenceError> {
        self.resolve(&query.to_rgb()?, space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_hierarchy;
    use crate::named::{NamedColor, ParentColor};
    use crate::provider::ReferenceHierarchy;
    use rayon::prelude::*;
    use std::borrow::Cow;
    use std::cell::Cell;

    fn reference(spaces: &[ColorSpace]) -> Result<ReferenceHierarchy, ReferenceError> {
        let leaves = vec![
            NamedColor::from_hex("black", "000000")?,
            NamedColor::from_hex("maroon", "800000")?,
            NamedColor::from_hex("dodgerblue", "1E90FF")?.with_pantone("2925 C"),
            NamedColor::from_hex("ivory", "FFFFF0")?,
        ];
        let parents = vec![
            ParentColor::from_hex("black", "000000")?,
            ParentColor::from_hex("white", "FFFFFF")?,
            ParentColor::from_hex("red", "FF0000")?,
            ParentColor::from_hex("blue", "0000FF")?,
        ];

        let mut reports = Vec::new();
        for space in spaces {
            reports.push(build_hierarchy(&leaves, &parents, *space)?);
        }
        Ok(ReferenceHierarchy::from_reports(reports))
    }

    #[test]
    fn resolve_black() -> Result<(), ReferenceError> {
        let resolver = Resolver::new(reference(&ColorSpace::ALL)?);
        for space in ColorSpace::ALL {
            let res = resolver.resolve(&Rgb::new(0, 0, 0), space)?;
            assert_eq!(res.color_name, "black");
            assert_eq!(res.hex, "000000");
            assert_eq!(res.parent_color_name, "black");
            assert_eq!(res.parent_color_hex, "000000");
            assert_eq!(res.distance, 0.0);
        }
        Ok(())
    }

    #[test]
    fn resolve_carries_pantone() -> Result<(), ReferenceError> {
        let resolver = Resolver::new(reference(&[ColorSpace::Rgb])?);
        let res = resolver.resolve_hex("1C8CF0", ColorSpace::Rgb)?;
        assert_eq!(res.color_name, "dodgerblue");
        assert_eq!(res.parent_color_name, "blue");
        assert_eq!(res.hex, "1e90ff");
        assert_eq!(res.parent_color_hex, "0000ff");
        assert_eq!(res.pantone.as_deref(), Some("2925 C"));
        assert!(res.distance > 0.0);
        Ok(())
    }

    #[test]
    fn resolve_invalid_hex() -> Result<(), ReferenceError> {
        let resolver = Resolver::new(reference(&[ColorSpace::Rgb])?);
        let res = resolver.resolve_hex("zzzzzz", ColorSpace::Rgb);
        assert!(matches!(
            res,
            Err(ReferenceError::Color(ColorError::InvalidFormat(_)))
        ));
        Ok(())
    }

    #[test]
    fn resolve_without_data() -> Result<(), ReferenceError> {
        let resolver = Resolver::new(reference(&[ColorSpace::Rgb])?);
        let res = resolver.resolve(&Rgb::new(1, 2, 3), ColorSpace::Cmyk);
        assert!(matches!(
            res,
            Err(ReferenceError::NoReferenceData(ColorSpace::Cmyk))
        ));

        let empty = Resolver::new(ReferenceHierarchy::new());
        assert!(matches!(
            empty.resolve(&Rgb::new(1, 2, 3), ColorSpace::Rgb),
            Err(ReferenceError::NoReferenceData(ColorSpace::Rgb))
        ));
        Ok(())
    }

    #[test]
    fn resolve_ties_first_wins() -> Result<(), ReferenceError> {
        let parents = vec![ParentColor::from_hex("gray", "808080")?];
        let leaves = vec![
            NamedColor::from_hex("gray", "808080")?,
            NamedColor::from_hex("grey", "808080")?,
            NamedColor::from_hex("below", "000000")?,
            NamedColor::from_hex("above", "000002")?,
        ];
        let report = build_hierarchy(&leaves, &parents, ColorSpace::Rgb)?;
        let resolver = Resolver::new(ReferenceHierarchy::from_reports([report]));

        for _ in 0..5 {
            let res = resolver.resolve_hex("808080", ColorSpace::Rgb)?;
            assert_eq!(res.color_name, "gray");

            let res = resolver.resolve_hex("000001", ColorSpace::Rgb)?;
            assert_eq!(res.color_name, "below");
            assert_eq!(res.distance, 1.0);
        }
        Ok(())
    }

    #[test]
    fn resolve_is_idempotent_across_threads() -> Result<(), ReferenceError> {
        let resolver = Resolver::new(reference(&ColorSpace::ALL)?);
        let colors: Vec<Rgb> = (0..=255u8)
            .step_by(5)
            .map(|v| Rgb::new(v, 255 - v, v / 2))
            .collect();

        let sequential: Vec<Resolution> = colors
            .iter()
            .map(|c| resolver.resolve(c, ColorSpace::Lab))
            .collect::<Result<_, _>>()?;
        let parallel: Vec<Resolution> = colors
            .par_iter()
            .map(|c| resolver.resolve(c, ColorSpace::Lab))
            .collect::<Result<_, _>>()?;

        assert_eq!(sequential, parallel);
        Ok(())
    }

    #[test]
    fn resolution_json() -> Result<(), ReferenceError> {
        let resolver = Resolver::new(reference(&[ColorSpace::Rgb])?);
        let res = resolver.resolve(&Rgb::new(0, 0, 0), ColorSpace::Rgb)?;
        let json: serde_json::Value = serde_json::to_value(&res)?;

        assert_eq!(json["color_name"], "black");
        assert_eq!(json["parent_color_hex"], "000000");
        assert_eq!(json["distance"], 0.0);
        assert!(json.get("pantone").is_none());
        Ok(())
    }

    /// A provider that counts loads, standing in for a database.
    struct CountingProvider {
        inner: ReferenceHierarchy,
        loads: Cell<usize>,
    }

    impl HierarchyProvider for CountingProvider {
        fn load(&self, space: ColorSpace) -> Result<Cow<'_, [HierarchyEntry]>, ReferenceError> {
            self.loads.set(self.loads.get() + 1);
            let entries = self.inner.load(space)?;
            Ok(Cow::Owned(entries.into_owned()))
        }
    }

    #[test]
    fn resolve_through_custom_provider() -> Result<(), ReferenceError> {
        let provider = CountingProvider {
            inner: reference(&[ColorSpace::Cmyk])?,
            loads: Cell::new(0),
        };
        let resolver = Resolver::new(&provider);

        let res = resolver.resolve(&Rgb::new(130, 2, 2), ColorSpace::Cmyk)?;
        assert_eq!(res.parent_color_name, "red");
        resolver.resolve(&Rgb::new(130, 2, 2), ColorSpace::Cmyk)?;

        assert_eq!(provider.loads.get(), 2);
        Ok(())
    }
}
