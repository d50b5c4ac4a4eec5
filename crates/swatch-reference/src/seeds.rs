use serde::Deserialize;
use std::collections::BTreeMap;
use swatch_color::{ColorSpace, Rgb};

use crate::builder::{build_hierarchy, BuildReport, ParentMapping};
use crate::error::ReferenceError;
use crate::named::{NamedColor, ParentColor};
use crate::provider::ReferenceHierarchy;

/// The CSS3 extended color keywords, as (hex, name) pairs sorted by name.
const CSS3_COLORS: [(&str, &str); 147] = [
    ("F0F8FF", "aliceblue"),
    ("FAEBD7", "antiquewhite"),
    ("00FFFF", "aqua"),
    ("7FFFD4", "aquamarine"),
    ("F0FFFF", "azure"),
    ("F5F5DC", "beige"),
    ("FFE4C4", "bisque"),
    ("000000", "black"),
    ("FFEBCD", "blanchedalmond"),
    ("0000FF", "blue"),
    ("8A2BE2", "blueviolet"),
    ("A52A2A", "brown"),
    ("DEB887", "burlywood"),
    ("5F9EA0", "cadetblue"),
    ("7FFF00", "chartreuse"),
    ("D2691E", "chocolate"),
    ("FF7F50", "coral"),
    ("6495ED", "cornflowerblue"),
    ("FFF8DC", "cornsilk"),
    ("DC143C", "crimson"),
    ("00FFFF", "cyan"),
    ("00008B", "darkblue"),
    ("008B8B", "darkcyan"),
    ("B8860B", "darkgoldenrod"),
    ("A9A9A9", "darkgray"),
    ("006400", "darkgreen"),
    ("A9A9A9", "darkgrey"),
    ("BDB76B", "darkkhaki"),
    ("8B008B", "darkmagenta"),
    ("556B2F", "darkolivegreen"),
    ("FF8C00", "darkorange"),
    ("9932CC", "darkorchid"),
    ("8B0000", "darkred"),
    ("E9967A", "darksalmon"),
    ("8FBC8F", "darkseagreen"),
    ("483D8B", "darkslateblue"),
    ("2F4F4F", "darkslategray"),
    ("2F4F4F", "darkslategrey"),
    ("00CED1", "darkturquoise"),
    ("9400D3", "darkviolet"),
    ("FF1493", "deeppink"),
    ("00BFFF", "deepskyblue"),
    ("696969", "dimgray"),
    ("696969", "dimgrey"),
    ("1E90FF", "dodgerblue"),
    ("B22222", "firebrick"),
    ("FFFAF0", "floralwhite"),
    ("228B22", "forestgreen"),
    ("FF00FF", "fuchsia"),
    ("DCDCDC", "gainsboro"),
    ("F8F8FF", "ghostwhite"),
    ("FFD700", "gold"),
    ("DAA520", "goldenrod"),
    ("808080", "gray"),
    ("008000", "green"),
    ("ADFF2F", "greenyellow"),
    ("808080", "grey"),
    ("F0FFF0", "honeydew"),
    ("FF69B4", "hotpink"),
    ("CD5C5C", "indianred"),
    ("4B0082", "indigo"),
    ("FFFFF0", "ivory"),
    ("F0E68C", "khaki"),
    ("E6E6FA", "lavender"),
    ("FFF0F5", "lavenderblush"),
    ("7CFC00", "lawngreen"),
    ("FFFACD", "lemonchiffon"),
    ("ADD8E6", "lightblue"),
    ("F08080", "lightcoral"),
    ("E0FFFF", "lightcyan"),
    ("FAFAD2", "lightgoldenrodyellow"),
    ("D3D3D3", "lightgray"),
    ("90EE90", "lightgreen"),
    ("D3D3D3", "lightgrey"),
    ("FFB6C1", "lightpink"),
    ("FFA07A", "lightsalmon"),
    ("20B2AA", "lightseagreen"),
    ("87CEFA", "lightskyblue"),
    ("778899", "lightslategray"),
    ("778899", "lightslategrey"),
    ("B0C4DE", "lightsteelblue"),
    ("FFFFE0", "lightyellow"),
    ("00FF00", "lime"),
    ("32CD32", "limegreen"),
    ("FAF0E6", "linen"),
    ("FF00FF", "magenta"),
    ("800000", "maroon"),
    ("66CDAA", "mediumaquamarine"),
    ("0000CD", "mediumblue"),
    ("BA55D3", "mediumorchid"),
    ("9370DB", "mediumpurple"),
    ("3CB371", "mediumseagreen"),
    ("7B68EE", "mediumslateblue"),
    ("00FA9A", "mediumspringgreen"),
    ("48D1CC", "mediumturquoise"),
    ("C71585", "mediumvioletred"),
    ("191970", "midnightblue"),
    ("F5FFFA", "mintcream"),
    ("FFE4E1", "mistyrose"),
    ("FFE4B5", "moccasin"),
    ("FFDEAD", "navajowhite"),
    ("000080", "navy"),
    ("FDF5E6", "oldlace"),
    ("808000", "olive"),
    ("6B8E23", "olivedrab"),
    ("FFA500", "orange"),
    ("FF4500", "orangered"),
    ("DA70D6", "orchid"),
    ("EEE8AA", "palegoldenrod"),
    ("98FB98", "palegreen"),
    ("AFEEEE", "paleturquoise"),
    ("DB7093", "palevioletred"),
    ("FFEFD5", "papayawhip"),
    ("FFDAB9", "peachpuff"),
    ("CD853F", "peru"),
    ("FFC0CB", "pink"),
    ("DDA0DD", "plum"),
    ("B0E0E6", "powderblue"),
    ("800080", "purple"),
    ("FF0000", "red"),
    ("BC8F8F", "rosybrown"),
    ("4169E1", "royalblue"),
    ("8B4513", "saddlebrown"),
    ("FA8072", "salmon"),
    ("F4A460", "sandybrown"),
    ("2E8B57", "seagreen"),
    ("FFF5EE", "seashell"),
    ("A0522D", "sienna"),
    ("C0C0C0", "silver"),
    ("87CEEB", "skyblue"),
    ("6A5ACD", "slateblue"),
    ("708090", "slategray"),
    ("708090", "slategrey"),
    ("FFFAFA", "snow"),
    ("00FF7F", "springgreen"),
    ("4682B4", "steelblue"),
    ("D2B48C", "tan"),
    ("008080", "teal"),
    ("D8BFD8", "thistle"),
    ("FF6347", "tomato"),
    ("40E0D0", "turquoise"),
    ("EE82EE", "violet"),
    ("F5DEB3", "wheat"),
    ("FFFFFF", "white"),
    ("F5F5F5", "whitesmoke"),
    ("FFFF00", "yellow"),
    ("9ACD32", "yellowgreen"),
];

/// The default parent colors, as (hex, name) pairs.
const DEFAULT_PARENTS: [(&str, &str); 12] = [
    ("000000", "black"),
    ("808080", "grey"),
    ("FFFFFF", "white"),
    ("FF0000", "red"),
    ("FFA500", "orange"),
    ("FFFF00", "yellow"),
    ("008000", "green"),
    ("00FFFF", "aqua"),
    ("0000FF", "blue"),
    ("800080", "purple"),
    ("FFC0CB", "pink"),
    ("A52A2A", "brown"),
];

/// Curated parents of the 16 basic HTML colors.
const BASIC_PARENTS: [(&str, &str); 16] = [
    ("black", "black"),
    ("silver", "grey"),
    ("gray", "grey"),
    ("white", "white"),
    ("maroon", "red"),
    ("red", "red"),
    ("purple", "purple"),
    ("fuchsia", "pink"),
    ("green", "green"),
    ("lime", "green"),
    ("olive", "green"),
    ("yellow", "yellow"),
    ("navy", "blue"),
    ("blue", "blue"),
    ("teal", "aqua"),
    ("aqua", "aqua"),
];

fn from_table<T>(table: &[(&str, &str)], make: impl Fn(&str, Rgb) -> T) -> Vec<T> {
    table
        .iter()
        .filter_map(|(hex, name)| match Rgb::from_hex(hex) {
            Ok(color) => Some(make(name, color)),
            Err(err) => {
                log::warn!("skipping built-in color {name}: {err}");
                None
            }
        })
        .collect()
}

/// The 147 CSS3 named colors.
pub fn css3_colors() -> Vec<NamedColor> {
    from_table(&CSS3_COLORS, |name, color| NamedColor::new(name, color))
}

/// The default set of parent colors.
///
/// Identifiers equal the names: black, grey, white, red, orange, yellow,
/// green, aqua, blue, purple, pink and brown.
pub fn default_parents() -> Vec<ParentColor> {
    from_table(&DEFAULT_PARENTS, |name, color| ParentColor::new(name, color))
}

/// A curated mapping of the 16 basic HTML colors to [`default_parents`].
pub fn basic_parent_mapping() -> ParentMapping {
    BASIC_PARENTS.iter().copied().collect()
}

#[derive(Deserialize)]
struct CatalogColor {
    hex: Rgb,
    name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SeedFile {
    List(Vec<NamedColor>),
    Catalog(BTreeMap<String, CatalogColor>),
}

/// Parse a seed file of named colors.
///
/// Two layouts are accepted: an array of `{"hex", "name", "pantone"?}`
/// objects, or a catalog object keyed by catalog code whose values are
/// `{"hex", "name"}`. Catalog keys become the `pantone` field.
///
/// # Example
///
/// ```
/// use swatch_reference::seeds::parse_seed_json;
///
/// let colors = parse_seed_json(r#"{"19-1664 TPX": {"hex": "9E1030", "name": "true red"}}"#).unwrap();
///
/// assert_eq!(colors[0].name, "true red");
/// assert_eq!(colors[0].pantone.as_deref(), Some("19-1664 TPX"));
/// ```
pub fn parse_seed_json(json: &str) -> Result<Vec<NamedColor>, ReferenceError> {
    let colors = match serde_json::from_str::<SeedFile>(json)? {
        SeedFile::List(colors) => colors,
        SeedFile::Catalog(catalog) => catalog
            .into_iter()
            .map(|(code, c)| NamedColor::new(c.name, c.hex).with_pantone(code))
            .collect(),
    };
    Ok(colors)
}

#[derive(Deserialize)]
struct ParentSeed {
    #[serde(default)]
    id: Option<String>,
    name: String,
    hex: Rgb,
}

/// Parse an array of `{"id"?, "name", "hex"}` parent colors.
///
/// A missing identifier defaults to the name.
pub fn parse_parent_json(json: &str) -> Result<Vec<ParentColor>, ReferenceError> {
    let seeds: Vec<ParentSeed> = serde_json::from_str(json)?;
    Ok(seeds
        .into_iter()
        .map(|seed| {
            let parent = ParentColor::new(seed.name, seed.hex);
            match seed.id {
                Some(id) => parent.with_id(id),
                None => parent,
            }
        })
        .collect())
}

/// Build a hierarchy for every color space from the built-in seeds.
pub fn builtin_reports() -> Result<Vec<BuildReport>, ReferenceError> {
    let leaves = css3_colors();
    let parents = default_parents();
    ColorSpace::ALL
        .iter()
        .map(|space| build_hierarchy(&leaves, &parents, *space))
        .collect()
}

/// A reference over the built-in seeds, in every color space.
pub fn builtin_reference() -> Result<ReferenceHierarchy, ReferenceError> {
    Ok(ReferenceHierarchy::from_reports(builtin_reports()?))
}
