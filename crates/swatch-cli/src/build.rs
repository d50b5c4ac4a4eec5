use argh::FromArgs;
use std::path::PathBuf;

use swatch::color::ColorSpace;
use swatch::reference::{
    assign_hierarchy, build_hierarchy, seeds, NamedColor, ParentColor, ParentMapping,
    ReferenceHierarchy,
};

#[derive(FromArgs)]
/// Bind every seed color to its nearest parent and write the hierarchy rows as JSON
#[argh(subcommand, name = "build")]
pub struct BuildArgs {
    /// color space to build, repeat for several; defaults to all of them
    #[argh(option)]
    space: Vec<ColorSpace>,

    /// path to a JSON seed file of leaf colors, defaults to the CSS3 colors
    #[argh(option)]
    colors: Option<PathBuf>,

    /// path to a JSON file of parent colors, defaults to the built-in parents
    #[argh(option)]
    parents: Option<PathBuf>,

    /// path to a JSON object mapping leaf names to parent ids; binds by
    /// mapping instead of by distance
    #[argh(option)]
    mapping: Option<PathBuf>,

    /// path to the output file, defaults to the standard output
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,
}

pub fn run(args: BuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    let leaves: Vec<NamedColor> = match &args.colors {
        Some(path) => seeds::parse_seed_json(&std::fs::read_to_string(path)?)?,
        None => seeds::css3_colors(),
    };

    let parents: Vec<ParentColor> = match &args.parents {
        Some(path) => seeds::parse_parent_json(&std::fs::read_to_string(path)?)?,
        None => seeds::default_parents(),
    };

    let mapping: Option<ParentMapping> = match &args.mapping {
        Some(path) => Some(serde_json::from_str(&std::fs::read_to_string(path)?)?),
        None => None,
    };

    let spaces = if args.space.is_empty() {
        ColorSpace::ALL.to_vec()
    } else {
        args.space
    };

    let mut reference = ReferenceHierarchy::new();
    for space in spaces {
        let report = match &mapping {
            Some(mapping) => assign_hierarchy(&leaves, &parents, mapping, space)?,
            None => build_hierarchy(&leaves, &parents, space)?,
        };
        if !report.is_complete() {
            log::warn!(
                "{} of {} colors were skipped in {}",
                report.skipped.len(),
                leaves.len(),
                space
            );
        }
        reference.insert_report(report);
    }

    let json = reference.to_json()?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)?;
            log::info!("wrote {} rows to {}", reference.len(), path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
