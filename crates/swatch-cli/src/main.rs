use argh::FromArgs;
use std::path::Path;

use swatch::reference::{seeds, ReferenceHierarchy};

mod analyze;
mod build;
mod closest;

#[derive(FromArgs)]
/// Extract dominant colors from images and name them after a color reference
struct Args {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Analyze(analyze::AnalyzeArgs),
    Closest(closest::ClosestArgs),
    Build(build::BuildArgs),
}

/// Load hierarchy rows from a JSON file, or build the reference from the
/// built-in seeds.
pub(crate) fn load_reference(
    path: Option<&Path>,
) -> Result<ReferenceHierarchy, Box<dyn std::error::Error>> {
    let reference = match path {
        Some(path) => ReferenceHierarchy::from_json(&std::fs::read_to_string(path)?)?,
        None => seeds::builtin_reference()?,
    };
    log::debug!("loaded {} reference entries", reference.len());
    Ok(reference)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    match args.command {
        Command::Analyze(args) => analyze::run(args),
        Command::Closest(args) => closest::run(args),
        Command::Build(args) => build::run(args),
    }
}
