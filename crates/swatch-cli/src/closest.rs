use argh::FromArgs;
use std::path::PathBuf;

use swatch::color::ColorSpace;
use swatch::reference::{ColorQuery, ErrorBody, Resolver};

#[derive(FromArgs)]
/// Resolve a color to its closest reference color and parent
#[argh(subcommand, name = "closest")]
pub struct ClosestArgs {
    /// color as 6 hex digits, takes precedence over the channels
    #[argh(option)]
    hex: Option<String>,

    /// red channel
    #[argh(option, short = 'r')]
    red: Option<i64>,

    /// green channel
    #[argh(option, short = 'g')]
    green: Option<i64>,

    /// blue channel
    #[argh(option, short = 'b')]
    blue: Option<i64>,

    /// path to JSON hierarchy rows, defaults to the built-in reference
    #[argh(option)]
    hierarchy: Option<PathBuf>,

    /// color space to compare colors in
    #[argh(option, default = "ColorSpace::Rgb")]
    space: ColorSpace,
}

pub fn run(args: ClosestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = Resolver::new(crate::load_reference(args.hierarchy.as_deref())?);

    let resolution = ColorQuery::from_params(args.hex.as_deref(), args.red, args.green, args.blue)
        .and_then(|query| resolver.resolve_query(&query, args.space));

    match resolution {
        Ok(resolution) => {
            println!("{}", serde_json::to_string_pretty(&resolution)?);
            Ok(())
        }
        Err(err) => {
            println!("{}", serde_json::to_string(&ErrorBody::from(&err))?);
            Err(err.into())
        }
    }
}
