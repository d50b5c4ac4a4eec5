use argh::FromArgs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use swatch::color::ColorSpace;
use swatch::io::functional::{read_image_any, GenericImage};
use swatch::palette::{extract_palette_with_cancel, name_palette, PaletteConfig};
use swatch::reference::Resolver;

#[derive(FromArgs)]
/// Extract the dominant colors of an image and print them as JSON
#[argh(subcommand, name = "analyze")]
pub struct AnalyzeArgs {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// number of colors, overrides the configuration file
    #[argh(option, short = 'k')]
    num_colors: Option<usize>,

    /// seed of the clustering, overrides the configuration file
    #[argh(option)]
    seed: Option<u64>,

    /// path to a JSON palette configuration
    #[argh(option)]
    config: Option<PathBuf>,

    /// path to JSON hierarchy rows, defaults to the built-in reference
    #[argh(option)]
    hierarchy: Option<PathBuf>,

    /// color space used to name the colors
    #[argh(option, default = "ColorSpace::Rgb")]
    space: ColorSpace,

    /// do not name the colors
    #[argh(switch)]
    no_names: bool,
}

fn palette_config(args: &AnalyzeArgs) -> Result<PaletteConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => PaletteConfig::default(),
    };

    if let Some(num_colors) = args.num_colors {
        config.num_colors = num_colors;
    }
    if args.seed.is_some() {
        config.kmeans.seed = args.seed;
    }

    Ok(config)
}

pub fn run(args: AnalyzeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = palette_config(&args)?;

    let cancel_token = Arc::new(AtomicBool::new(false));

    ctrlc::set_handler({
        let cancel_token = cancel_token.clone();
        move || {
            log::warn!("Received Ctrl-C signal. Cancelling the extraction");
            cancel_token.store(true, Ordering::SeqCst);
        }
    })?;

    let image = read_image_any(&args.image_path)?;
    log::info!("read {} image of {}", args.image_path.display(), image.size());

    let mut palette = match &image {
        GenericImage::Rgb8(img) => extract_palette_with_cancel(img, &config, &cancel_token)?,
        GenericImage::Rgba8(img) => extract_palette_with_cancel(img, &config, &cancel_token)?,
    };

    if !args.no_names {
        let resolver = Resolver::new(crate::load_reference(args.hierarchy.as_deref())?);
        name_palette(&mut palette, &resolver, args.space)?;
    }

    println!("{}", serde_json::to_string_pretty(&palette)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(config: Option<PathBuf>) -> AnalyzeArgs {
        AnalyzeArgs {
            image_path: PathBuf::from("image.png"),
            num_colors: Some(4),
            seed: None,
            config,
            hierarchy: None,
            space: ColorSpace::Rgb,
            no_names: false,
        }
    }

    #[test]
    fn flags_override_config_file() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("palette.json");
        std::fs::write(&path, r#"{"num_colors": 12, "kmeans": {"seed": 3}}"#)?;

        let config = palette_config(&args(Some(path)))?;
        assert_eq!(config.num_colors, 4);
        assert_eq!(config.kmeans.seed, Some(3));
        assert_eq!(config.alpha_threshold, 30);
        Ok(())
    }

    #[test]
    fn default_config() -> Result<(), Box<dyn std::error::Error>> {
        let config = palette_config(&args(None))?;
        assert_eq!(config.num_colors, 4);
        assert_eq!(config.kmeans.seed, None);
        Ok(())
    }
}
