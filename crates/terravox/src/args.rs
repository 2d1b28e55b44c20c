//! # Argument Capture
//!
//! Turns the raw argument list into one immutable [`ImportConfig`]
//! snapshot plus the handful of CLI-only settings (seed, registry file,
//! preview flag). Enum-valued options are lenient the same way the
//! engine is: unknown names fall back to their defaults.

use std::path::PathBuf;

use terravox_import::{Channel, ImportConfig, ImportMode, Origin};

/// Everything the binary needs for one run.
#[derive(Clone, Debug)]
pub struct CliArgs {
    /// The captured import configuration.
    pub config: ImportConfig,
    /// Optional TOML block registry; the built-in set applies otherwise.
    pub registry_path: Option<PathBuf>,
    /// RNG seed for the weighted block selector.
    pub seed: u64,
    /// Print the size estimate instead of running the import.
    pub preview: bool,
}

/// Usage text printed on `--help` or a parse failure.
pub const USAGE: &str = "\
Usage: terravox <heightmap> [options]

Options:
  --mode <m>          heightmap | surface | colormap | normalmap
  --channel <c>       luminance | red | green | blue | alpha
  --origin <o>        bottom_front_left | bottom_center | center | top_center
  --height-scale <n>  vertical scale in blocks (1-320, default 32)
  --max-size <n>      XZ footprint cap (1-1024, default 256)
  --pattern <p>       weighted block pattern, e.g. 70%Rock_Stone,30%Dirt
  --colormap <file>   secondary colour image (colormap/normalmap modes)
  --registry <file>   TOML block definitions (default: built-in set)
  --seed <n>          RNG seed for block selection (default 0)
  --invert            invert heights after normalisation
  --smooth            apply the 3x3 smoothing pass
  --preview           print the size estimate and exit";

/// Parses the argument list (without the program name).
///
/// # Errors
///
/// Returns a message suitable for printing alongside [`USAGE`] when the
/// heightmap path is missing, an option lacks its value, a numeric value
/// does not parse, or an option is unknown.
pub fn parse(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut heightmap: Option<PathBuf> = None;
    let mut registry_path = None;
    let mut seed = 0u64;
    let mut preview = false;

    let mut mode = ImportMode::default();
    let mut channel = Channel::default();
    let mut origin = Origin::default();
    let mut height_scale = None;
    let mut max_size = None;
    let mut pattern = None;
    let mut colormap = None;
    let mut invert = false;
    let mut smooth = false;

    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("option {name} requires a value"))
        };
        match arg.as_str() {
            "--mode" => mode = ImportMode::from_name(&value("--mode")?),
            "--channel" => channel = Channel::from_name(&value("--channel")?),
            "--origin" => origin = Origin::from_name(&value("--origin")?),
            "--height-scale" => {
                height_scale = Some(parse_number(&value("--height-scale")?, "--height-scale")?);
            }
            "--max-size" => {
                max_size = Some(parse_number(&value("--max-size")?, "--max-size")?);
            }
            "--pattern" => pattern = Some(value("--pattern")?),
            "--colormap" => colormap = Some(PathBuf::from(value("--colormap")?)),
            "--registry" => registry_path = Some(PathBuf::from(value("--registry")?)),
            "--seed" => {
                seed = value("--seed")?
                    .parse()
                    .map_err(|_| "option --seed requires an integer".to_string())?;
            }
            "--invert" => invert = true,
            "--smooth" => smooth = true,
            "--preview" => preview = true,
            other if other.starts_with("--") => {
                return Err(format!("unknown option: {other}"));
            }
            path if heightmap.is_none() => heightmap = Some(PathBuf::from(path)),
            extra => return Err(format!("unexpected argument: {extra}")),
        }
    }

    let heightmap = heightmap.ok_or_else(|| "missing heightmap path".to_string())?;

    let mut config = ImportConfig::new(heightmap);
    config.mode = mode;
    config.channel = channel;
    config.origin = origin;
    config.invert_height = invert;
    config.smooth = smooth;
    config.colormap_path = colormap;
    if let Some(scale) = height_scale {
        config.height_scale = scale;
    }
    if let Some(size) = max_size {
        config.max_size = size;
    }
    if let Some(pattern) = pattern {
        config.block_pattern = pattern;
    }

    Ok(CliArgs {
        config,
        registry_path,
        seed,
        preview,
    })
}

fn parse_number(text: &str, option: &str) -> Result<u32, String> {
    text.parse()
        .map_err(|_| format!("option {option} requires an integer"))
}
