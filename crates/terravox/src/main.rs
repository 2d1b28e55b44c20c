//! # TERRAVOX Importer
//!
//! Command line front end for the import engine: capture the settings,
//! load the block registry, run the import on the background queue and
//! report what landed on the clipboard.
//!
//! ```bash
//! # Import a heightmap with defaults
//! terravox terrain.png
//!
//! # Hollow surface with a mixed pattern, reproducible seed
//! terravox hills.f32 --mode surface --pattern "70%Rock_Stone,30%Dirt" --seed 42
//!
//! # Just the size estimate, no import
//! terravox huge.f32 --preview
//! ```

mod args;
mod clipboard;
mod queue;

use std::process::ExitCode;

use terravox_import::preview_info;
use terravox_registry::BlockRegistry;

use crate::clipboard::Clipboard;
use crate::queue::ImportQueue;

fn main() -> ExitCode {
    let cli = match args::parse(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!();
            eprintln!("{}", args::USAGE);
            return ExitCode::from(2);
        }
    };

    let registry = match &cli.registry_path {
        Some(path) => match BlockRegistry::from_toml(path) {
            Ok(registry) => registry,
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => BlockRegistry::builtin(),
    };

    if cli.preview {
        return match preview_info(&cli.config) {
            Some(line) => {
                println!("{line}");
                ExitCode::SUCCESS
            }
            None => {
                eprintln!(
                    "error: cannot determine dimensions of {}",
                    cli.config.heightmap_path.display()
                );
                ExitCode::FAILURE
            }
        };
    }

    let queue = ImportQueue::start(registry);
    let clipboard = Clipboard::new();

    if let Err(err) = queue.submit(cli.config, cli.seed) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    let outcome = queue.recv();
    queue.shutdown();

    match outcome {
        Ok(selection) => {
            clipboard.store(selection);
            if let Some(current) = clipboard.current() {
                println!("{}", current.summary());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
