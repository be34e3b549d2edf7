//! This is the main entry point for the FAT16 inspection tool.
//!
//! The program provides an interactive command-line interface for reading the
//! FAT16 boot sector of disk images and creating blank images.

use clap::Parser;
use fat16_inspect::Disk;
use fat16_inspect::commands::{Command, HELP};
use fat16_inspect::config::Config;
use fat16_inspect::image::{AppState, ImageFile, ImageStatus};
use log::{error, info, warn};
use std::{
    io::{self, Write},
    path::Path,
};

/// Represents the runtime state of the program.
struct RunState {
    /// Blank image creation and its persisted progress
    image: ImageFile,
    /// Enable the validation of the signatures
    strict: bool,
}

fn main() {
    let config = Config::parse();

    if let Err(e) = stderrlog::new()
        .module(module_path!())
        .module("fat16_inspect")
        .verbosity(config.verbosity())
        .init()
    {
        eprintln!("Failed to initialise logging: {e}");
    }

    let state = AppState::load(config.state_path(), *config.image_size()).unwrap_or_else(|e| {
        warn!("Ignoring state file {}: {e}", config.state_path().display());
        AppState::new(*config.image_size())
    });

    let mut run_state = RunState {
        image: ImageFile::new(state),
        strict: *config.strict(),
    };

    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            error!("{e}");
        }

        let mut s = String::new();
        match io::stdin().read_line(&mut s) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!("Failed to read command: {e}");
                break;
            }
        }

        match Command::from_string(&s) {
            Command::Boot(path) => print_boot_sector(&run_state, Path::new(&path)),
            Command::Layout(path) => print_layout(&run_state, Path::new(&path)),
            Command::Create(path) => create_image(&mut run_state, &config, Path::new(&path)),
            Command::Strict => {
                run_state.strict = !run_state.strict;
                println!(
                    "Strict validation {}",
                    if run_state.strict { "enabled" } else { "disabled" }
                );
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Unknown(s) => error!("Unknown command: {s:?}"),
            Command::Invalid(s) => error!("{s}"),
            Command::Empty => {}
        }
    }
}

fn print_boot_sector(run_state: &RunState, path: &Path) {
    let disk = match Disk::from_file(path, run_state.strict) {
        Ok(disk) => disk,
        Err(err) => {
            error!("{}: {err}", path.display());
            return;
        }
    };

    match disk.display_report() {
        Ok(report) => print!("{report}"),
        Err(e) => error!("Print report error: {e}"),
    }
}

fn print_layout(run_state: &RunState, path: &Path) {
    match Disk::from_file(path, run_state.strict) {
        Ok(disk) => {
            if let Err(e) = disk.print_layout(0) {
                error!("Print layout error: {e}");
            }
        }
        Err(err) => error!("{}: {err}", path.display()),
    }
}

fn create_image(run_state: &mut RunState, config: &Config, path: &Path) {
    match run_state.image.create_or_resume(path) {
        Ok(ImageStatus::Created) => {
            println!("Image file '{}' created successfully.", path.display())
        }
        Ok(ImageStatus::AlreadyComplete) => {
            println!("Image file '{}' is already complete.", path.display())
        }
        Ok(ImageStatus::Resumed { from }) => {
            println!("Resumed writing from position {from}.")
        }
        Err(err) => {
            error!("Unable to create image file '{}': {err}", path.display());
            return;
        }
    }

    match run_state.image.state().save(config.state_path()) {
        Ok(()) => info!("State saved to {}", config.state_path().display()),
        Err(err) => error!("Failed to save state: {err}"),
    }
}
