//! Command-line configuration of the interactive tool.

use clap::{ArgAction, Parser};
use getset::Getters;
use std::path::PathBuf;

use crate::image::state::DEFAULT_IMAGE_SIZE;

/// Interactive inspector for the FAT16 boot sector of disk images.
#[derive(Debug, Clone, PartialEq, Eq, Parser, Getters)]
#[command(name = "main", version)]
#[get = "pub"]
pub struct Config {
    /// Increase log verbosity (repeat for more detail)
    #[arg(short, action = ArgAction::Count)]
    #[getset(skip)]
    verbose: u8,
    /// Path of the application state file
    #[arg(long = "state", default_value = "app_state.dat")]
    state_path: PathBuf,
    /// Size in bytes of new images when no state file exists
    #[arg(
        long,
        default_value_t = DEFAULT_IMAGE_SIZE,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    image_size: u64,
    /// Treat invalid signatures as errors
    #[arg(long)]
    strict: bool,
}

impl Config {
    /// Log verbosity as understood by stderrlog. Warnings are shown by default.
    pub fn verbosity(&self) -> usize {
        usize::from(self.verbose) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        Config::try_parse_from(std::iter::once("main").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let config = parse(&[]).unwrap();

        assert_eq!(config.verbosity(), 1);
        assert!(!*config.strict());
        assert_eq!(*config.image_size(), 1048576);
        assert_eq!(config.state_path(), &PathBuf::from("app_state.dat"));
    }

    #[test]
    fn all_flags() {
        let config = parse(&[
            "-vv",
            "--strict",
            "--state",
            "/tmp/s.dat",
            "--image-size",
            "4096",
        ])
        .unwrap();

        assert_eq!(config.verbosity(), 3);
        assert!(*config.strict());
        assert_eq!(config.state_path(), &PathBuf::from("/tmp/s.dat"));
        assert_eq!(*config.image_size(), 4096);
    }

    #[test]
    fn repeated_verbose_flags_and_inline_values() {
        let config = parse(&["-v", "-v", "--image-size=4096", "--state=s.dat"]).unwrap();

        assert_eq!(config.verbosity(), 3);
        assert_eq!(*config.image_size(), 4096);
        assert_eq!(config.state_path(), &PathBuf::from("s.dat"));
    }

    #[test]
    fn bad_arguments() {
        assert_eq!(
            parse(&["--color"]).unwrap_err().kind(),
            ErrorKind::UnknownArgument
        );
        assert!(parse(&["--state"]).is_err());
        assert_eq!(
            parse(&["--image-size", "0"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert_eq!(
            parse(&["--image-size", "big"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
    }
}
