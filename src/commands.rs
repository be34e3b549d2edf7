//! This module defines the `Command` enum and its associated methods for parsing
//! and handling user commands in the FAT16 inspection tool.
//!
//! Besides the named commands, the numeric keys of the legacy menu are accepted:
//! `0` quits, `1 <path>` reads a boot sector and `2 <path>` creates an image.

/// Help text listing the available commands.
pub const HELP: &str = "\
Commands:
  boot <path>     (1) Print the FAT16 boot sector of a disk image
  layout <path>   Print the partition table and FAT16 volume layout
  create <path>   (2) Create a blank disk image or complete a partial one
  strict          Toggle strict signature validation
  help            Show this help
  quit            (0) Exit";

/// Represents a user command in the FAT16 inspection tool.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Command to quit the program.
    Quit,
    /// Read and print the boot sector of the disk image at the given path.
    Boot(String),
    /// Print the layout of the disk image at the given path.
    Layout(String),
    /// Create or complete the disk image at the given path.
    Create(String),
    /// Toggle the signature validation.
    Strict,
    /// Print the list of commands.
    Help,
    /// Command for an unknown input, encapsulating the raw input as a `String`.
    Unknown(String),
    /// Command for invalid input, encapsulating an error message as a `String`.
    Invalid(String),
    /// Command for an empty input.
    Empty,
}

impl Command {
    /// Parses a string into a `Command` instance.
    ///
    /// # Parameters
    /// - `s`: A string slice representing the user input.
    ///
    /// # Returns
    /// - `Command::Quit` if the input is "quit" or "0".
    /// - `Command::Boot` with the image path if the input is "boot" or "1" followed by a path.
    /// - `Command::Layout` with the image path if the input is "layout" followed by a path.
    /// - `Command::Create` with the image path if the input is "create" or "2" followed by a path.
    /// - `Command::Strict` if the input is "strict".
    /// - `Command::Help` if the input is "help".
    /// - `Command::Unknown` if the input does not match any known command.
    /// - `Command::Invalid` if a command is missing its path argument.
    /// - `Command::Empty` if the input is empty or contains only whitespace.
    pub fn from_string(s: &str) -> Self {
        let mut parts = s.split_whitespace();
        match parts.next() {
            Some("quit") | Some("0") => Command::Quit,
            Some(cmd @ ("boot" | "1")) => match parts.next() {
                Some(arg) => Command::Boot(arg.to_string()),
                None => Command::Invalid(format!(
                    "Missing arg: '{cmd}' expects the path to a disk image."
                )),
            },
            Some("layout") => match parts.next() {
                Some(arg) => Command::Layout(arg.to_string()),
                None => Command::Invalid(String::from(
                    "Missing arg: 'layout' expects the path to a disk image.",
                )),
            },
            Some(cmd @ ("create" | "2")) => match parts.next() {
                Some(arg) => Command::Create(arg.to_string()),
                None => Command::Invalid(format!(
                    "Missing arg: '{cmd}' expects the name of the image file."
                )),
            },
            Some("strict") => Command::Strict,
            Some("help") => Command::Help,
            Some(other) => Command::Unknown(other.to_string()),
            None => Command::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_commands() {
        assert_eq!(Command::from_string("quit\n"), Command::Quit);
        assert_eq!(
            Command::from_string("boot disk.img"),
            Command::Boot("disk.img".into())
        );
        assert_eq!(
            Command::from_string("  layout   disk.img  "),
            Command::Layout("disk.img".into())
        );
        assert_eq!(
            Command::from_string("create new.img"),
            Command::Create("new.img".into())
        );
        assert_eq!(Command::from_string("strict"), Command::Strict);
        assert_eq!(Command::from_string("help"), Command::Help);
    }

    #[test]
    fn menu_keys() {
        assert_eq!(Command::from_string("0"), Command::Quit);
        assert_eq!(Command::from_string("1 a.img"), Command::Boot("a.img".into()));
        assert_eq!(
            Command::from_string("2 b.img"),
            Command::Create("b.img".into())
        );
    }

    #[test]
    fn missing_argument_and_unknown_input() {
        assert!(matches!(Command::from_string("boot"), Command::Invalid(_)));
        assert!(matches!(Command::from_string("2"), Command::Invalid(_)));
        assert_eq!(
            Command::from_string("format c:"),
            Command::Unknown("format".into())
        );
        assert_eq!(Command::from_string(" \t\n"), Command::Empty);
    }
}
