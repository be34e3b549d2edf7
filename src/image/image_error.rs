//! Error types for image creation and the application state file.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("IO Error: `{0}`")]
    Io(io::Error),
    #[error("Corrupted state file: `{0}`")]
    State(String),
}

impl From<io::Error> for ImageError {
    fn from(err: io::Error) -> Self {
        ImageError::Io(err)
    }
}

impl From<binread::Error> for ImageError {
    fn from(err: binread::Error) -> Self {
        match err {
            binread::Error::Io(err) if err.kind() != io::ErrorKind::UnexpectedEof => {
                ImageError::Io(err)
            }
            other => ImageError::State(format!("{other:?}")),
        }
    }
}
