//! Error types for FAT16 boot sector reading and validation.

use std::io;
use thiserror::Error;

/// Errors that can occur while reading, decoding or validating a boot sector.
#[derive(Error, Debug)]
pub enum BootSectorError {
    /// The read failed or returned fewer bytes than a sector.
    #[error("IO Error: `{0}`")]
    Io(io::Error),

    /// The sector lies (partly) past the end of the disk image.
    #[error(
        "Sector {sector} (byte offset {offset}) is out of bounds: the image is only {image_len} bytes long"
    )]
    OutOfBounds {
        sector: u32,
        offset: u64,
        image_len: u64,
    },

    /// The buffer handed to the decoder is not exactly one sector long.
    #[error("A boot sector is 512 bytes long, got {0}")]
    InvalidLength(usize),

    /// The trailing signature is not 0x55 0xAA.
    #[error("Invalid boot sector signature: `0x{0:04X}`. Expected signature: 0xAA55")]
    InvalidSignature(u16),
}

impl From<io::Error> for BootSectorError {
    fn from(err: io::Error) -> Self {
        BootSectorError::Io(err)
    }
}

impl From<binread::Error> for BootSectorError {
    fn from(err: binread::Error) -> Self {
        match err {
            binread::Error::Io(err) => BootSectorError::Io(err),
            other => BootSectorError::Io(io::Error::other(format!("{other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_failures_become_io_errors() {
        let eof = io::Error::from(io::ErrorKind::UnexpectedEof);
        assert!(matches!(
            BootSectorError::from(binread::Error::Io(eof)),
            BootSectorError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof
        ));

        let err = BootSectorError::from(binread::Error::AssertFail {
            pos: 0,
            message: "bad field".into(),
        });
        assert!(matches!(err, BootSectorError::Io(e) if e.kind() == io::ErrorKind::Other));
    }
}
