//! Error types for disk and partition operations.
//!
//! This module provides error handling for partition table reading, FAT16 partition
//! selection and the boot sector decoding that follows it.

use std::io;
use thiserror;

use crate::filesystem::boot_sector_error::BootSectorError;

/// Represents errors that can occur while inspecting a disk image.
#[derive(thiserror::Error, Debug)]
pub enum DiskError {
    /// Wraps an I/O error that occurred during disk operations.
    #[error("I/O error: {0}")]
    Io(io::Error),
    /// The image is too short to hold a Master Boot Record.
    #[error("Disk image is {0} bytes long, too small to hold a partition table")]
    ImageTooSmall(u64),
    /// None of the four partition table entries carries a FAT16 type code.
    #[error("No FAT16 filesystem found")]
    NoFat16Partition,
    /// The partition table terminator is not 0x55AA.
    #[error("Invalid partition table signature: 0x{0:04X}")]
    InvalidSignature(u16),
    /// The boot sector of the selected partition could not be decoded.
    #[error("Boot sector of partition #{index}: {source}")]
    BootSector {
        index: usize,
        source: BootSectorError,
    },
}

/// Converts standard I/O errors into DiskError.
impl From<io::Error> for DiskError {
    fn from(err: io::Error) -> Self {
        DiskError::Io(err)
    }
}

impl From<binread::Error> for DiskError {
    fn from(err: binread::Error) -> Self {
        match err {
            binread::Error::Io(err) => DiskError::Io(err),
            other => DiskError::Io(io::Error::other(format!("{other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_failures_become_io_errors() {
        let err = DiskError::from(binread::Error::AssertFail {
            pos: 446,
            message: "bad entry".into(),
        });

        assert!(matches!(err, DiskError::Io(e) if e.kind() == io::ErrorKind::Other));
    }
}
