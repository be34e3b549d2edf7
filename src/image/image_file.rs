//! Creation of blank disk images.
//!
//! A new image is created sparse at its full size. An image left shorter than
//! the configured size, e.g. by an interrupted copy, is padded with zeros from
//! its current end.

use getset::Getters;
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io;
use std::path::Path;

use super::image_error::ImageError;
use super::state::AppState;
use crate::constants::SECTOR_SIZE;
use crate::utils::write_at;

/// Outcome of [`ImageFile::create_or_resume`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStatus {
    /// A new image was created.
    Created,
    /// The image already had the expected size.
    AlreadyComplete,
    /// The image was padded starting at byte `from`.
    Resumed { from: u64 },
}

/// Creates and completes blank disk images, tracking progress in an [`AppState`].
#[derive(Debug, Getters)]
pub struct ImageFile {
    #[get = "pub"]
    state: AppState,
}

impl ImageFile {
    pub fn new(state: AppState) -> Self {
        ImageFile { state }
    }

    /// Creates the image at `path`, or completes it if it already exists.
    ///
    /// An existing image is never truncated and its bytes are never overwritten.
    pub fn create_or_resume(&mut self, path: &Path) -> Result<ImageStatus, ImageError> {
        let image_size = *self.state.image_size();

        let len = match fs::metadata(path) {
            Ok(metadata) => metadata.len(),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                create_sparse(path, image_size)?;
                self.state.set_current_position(image_size);
                info!("Image file '{}' created ({image_size} bytes)", path.display());
                return Ok(ImageStatus::Created);
            }
            Err(err) => return Err(err.into()),
        };

        if len >= image_size {
            if len > image_size {
                warn!(
                    "Image file '{}' is {len} bytes long, larger than {image_size}",
                    path.display()
                );
            }
            self.state.set_current_position(len);
            return Ok(ImageStatus::AlreadyComplete);
        }

        debug!(
            "Resuming '{}' at byte {len} (last recorded position {})",
            path.display(),
            self.state.current_position()
        );
        let mut f = File::options().write(true).open(path)?;
        pad_with_zeros(&mut f, len, image_size)?;
        self.state.set_current_position(image_size);

        Ok(ImageStatus::Resumed { from: len })
    }
}

/// Creates a file of `size` bytes without writing its content.
///
/// On filesystems supporting it the file is sparse; it reads back as zeros either way.
pub fn create_sparse(path: &Path, size: u64) -> io::Result<()> {
    let f = File::create(path)?;
    f.set_len(size)
}

/// Writes zeros from byte `from` up to byte `to`, one sector at a time.
fn pad_with_zeros<T: io::Write + io::Seek>(disk: &mut T, from: u64, to: u64) -> io::Result<()> {
    let zeros = [0u8; SECTOR_SIZE];
    let mut pos = from;

    while pos < to {
        let len = (to - pos).min(SECTOR_SIZE as u64) as usize;
        write_at(disk, pos, &zeros[..len])?;
        pos += len as u64;
    }

    Ok(())
}
