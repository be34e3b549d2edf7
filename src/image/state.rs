//! Persistent application state.
//!
//! The state file holds two little-endian u64 values: the size of the images to
//! create and the position reached by the last image padding.

use binread::{BinRead, BinReaderExt};
use getset::{Getters, Setters};
use log::debug;
use std::fs;
use std::io::{self, Cursor};
use std::path::Path;

use super::image_error::ImageError;

/// Size in bytes of the state file.
pub const STATE_LEN: usize = 16;

/// Default size of a new disk image (1 MiB).
pub const DEFAULT_IMAGE_SIZE: u64 = 1024 * 1024;

#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq, Getters, Setters)]
#[br(little)]
#[getset(get = "pub", set = "pub")]
pub struct AppState {
    /// Size in bytes of the images to create
    image_size: u64,
    /// Byte position reached by the last image padding
    current_position: u64,
}

impl AppState {
    pub fn new(image_size: u64) -> Self {
        AppState {
            image_size,
            current_position: 0,
        }
    }

    /// Loads the state from a file.
    ///
    /// A missing file yields a fresh state for images of `default_size` bytes.
    ///
    /// # Errors
    /// - `ImageError::State` if the file holds fewer than 16 bytes
    /// - `ImageError::Io` if the file exists but cannot be read
    pub fn load(path: &Path, default_size: u64) -> Result<Self, ImageError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No state file at {}, using defaults", path.display());
                return Ok(AppState::new(default_size));
            }
            Err(err) => return Err(err.into()),
        };

        let state: AppState = Cursor::new(bytes).read_le()?;
        debug!("Loaded {state:?} from {}", path.display());

        Ok(state)
    }

    /// Serializes the state to its 16-byte on-disk form.
    pub fn to_bytes(&self) -> [u8; STATE_LEN] {
        let mut bytes = [0u8; STATE_LEN];
        bytes[0..8].copy_from_slice(&self.image_size.to_le_bytes());
        bytes[8..16].copy_from_slice(&self.current_position.to_le_bytes());
        bytes
    }

    /// Writes the state to a file, replacing any previous content.
    pub fn save(&self, path: &Path) -> Result<(), ImageError> {
        fs::write(path, self.to_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_disk_form_is_two_little_endian_u64() {
        let mut state = AppState::new(0x0102);
        state.set_current_position(0x0A0B);

        let bytes = state.to_bytes();
        assert_eq!(&bytes[0..8], &[0x02, 0x01, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&bytes[8..16], &[0x0B, 0x0A, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn short_state_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_state.dat");
        fs::write(&path, [1u8, 2, 3]).unwrap();

        assert!(matches!(
            AppState::load(&path, DEFAULT_IMAGE_SIZE),
            Err(ImageError::State(_))
        ));
    }

    #[test]
    fn missing_state_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::load(&dir.path().join("none.dat"), 4096).unwrap();

        assert_eq!(*state.image_size(), 4096);
        assert_eq!(*state.current_position(), 0);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_state.dat");
        let mut state = AppState::new(8192);
        state.set_current_position(1000);

        state.save(&path).unwrap();
        assert_eq!(fs::read(&path).unwrap().len(), STATE_LEN);
        assert_eq!(AppState::load(&path, DEFAULT_IMAGE_SIZE).unwrap(), state);
    }
}
