//! Blank disk image creation and the state file that tracks it.

pub mod image_error;
pub mod image_file;
pub mod state;

pub use image_error::ImageError;
pub use image_file::{ImageFile, ImageStatus};
pub use state::AppState;
