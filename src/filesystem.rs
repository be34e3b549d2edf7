//! FAT16 boot sector decoding and volume layout.

pub mod boot_sector;
pub mod boot_sector_error;
pub mod fat16;
pub mod fat_type;
