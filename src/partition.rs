//! MBR partition table decoding and FAT16 partition selection.

pub mod disk;
pub mod disk_error;
pub mod mbr;
