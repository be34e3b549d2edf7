//!
//! fat16_inspect: A library and CLI for inspecting the FAT16 boot sector of disk images.
//!
//! This crate provides tools for:
//! - Reading the Master Boot Record (MBR) partition table and selecting its FAT16 partition
//! - Decoding the FAT16 boot sector of that partition
//! - Printing the boot sector as a hex dump and field by field, and the disk layout
//! - Creating blank disk images
//!
//! The decoding is read-only: the partition table and boot sectors are never modified.
//!
//! # Re-exports
//! - [`BootSector`]: FAT16 boot sector
//! - [`Disk`]: Disk image with its partition table and FAT16 volume
//! - [`find_fat16_partition`]: Partition table lookup

pub mod commands;
pub mod config;
pub mod constants;
pub mod filesystem;
pub mod image;
pub mod partition;
pub mod traits;
pub mod utils;

/// FAT16 boot sector (see [`filesystem::boot_sector::BootSector`]).
pub use crate::filesystem::boot_sector::BootSector;
/// Disk abstraction with partition table and FAT16 volume (see [`partition::disk::Disk`]).
pub use crate::partition::disk::Disk;
/// First FAT16 entry of a partition table (see [`partition::mbr::find_fat16_partition`]).
pub use crate::partition::mbr::find_fat16_partition;
