//! Enum for the different FAT types (FAT12, FAT16, FAT32).
//!
//! The type of a FAT volume is determined by its count of data clusters, not by
//! the partition type code or the `fil_sys_type` label of the boot sector.

use std::fmt;

/// Represents the different types of FAT filesystems.
///
/// Note: only FAT16 volumes are decoded by this crate. The other variants are
/// reported when a FAT16-typed partition holds something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FATType {
    FAT12,
    FAT16,
    FAT32,
}

impl FATType {
    /// Classifies a volume from its count of data clusters.
    ///
    /// - `FAT12` if cluster count < 4085
    /// - `FAT16` if cluster count < 65525
    /// - `FAT32` otherwise
    pub fn from_cluster_count(clus_cnt: u32) -> Self {
        if clus_cnt < 4085 {
            FATType::FAT12
        } else if clus_cnt < 65525 {
            FATType::FAT16
        } else {
            FATType::FAT32
        }
    }
}

impl fmt::Display for FATType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FATType::FAT12 => "FAT12",
            FATType::FAT16 => "FAT16",
            FATType::FAT32 => "FAT32",
        };
        write!(f, "{s}")
    }
}
