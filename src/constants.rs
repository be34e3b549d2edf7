//! On-disk constants shared by the partition table and boot sector decoders.

/// The number of primary partitions supported by MBR.
pub const PART_CNT: usize = 4;

/// The size of a sector in bytes.
pub const SECTOR_SIZE: usize = 512;

/// Absolute byte offset of the first partition table entry.
pub const PART_TABLE_OFFSET: u64 = 446;

/// Size in bytes of one partition table entry.
pub const PART_ENTRY_SIZE: usize = 16;

/// Boot sector signature (0x55 0xAA on disk, read as a little-endian u16).
pub const BOOT_SIGNATURE: u16 = 0xAA55;

/// Expected value of the extended boot signature byte.
pub const EXT_BOOT_SIGNATURE: u8 = 0x29;
