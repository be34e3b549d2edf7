//! This module provides functionality for parsing the partition table of a
//! Master Boot Record (MBR) and selecting the FAT16 partition it describes.
//!
//! The four 16-byte entries start at byte offset 446 of the disk image and are
//! immediately followed by the 0x55AA terminator at offset 510.
use binread::{BinRead, BinReaderExt};
use getset::Getters;
use log::debug;
use std::fmt::Write;
use std::fmt::{self, Display};
use std::io::{self, Read, Seek};

use super::disk_error::DiskError;
use crate::constants::{BOOT_SIGNATURE, PART_CNT, PART_ENTRY_SIZE, PART_TABLE_OFFSET, SECTOR_SIZE};
use crate::traits::LayoutDisplay;
use crate::utils;

/// Represents the type of a partition table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PTType {
    /// Unused entry (0x00).
    Empty,
    /// 16-bit FAT, volume smaller than 32 MB (0x04).
    Fat16Small,
    /// 16-bit FAT, volume of 32 MB or more (0x06).
    Fat16,
    /// FAT16 with LBA addressing (0x0E).
    LBAFat16,
    /// Unsupported partition type, encapsulating the raw type byte.
    Unsupported(u8),
}

impl Display for PTType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PTType::Empty => write!(f, "Empty"),
            PTType::Fat16Small => write!(f, "FAT16 <32M"),
            PTType::Fat16 => write!(f, "FAT16 >=32M"),
            PTType::LBAFat16 => write!(f, "LBA FAT16"),
            PTType::Unsupported(b) => write!(f, "Other: 0x{b:02X}"),
        }
    }
}

impl PTType {
    /// Creates a `PTType` instance from a raw byte.
    ///
    /// # Parameters
    /// - `byte`: A single byte representing the partition type.
    ///
    /// # Returns
    /// - One of the FAT16 variants for 0x04, 0x06 and 0x0E.
    /// - `PTType::Empty` for 0x00.
    /// - `PTType::Unsupported(byte)` for any other value.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x00 => PTType::Empty,
            0x04 => PTType::Fat16Small,
            0x06 => PTType::Fat16,
            0x0E => PTType::LBAFat16,
            _ => PTType::Unsupported(byte),
        }
    }

    /// Returns the raw type byte.
    pub fn as_byte(&self) -> u8 {
        match self {
            PTType::Empty => 0x00,
            PTType::Fat16Small => 0x04,
            PTType::Fat16 => 0x06,
            PTType::LBAFat16 => 0x0E,
            PTType::Unsupported(b) => *b,
        }
    }

    /// Whether this type code denotes one of the FAT16 variants.
    pub fn is_fat16(&self) -> bool {
        matches!(self, PTType::Fat16Small | PTType::Fat16 | PTType::LBAFat16)
    }
}

/// Legacy cylinder/head/sector address decoded from its packed 3-byte form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chs {
    pub cylinder: u16,
    pub head: u8,
    pub sector: u8,
}

impl Chs {
    /// Decodes a packed CHS address.
    ///
    /// Byte 0 is the head, the low 6 bits of byte 1 the sector and the cylinder
    /// is made of the top 2 bits of byte 1 followed by byte 2.
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Chs {
            cylinder: (((bytes[1] & 0xC0) as u16) << 2) | bytes[2] as u16,
            head: bytes[0],
            sector: bytes[1] & 0x3F,
        }
    }
}

impl Display for Chs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.cylinder, self.head, self.sector)
    }
}

/// Represents a single partition table entry.
#[derive(BinRead, Debug, Clone, Copy, Getters)]
#[br(little)]
pub struct PTEntry {
    /// Boot indicator (0x80 for the active partition).
    #[get = "pub"]
    boot_flag: u8,
    /// CHS address of the first sector.
    start_chs: [u8; 3],
    /// The type of the partition.
    #[br(map = |b: u8| PTType::from_byte(b))]
    #[get = "pub"]
    pt_type: PTType,
    /// CHS address of the last sector.
    end_chs: [u8; 3],
    /// The starting Logical Block Address (LBA) of the partition.
    #[get = "pub"]
    lba_start: u32,
    /// The number of sectors in the partition.
    #[get = "pub"]
    sector_cnt: u32,
}

impl PTEntry {
    pub fn start_chs(&self) -> Chs {
        Chs::from_bytes(self.start_chs)
    }

    pub fn end_chs(&self) -> Chs {
        Chs::from_bytes(self.end_chs)
    }

    pub fn is_bootable(&self) -> bool {
        self.boot_flag == 0x80
    }

    /// Byte offset of the partition's first sector within the disk image.
    pub fn byte_offset(&self) -> u64 {
        self.lba_start as u64 * SECTOR_SIZE as u64
    }
}

impl Display for PTEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type 0x{:02X} ({}), start {}, {} sectors, CHS {} - {}",
            self.pt_type.as_byte(),
            self.pt_type,
            self.lba_start,
            self.sector_cnt,
            self.start_chs(),
            self.end_chs()
        )
    }
}

/// Represents the partition table of a Master Boot Record (MBR) together with
/// the sector terminator that follows it.
#[derive(Debug, Getters)]
pub struct PartitionTable {
    /// The four partition table entries, in on-disk order.
    #[get = "pub"]
    pt_entries: [PTEntry; PART_CNT],
    /// The terminator found at offset 510.
    #[get = "pub"]
    signature: u16,
    /// Size of the disk image in sectors.
    #[get = "pub"]
    sector_cnt: u64,
}

impl PartitionTable {
    /// Reads and parses the partition table from a disk image.
    ///
    /// The 64 bytes of the table and the 2-byte terminator are read in a single
    /// contiguous block starting at offset 446.
    ///
    /// # Errors
    /// - `DiskError::ImageTooSmall` if the image is shorter than one sector.
    /// - `DiskError::Io` if the read fails.
    pub fn from<T: Read + Seek>(reader: &mut T) -> Result<Self, DiskError> {
        let len = utils::stream_len(reader)?;
        if len < SECTOR_SIZE as u64 {
            return Err(DiskError::ImageTooSmall(len));
        }

        let buffer = utils::read_at(reader, PART_TABLE_OFFSET, PART_CNT * PART_ENTRY_SIZE + 2)?;
        Self::from_bytes(&buffer, len / SECTOR_SIZE as u64)
    }

    /// Parses the 4 entries and the terminator from a 66-byte buffer.
    fn from_bytes(buffer: &[u8], sector_cnt: u64) -> Result<Self, DiskError> {
        let mut cursor = io::Cursor::new(buffer);

        let pt_entries: [PTEntry; PART_CNT] = [
            cursor.read_le()?,
            cursor.read_le()?,
            cursor.read_le()?,
            cursor.read_le()?,
        ];
        let signature: u16 = cursor.read_le()?;

        Ok(PartitionTable {
            pt_entries,
            signature,
            sector_cnt,
        })
    }

    /// Whether the sector terminator equals 0x55AA.
    pub fn has_valid_signature(&self) -> bool {
        self.signature == BOOT_SIGNATURE
    }

    /// Checks the sector terminator.
    ///
    /// # Returns
    /// - `Ok(())` if the terminator is valid.
    /// - `Err(DiskError::InvalidSignature)` otherwise.
    pub fn validate(&self) -> Result<(), DiskError> {
        match self.has_valid_signature() {
            true => Ok(()),
            false => Err(DiskError::InvalidSignature(self.signature)),
        }
    }

    /// Returns the first entry, in ascending index order, whose type is a FAT16 variant.
    ///
    /// No further check is made on the entry: its start sector may be zero or lie
    /// outside the image.
    pub fn find_fat16(&self) -> Result<(usize, &PTEntry), DiskError> {
        self.pt_entries
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.pt_type.is_fat16())
            .ok_or(DiskError::NoFat16Partition)
    }
}

/// Reads the partition table of a disk image and selects its first FAT16 partition.
///
/// # Returns
/// - `Ok((index, entry))` with the index (0 to 3) of the matching entry.
/// - `Err(DiskError::NoFat16Partition)` if none of the entries is typed FAT16.
pub fn find_fat16_partition<T: Read + Seek>(reader: &mut T) -> Result<(usize, PTEntry), DiskError> {
    let table = PartitionTable::from(reader)?;
    let (index, entry) = table.find_fat16()?;
    debug!("FAT16 partition #{index}: {entry}");

    Ok((index, *entry))
}

/// Displays the partition table as a box table, one row per entry.
impl LayoutDisplay for PartitionTable {
    fn display_layout(&self, indent: u8) -> Result<String, std::fmt::Error> {
        let mut out = String::from("");
        let indent = " ".repeat(indent.into());

        writeln!(out, "{}┌{:─^56}┐", indent, " Master Boot Record Layout ")?;
        writeln!(out, "{}├{:<46}{:>10}┤", indent, "Disk Size", self.sector_cnt)?;
        writeln!(
            out,
            "{}├{:<46}{:>10}┤",
            indent,
            "Table Signature",
            format!("0x{:04X}", self.signature)
        )?;
        writeln!(out, "{}├{:─^56}┤", indent, "")?;

        writeln!(
            out,
            "{}├{:^8}┬{:^16}┬{:^11}┬{:^11}┬{:^6}┤",
            indent, "Part", "Type", "Start", "End", "Boot"
        )?;
        writeln!(
            out,
            "{}├{:─<8}┼{:─<16}┼{:─<11}┼{:─<11}┼{:─<6}┤",
            indent, "", "", "", "", ""
        )?;

        for (i, entry) in self.pt_entries.iter().enumerate() {
            let start = u64::from(entry.lba_start);
            let end = start + u64::from(entry.sector_cnt);

            writeln!(
                out,
                "{}│{:^8}│{:^16}│{:>11}│{:>11}│{:^6}│",
                indent,
                format!("#{i}"),
                entry.pt_type.to_string(),
                start,
                end,
                if entry.is_bootable() { "*" } else { "" }
            )?;
        }

        writeln!(
            out,
            "{}└{:─<8}┴{:─<16}┴{:─<11}┴{:─<11}┴{:─<6}┘",
            indent, "", "", "", "", ""
        )?;

        Ok(out)
    }
}
