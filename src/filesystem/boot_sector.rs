//! FAT16 boot sector structure.
//!
//! This module implements:
//! - Decoding of the 512-byte boot sector found at the start of a FAT16 volume
//! - Signature checks (boot sector signature and extended boot signature)
//! - Values derived from the BIOS Parameter Block (total sectors, cluster count, FAT type)
//! - The field-by-field dump of the sector

use binread::{BinRead, BinReaderExt};
use getset::Getters;
use log::debug;
use std::fmt;
use std::io::{self, Read, Seek};

use super::boot_sector_error::BootSectorError;
use super::fat_type::FATType;
use crate::constants::{BOOT_SIGNATURE, EXT_BOOT_SIGNATURE, SECTOR_SIZE};
use crate::utils;

/// Boot sector of a FAT16 volume.
///
/// Every field is decoded from its fixed offset in the raw sector, multi-byte
/// integers in little-endian order. The raw bytes are kept for the hex dump.
#[derive(BinRead, Debug, Getters)]
#[br(little)]
#[get = "pub"]
pub struct BootSector {
    /// Jump instruction to boot code (0xEB ?? 0x90 or 0xE9 ?? ??)
    jmp: [u8; 3],
    /// Name of the system that formatted the volume (e.g., "MSDOS5.0")
    oem_name: [u8; 8],
    /// Number of bytes per sector
    bytes_per_sec: u16,
    /// Number of sectors per cluster
    sec_per_clus: u8,
    /// Number of reserved sectors, boot sector included
    rsvd_sec_cnt: u16,
    /// Number of FAT copies
    num_fat: u8,
    /// Maximum number of root directory entries
    root_ent_cnt: u16,
    /// Total sectors, 0 when the volume has 65536 sectors or more
    tot_sec_16: u16,
    /// Media descriptor (0xF8 for fixed disk)
    media: u8,
    /// Sectors per FAT
    fat_sz_16: u16,
    /// Sectors per track
    sec_per_trk: u16,
    /// Number of heads
    num_heads: u16,
    /// Number of hidden sectors preceding the partition
    hidd_sec: u32,
    /// Total sectors when `tot_sec_16` is 0
    tot_sec_32: u32,
    /// INT 13h drive number (0x80 for hard disk)
    drv_num: u8,
    /// Reserved, current head on some formatters
    cur_head: u8,
    /// Extended boot signature (0x29)
    boot_sig: u8,
    /// Volume serial number
    vol_id: u32,
    /// Volume label, space padded
    vol_lab: [u8; 11],
    /// Filesystem type label ("FAT16   ")
    fil_sys_type: [u8; 8],
    /// Bootstrap code
    #[br(count = 448)]
    boot_code: Vec<u8>,
    /// Boot sector signature (0x55 0xAA on disk)
    sig: u16,
    /// The sector as read from disk
    #[br(ignore)]
    raw: Vec<u8>,
}

impl BootSector {
    /// Reads the boot sector located at the given logical sector of a disk image.
    ///
    /// The sector is read at byte offset `512 × sector`. The signature is not
    /// checked, see [`BootSector::validate`].
    ///
    /// # Errors
    /// - `BootSectorError::OutOfBounds` if the image ends before the sector does
    /// - `BootSectorError::Io` if reading from the image fails
    pub fn from<T: Read + Seek>(
        reader: &mut T,
        sector: u32,
    ) -> Result<BootSector, BootSectorError> {
        let offset = sector as u64 * SECTOR_SIZE as u64;
        let image_len = utils::stream_len(reader)?;
        if offset + SECTOR_SIZE as u64 > image_len {
            return Err(BootSectorError::OutOfBounds {
                sector,
                offset,
                image_len,
            });
        }

        debug!("Reading boot sector at sector {sector} (byte offset {offset})");
        let mut buf = vec![0; SECTOR_SIZE];
        utils::read_sector(reader, sector.into(), SECTOR_SIZE, &mut buf)?;

        Self::from_bytes(buf)
    }

    /// Decodes a boot sector from a raw 512-byte buffer.
    pub fn from_bytes(buf: Vec<u8>) -> Result<BootSector, BootSectorError> {
        if buf.len() != SECTOR_SIZE {
            return Err(BootSectorError::InvalidLength(buf.len()));
        }

        let mut reader = io::Cursor::new(buf.as_slice());
        let mut bs: BootSector = reader.read_le()?;
        bs.raw = buf;

        Ok(bs)
    }

    /// Whether the trailing signature equals 0xAA55.
    pub fn is_valid_signature(&self) -> bool {
        self.sig == BOOT_SIGNATURE
    }

    /// Whether the extended fields (volume id, label, type) are flagged as valid.
    pub fn has_extended_signature(&self) -> bool {
        self.boot_sig == EXT_BOOT_SIGNATURE
    }

    /// Checks the boot sector signature.
    ///
    /// # Returns
    /// - `Ok(())` if the signature is 0xAA55
    /// - `Err(BootSectorError::InvalidSignature)` otherwise
    pub fn validate(&self) -> Result<(), BootSectorError> {
        if self.is_valid_signature() {
            Ok(())
        } else {
            Err(BootSectorError::InvalidSignature(self.sig))
        }
    }

    /// Total count of sectors on the volume.
    ///
    /// `tot_sec_32` is authoritative when `tot_sec_16` is 0.
    pub fn tot_sec(&self) -> u32 {
        if self.tot_sec_16 == 0 {
            self.tot_sec_32
        } else {
            self.tot_sec_16.into()
        }
    }

    /// Count of sectors occupied by the root directory.
    pub fn root_dir_sectors(&self) -> u32 {
        if self.bytes_per_sec == 0 {
            return 0;
        }
        (self.root_ent_cnt as u32 * 32).div_ceil(self.bytes_per_sec as u32)
    }

    /// First sector of the data region, relative to the start of the volume.
    pub fn first_data_sector(&self) -> u32 {
        self.rsvd_sec_cnt as u32
            + self.num_fat as u32 * self.fat_sz_16 as u32
            + self.root_dir_sectors()
    }

    /// Determines the number of clusters in the data region.
    ///
    /// A corrupted sector may declare fewer sectors than its metadata needs, or
    /// zero sectors per cluster; both yield 0.
    pub fn cluster_count(&self) -> u32 {
        let data_sec = self.tot_sec().saturating_sub(self.first_data_sector());
        data_sec.checked_div(self.sec_per_clus as u32).unwrap_or(0)
    }

    /// Determines the FAT type based on the number of clusters in the filesystem.
    pub fn fat_type(&self) -> FATType {
        FATType::from_cluster_count(self.cluster_count())
    }

    /// Renders the raw sector as 32 lines of 16 hexadecimal pairs.
    pub fn hex_dump(&self) -> String {
        utils::hex_dump(&self.raw)
    }
}

/// Field-by-field dump of the boot sector, in on-disk order.
///
/// Single-byte identifiers are printed as zero-padded hex, counts and geometry in
/// decimal and the three labels verbatim between brackets.
impl fmt::Display for BootSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  + Jump code: {:02x}:{:02x}:{:02x}",
            self.jmp[0], self.jmp[1], self.jmp[2]
        )?;
        writeln!(f, "  + OEM code: [{}]", utils::fixed_str(&self.oem_name))?;
        writeln!(f, "  + sector_size: {}", self.bytes_per_sec)?;
        writeln!(f, "  + sectors_per_cluster: {}", self.sec_per_clus)?;
        writeln!(f, "  + reserved_sectors: {}", self.rsvd_sec_cnt)?;
        writeln!(f, "  + number_of_fats: {}", self.num_fat)?;
        writeln!(f, "  + root_dir_entries: {}", self.root_ent_cnt)?;
        writeln!(f, "  + total_sectors_short: {}", self.tot_sec_16)?;
        writeln!(f, "  + media_descriptor: 0x{:02x}", self.media)?;
        writeln!(f, "  + fat_size_sectors: {}", self.fat_sz_16)?;
        writeln!(f, "  + sectors_per_track: {}", self.sec_per_trk)?;
        writeln!(f, "  + number_of_heads: {}", self.num_heads)?;
        writeln!(f, "  + hidden_sectors: {}", self.hidd_sec)?;
        writeln!(f, "  + total_sectors_long: {}", self.tot_sec_32)?;
        writeln!(f, "  + drive_number: 0x{:02x}", self.drv_num)?;
        writeln!(f, "  + current_head: 0x{:02x}", self.cur_head)?;
        writeln!(f, "  + boot_signature: 0x{:02x}", self.boot_sig)?;
        writeln!(f, "  + volume_id: 0x{:x}", self.vol_id)?;
        writeln!(f, "  + Volume label: [{}]", utils::fixed_str(&self.vol_lab))?;
        writeln!(
            f,
            "  + Filesystem type: [{}]",
            utils::fixed_str(&self.fil_sys_type)
        )?;
        writeln!(f, "  + Boot sector signature: 0x{:04x}", self.sig)?;

        Ok(())
    }
}
