//! FAT16 volume structure.
//!
//! A thin wrapper around the boot sector that places the volume on the disk and
//! computes where its regions (reserved sectors, FATs, root directory, data) lie.

use getset::Getters;
use std::fmt::Write as FmtWrite;
use std::io::{Read, Seek};

use super::boot_sector::BootSector;
use super::boot_sector_error::BootSectorError;
use crate::partition::mbr::PTEntry;
use crate::traits::LayoutDisplay;

/// Structure for a FAT16 volume.
///
/// Sector numbers returned by its methods are absolute, counted from the start of the disk image.
#[derive(Debug, Getters)]
pub struct Fat16Vol {
    #[get = "pub"]
    boot_sector: BootSector,
    #[get = "pub"]
    start: u64,
    #[get = "pub"]
    end: u64,
}

impl Fat16Vol {
    /// Reads the boot sector of the volume described by a partition table entry.
    ///
    /// # Errors
    /// - Returns `BootSectorError::OutOfBounds` or `BootSectorError::Io` if the sector
    ///   cannot be read
    pub fn from<T: Read + Seek>(
        reader: &mut T,
        entry: &PTEntry,
    ) -> Result<Fat16Vol, BootSectorError> {
        let boot_sector = BootSector::from(reader, *entry.lba_start())?;
        let start = u64::from(*entry.lba_start());

        Ok(Self {
            boot_sector,
            start,
            end: start + u64::from(*entry.sector_cnt()),
        })
    }

    /// Returns the starting sector of the reserved region.
    fn rsvd_start(&self) -> u64 {
        self.start
    }

    /// Returns the starting sector of the first FAT.
    fn fat_start(&self) -> u64 {
        self.rsvd_start() + u64::from(*self.boot_sector.rsvd_sec_cnt())
    }

    /// Returns the starting sector of the root directory.
    fn root_start(&self) -> u64 {
        self.fat_start()
            + u64::from(*self.boot_sector.fat_sz_16()) * u64::from(*self.boot_sector.num_fat())
    }

    /// Returns the starting sector of the data region.
    pub fn data_start(&self) -> u64 {
        self.root_start() + u64::from(self.boot_sector.root_dir_sectors())
    }

    /// Returns the ending sector of the data region.
    fn data_end(&self) -> u64 {
        self.data_start()
            + u64::from(self.boot_sector.cluster_count())
                * u64::from(*self.boot_sector.sec_per_clus())
    }
}

/// Implements the LayoutDisplay trait for the FAT16 volume
impl LayoutDisplay for Fat16Vol {
    fn display_layout(&self, indent: u8) -> Result<String, std::fmt::Error> {
        let mut out = String::from("");
        let indent = " ".repeat(indent.into());
        let title = format!(" {} Partition Layout ", self.boot_sector.fat_type());

        writeln!(out, "{}┌{:─^55}┐", indent, title)?;
        writeln!(
            out,
            "{}├{:^12}┬{:^12}┬{:^12}┬{:^16}┤",
            indent, "Region", "Start", "End", "Description"
        )?;
        writeln!(
            out,
            "{}├{:─<12}┼{:─<12}┼{:─<12}┼{:─<16}┤",
            indent, "", "", "", ""
        )?;

        writeln!(
            out,
            "{}│{:<12}│{:<12}│{:<12}│{:<16}│",
            indent,
            "Reserved",
            self.rsvd_start(),
            self.fat_start(),
            "Boot + Reserved"
        )?;
        let fat_sz = u64::from(*self.boot_sector.fat_sz_16());
        for i in 0..*self.boot_sector.num_fat() {
            let fat_i_start = self.fat_start() + u64::from(i) * fat_sz;
            writeln!(
                out,
                "{}│{:<12}│{:<12}│{:<12}│{:<16}│",
                indent,
                format!("FAT #{i}"),
                fat_i_start,
                fat_i_start + fat_sz,
                "FAT Tables"
            )?;
        }
        writeln!(
            out,
            "{}│{:<12}│{:<12}│{:<12}│{:<16}│",
            indent,
            "Root Dir",
            self.root_start(),
            self.data_start(),
            "Root Directory"
        )?;
        writeln!(
            out,
            "{}│{:<12}│{:<12}│{:<12}│{:<16}│",
            indent,
            "Data",
            self.data_start(),
            self.data_end(),
            "Cluster Data"
        )?;
        if self.data_end() < self.end {
            writeln!(
                out,
                "{}│{:<12}│{:<12}│{:<12}│{:<16}│",
                indent,
                "",
                self.data_end(),
                self.end,
                "Volume Slack"
            )?;
        }

        writeln!(
            out,
            "{}└{:─<12}┴{:─<12}┴{:─<12}┴{:─<16}┘",
            indent, "", "", "", ""
        )?;

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SECTOR_SIZE;
    use crate::filesystem::boot_sector::tests::fat16_sector;
    use crate::partition::mbr::PartitionTable;
    use crate::partition::mbr::tests::{entry, mbr_sector};
    use std::io::Cursor;

    fn image() -> Vec<u8> {
        let mut image = mbr_sector([entry(0x06, 2, 70000), [0; 16], [0; 16], [0; 16]]);
        image.resize(3 * SECTOR_SIZE, 0);
        image[2 * SECTOR_SIZE..].copy_from_slice(&fat16_sector());
        image
    }

    #[test]
    fn regions_follow_the_boot_sector() {
        let mut cursor = Cursor::new(image());
        let table = PartitionTable::from(&mut cursor).unwrap();
        let vol = Fat16Vol::from(&mut cursor, &table.pt_entries()[0]).unwrap();

        assert_eq!(*vol.start(), 2);
        assert_eq!(*vol.end(), 70002);
        assert_eq!(vol.fat_start(), 6);
        assert_eq!(vol.root_start(), 6 + 128);
        assert_eq!(vol.data_start(), 6 + 128 + 32);
        assert_eq!(vol.data_end(), 166 + 16343 * 4);
    }

    #[test]
    fn layout_shows_each_fat_copy_and_slack() {
        let mut cursor = Cursor::new(image());
        let table = PartitionTable::from(&mut cursor).unwrap();
        let vol = Fat16Vol::from(&mut cursor, &table.pt_entries()[0]).unwrap();
        let layout = vol.display_layout(3).unwrap();

        assert!(layout.contains(" FAT16 Partition Layout "));
        assert!(layout.contains("FAT #0"));
        assert!(layout.contains("FAT #1"));
        assert!(!layout.contains("FAT #2"));
        assert!(layout.contains("Volume Slack"));
        assert!(layout.lines().all(|l| l.starts_with("   ")));
    }
}
