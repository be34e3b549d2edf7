//! Disk image parsing and analysis.
//!
//! This module ties the two decoding steps together:
//! - Reading the MBR partition table and selecting its first FAT16 partition
//! - Decoding the boot sector of that partition
//! - Rendering the report and the layout of the disk

use getset::Getters;
use log::{debug, warn};
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use super::disk_error::DiskError;
use super::mbr::PartitionTable;
use crate::filesystem::fat16::Fat16Vol;
use crate::traits::LayoutDisplay;

/// Represents a disk image with its partition table and FAT16 volume.
#[derive(Debug, Getters)]
pub struct Disk {
    /// The disk image file path.
    #[get = "pub"]
    file_path: PathBuf,
    /// The partition table found on the disk
    #[get = "pub"]
    part_table: PartitionTable,
    /// Index (0 to 3) of the FAT16 partition table entry
    #[get = "pub"]
    part_index: usize,
    /// The FAT16 volume of that entry
    #[get = "pub"]
    volume: Fat16Vol,
}

impl Disk {
    /// Opens a disk image file and decodes its FAT16 partition.
    ///
    /// The file is only held for the duration of the call.
    ///
    /// # Parameters
    /// - `path`: Path to the disk image file
    /// - `validation`: Whether invalid signatures are errors rather than warnings
    ///
    /// # Errors
    /// - Returns `DiskError::Io` if the file cannot be opened or read
    /// - Returns `DiskError::NoFat16Partition` if no entry is typed FAT16
    /// - Returns `DiskError::BootSector` if the boot sector cannot be read or, with
    ///   validation, is invalid
    pub fn from_file(path: &Path, validation: bool) -> Result<Self, DiskError> {
        let mut f = File::open(path)?;
        Self::from_reader(&mut f, path, validation)
    }

    /// Decodes the partition table and FAT16 boot sector of any seekable disk image.
    pub fn from_reader<T: Read + Seek>(
        reader: &mut T,
        path: &Path,
        validation: bool,
    ) -> Result<Self, DiskError> {
        let part_table = PartitionTable::from(reader)?;
        if validation {
            part_table.validate()?;
        } else if !part_table.has_valid_signature() {
            warn!(
                "Partition table signature is 0x{:04X}, expected 0xAA55",
                part_table.signature()
            );
        }

        let (part_index, entry) = part_table.find_fat16()?;
        debug!("FAT16 partition #{part_index}: {entry}");

        let volume = Fat16Vol::from(reader, entry).map_err(|source| DiskError::BootSector {
            index: part_index,
            source,
        })?;

        let boot_sector = volume.boot_sector();
        if validation {
            boot_sector
                .validate()
                .map_err(|source| DiskError::BootSector {
                    index: part_index,
                    source,
                })?;
        } else if !boot_sector.is_valid_signature() {
            warn!(
                "Boot sector signature is 0x{:04X}, expected 0xAA55",
                boot_sector.sig()
            );
        }

        Ok(Disk {
            file_path: path.to_path_buf(),
            part_table,
            part_index,
            volume,
        })
    }

    /// Renders the inspection report: the selected partition, the raw boot
    /// sector and its fields.
    pub fn display_report(&self) -> Result<String, std::fmt::Error> {
        let mut out = String::from("");
        let boot_sector = self.volume.boot_sector();

        writeln!(out, "FAT16 filesystem found from partition {}", self.part_index)?;
        writeln!(out, "\nSector logic start: {}", self.volume.start())?;
        writeln!(out, "\nBoot sector: ")?;
        write!(out, "{}", boot_sector.hex_dump())?;
        writeln!(out, "\nInformation about the boot sector: ")?;
        write!(out, "{boot_sector}")?;

        Ok(out)
    }

    /// Prints a hierarchical layout of the disk structure.
    ///
    /// # Parameters
    /// - `indent`: Number of spaces to indent the layout
    ///
    /// The layout includes:
    /// - Partition table information
    /// - Region information for the FAT16 volume
    pub fn print_layout(&self, indent: u8) -> Result<(), std::fmt::Error> {
        print!("{}", self.part_table.display_layout(indent)?);
        print!("\n{}", self.volume.display_layout(indent + 3)?);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SECTOR_SIZE;
    use crate::filesystem::boot_sector::tests::fat16_sector;
    use crate::filesystem::boot_sector_error::BootSectorError;
    use crate::partition::mbr::tests::{entry, mbr_sector};
    use std::io::Cursor;

    fn image(start: u32) -> Vec<u8> {
        let mut image = mbr_sector([
            entry(0x83, 1, 1),
            [0; 16],
            entry(0x06, start, 65536),
            [0; 16],
        ]);
        let offset = start as usize * SECTOR_SIZE;
        image.resize(offset + SECTOR_SIZE, 0);
        image[offset..].copy_from_slice(&fat16_sector());
        image
    }

    #[test]
    fn boot_sector_is_read_from_the_selected_partition() {
        let mut cursor = Cursor::new(image(2048));
        let disk = Disk::from_reader(&mut cursor, Path::new("disk.img"), true).unwrap();

        assert_eq!(*disk.part_index(), 2);
        assert_eq!(*disk.volume().start(), 2048);
        assert_eq!(disk.volume().boot_sector().oem_name(), b"mkfs.fat");
        assert_eq!(disk.file_path(), Path::new("disk.img"));
    }

    #[test]
    fn report_lists_partition_dump_and_fields() {
        let mut cursor = Cursor::new(image(2048));
        let disk = Disk::from_reader(&mut cursor, Path::new("disk.img"), false).unwrap();
        let report = disk.display_report().unwrap();

        assert!(report.starts_with("FAT16 filesystem found from partition 2\n"));
        assert!(report.contains("\nSector logic start: 2048\n"));
        assert!(report.contains("\nBoot sector: \neb 3c 90"));
        assert!(report.contains("cc 55 aa\n\nInformation about the boot sector: \n"));
        assert!(report.ends_with("  + Boot sector signature: 0xaa55\n"));
    }

    #[test]
    fn missing_fat16_partition_stops_before_the_boot_sector() {
        let mut cursor = Cursor::new(mbr_sector([entry(0x0C, 1, 1), [0; 16], [0; 16], [0; 16]]));

        assert!(matches!(
            Disk::from_reader(&mut cursor, Path::new("disk.img"), false),
            Err(DiskError::NoFat16Partition)
        ));
    }

    #[test]
    fn truncated_image_is_a_boot_sector_error() {
        let mut bytes = image(4);
        bytes.truncate(4 * SECTOR_SIZE + 10);

        let err =
            Disk::from_reader(&mut Cursor::new(bytes), Path::new("disk.img"), false).unwrap_err();
        assert!(matches!(
            err,
            DiskError::BootSector {
                index: 2,
                source: BootSectorError::OutOfBounds { .. }
            }
        ));
    }

    #[test]
    fn invalid_boot_sector_signature_only_fails_with_validation() {
        let mut bytes = image(2);
        let end = bytes.len();
        bytes[end - 2] = 0;
        bytes[end - 1] = 0;

        assert!(Disk::from_reader(&mut Cursor::new(bytes.clone()), Path::new("d"), false).is_ok());
        assert!(matches!(
            Disk::from_reader(&mut Cursor::new(bytes), Path::new("d"), true),
            Err(DiskError::BootSector {
                source: BootSectorError::InvalidSignature(0),
                ..
            })
        ));
    }

    #[test]
    fn invalid_table_signature_only_fails_with_validation() {
        let mut bytes = image(2);
        bytes[510] = 0x00;

        assert!(Disk::from_reader(&mut Cursor::new(bytes.clone()), Path::new("d"), false).is_ok());
        assert!(matches!(
            Disk::from_reader(&mut Cursor::new(bytes), Path::new("d"), true),
            Err(DiskError::InvalidSignature(0xAA00))
        ));
    }
}
