use std::fmt::Write as FmtWrite;
use std::io;
use std::io::{Read, Seek, SeekFrom};

/// Reads a specific sector from a reader into a buffer.
///
/// # Arguments
///
/// - `reader`: A mutable reference to the disk image to read from.
/// - `sector`: The sector number to read.
/// - `sector_size`: The size in bytes of a sector.
/// - `buffer`: A mutable reference to a vector where the sector data will be stored.
///
/// The buffer will be resized to match the sector size.
///
/// # Errors
///
/// Returns an `io::Error` if the sector cannot be read in full.
pub fn read_sector<T: Read + Seek>(
    reader: &mut T,
    sector: u64,
    sector_size: usize,
    buffer: &mut Vec<u8>,
) -> io::Result<()> {
    buffer.resize(sector_size, 0);

    reader.seek(SeekFrom::Start(sector_size as u64 * sector))?;

    reader.read_exact(buffer).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!("Failed to read sector {sector}: {err}"),
        )
    })?;

    Ok(())
}

/// Reads `len` bytes starting at the absolute byte `offset`.
pub fn read_at<T: Read + Seek>(reader: &mut T, offset: u64, len: usize) -> io::Result<Vec<u8>> {
    let mut buffer = vec![0; len];
    reader.seek(SeekFrom::Start(offset))?;
    reader.read_exact(&mut buffer).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!("Failed to read {len} bytes at offset {offset}: {err}"),
        )
    })?;

    Ok(buffer)
}

/// Returns the total length in bytes of a seekable stream.
///
/// The stream position is left at the end.
pub fn stream_len<T: Seek>(reader: &mut T) -> io::Result<u64> {
    reader.seek(SeekFrom::End(0))
}

/// Writes data to a file at a specific offset.
///
/// # Arguments
///
/// - `disk`: A mutable reference to the file to write to.
/// - `offset`: The offset in bytes where the data will be written.
/// - `data`: The bytes to write.
pub fn write_at<T: io::Write + io::Seek>(disk: &mut T, offset: u64, data: &[u8]) -> io::Result<()> {
    disk.seek(SeekFrom::Start(offset))?;
    disk.write_all(data)
}

/// Renders bytes as lowercase hex pairs, 16 per line.
///
/// Pairs on a line are separated by a single space and every line ends with `\n`.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);

    for chunk in bytes.chunks(16) {
        for (i, byte) in chunk.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = write!(out, "{byte:02x}");
        }
        out.push('\n');
    }

    out
}

/// Interprets a fixed-length on-disk byte array as text.
///
/// Display stops at the first zero byte, if any. Padding spaces are kept verbatim.
/// Each byte maps to exactly one char (Latin-1), so code-page bytes are never replaced.
pub fn fixed_str(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    bytes[..end].iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn hex_dump_of_a_sector_has_32_lines_of_16_pairs() {
        let sector: Vec<u8> = (0..512).map(|i| (i % 256) as u8).collect();
        let dump = hex_dump(&sector);

        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 32);
        assert!(lines.iter().all(|l| l.split(' ').count() == 16));
        assert!(dump.ends_with('\n'));
        assert!(!dump.contains(" \n"));

        let joined: String = dump.split_whitespace().collect();
        let decoded: Vec<u8> = (0..joined.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&joined[i..i + 2], 16).unwrap())
            .collect();
        assert_eq!(decoded, sector);
    }

    #[test]
    fn hex_dump_is_lowercase_and_zero_padded() {
        assert_eq!(hex_dump(&[0x0A, 0xFF, 0x00]), "0a ff 00\n");
    }

    #[test]
    fn fixed_str_keeps_trailing_spaces() {
        assert_eq!(fixed_str(b"FAT16   "), "FAT16   ");
    }

    #[test]
    fn fixed_str_stops_at_first_zero_byte() {
        assert_eq!(fixed_str(b"NO\0NAME    "), "NO");
        assert_eq!(fixed_str(&[0; 8]), "");
    }

    #[test]
    fn fixed_str_keeps_one_char_per_high_byte() {
        let text = fixed_str(b"CAF\x82 \xff");

        assert_eq!(text.chars().count(), 6);
        assert_eq!(text, "CAF\u{82} \u{ff}");
        assert!(!text.contains(char::REPLACEMENT_CHARACTER));
    }

    #[test]
    fn read_sector_fails_on_short_input() {
        let mut cursor = Cursor::new(vec![0u8; 700]);
        let mut buffer = vec![];

        assert!(read_sector(&mut cursor, 0, 512, &mut buffer).is_ok());
        let err = read_sector(&mut cursor, 1, 512, &mut buffer).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn write_at_then_read_at() {
        let mut cursor = Cursor::new(vec![0u8; 32]);
        write_at(&mut cursor, 8, &[1, 2, 3]).unwrap();

        assert_eq!(read_at(&mut cursor, 7, 5).unwrap(), vec![0, 1, 2, 3, 0]);
        assert_eq!(stream_len(&mut cursor).unwrap(), 32);
    }
}
