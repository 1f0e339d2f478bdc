use std::io::{self, Read, Seek, SeekFrom};

use crate::library::marker::JPEG_MAGIC;

/// Checks for the `FF D8` start-of-image marker without consuming it.
///
/// The reader is put back at the start of the stream whatever the answer,
/// so the scanner sees the file from its first byte.
pub fn has_jpeg_magic<R: Read + Seek>(reader: &mut R) -> io::Result<bool> {
    let mut magic = [0u8; 2];
    let mut filled = 0;
    while filled < magic.len() {
        match reader.read(&mut magic[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    reader.seek(SeekFrom::Start(0))?;
    Ok(filled == magic.len() && magic == JPEG_MAGIC)
}
