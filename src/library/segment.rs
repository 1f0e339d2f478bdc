use byteorder::{BigEndian, ReadBytesExt};
use log::trace;
use std::io::{self, Read, Write};

use crate::library::error::ScanError;
use crate::library::source::ByteSource;

// SEGMENT LENGTH FIELD //

/// Bytes occupied by the length field itself; the declared length counts them.
pub const LENGTH_FIELD_LEN: u16 = 2;

/// Upper bound on how much payload is held in memory at once.
pub const CHUNK_SIZE: usize = 4096;

/// Reads a segment's big-endian length field and streams the payload that
/// follows it, either into `sink` or nowhere.
///
/// A declared length below 2 cannot describe a valid segment; it is treated
/// as an empty payload instead of wrapping around. A failing `sink` aborts
/// with `ScanError::Sink`.
///
/// # Returns
/// The declared length exactly as stored in the file.
pub fn skip_or_copy<R, W>(source: &mut ByteSource<R>, mut sink: Option<&mut W>) -> Result<u16, ScanError>
where
    R: Read,
    W: Write + ?Sized,
{
    let header_offset = source.position();
    let declared = source.read_u16::<BigEndian>().map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => ScanError::TruncatedHeader {
            offset: header_offset,
        },
        _ => ScanError::Io(e),
    })?;

    let mut remaining = u64::from(declared.saturating_sub(LENGTH_FIELD_LEN));
    trace!(
        "segment length {} at offset {}, {} payload bytes",
        declared, header_offset, remaining
    );

    let mut chunk = [0u8; CHUNK_SIZE];
    while remaining > 0 {
        let want = remaining.min(CHUNK_SIZE as u64) as usize;
        let got = match source.read(&mut chunk[..want]) {
            Ok(0) => {
                return Err(ScanError::TruncatedPayload {
                    offset: source.position(),
                    missing: remaining,
                });
            }
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ScanError::Io(e)),
        };
        if let Some(out) = sink.as_deref_mut() {
            out.write_all(&chunk[..got]).map_err(ScanError::Sink)?;
        }
        remaining -= got as u64;
    }

    Ok(declared)
}
