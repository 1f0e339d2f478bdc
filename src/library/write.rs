use filetime::{FileTime, set_file_mtime};
use log::{debug, info};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::library::error::{JpegError, Operation};
use crate::library::jpeg::{CommentLocation, TailLocation};

// REWRITING THE FILE IN PLACE //

/// Cuts the file off at the start of its trailing data.
///
/// # Returns
/// * `Ok(true)` if the file was shortened
/// * `Ok(false)` if it was already no longer than `tail.start`
pub fn truncate_tail(path: &Path, tail: &TailLocation) -> Result<bool, JpegError> {
    let file = OpenOptions::new()
        .write(true)
        .open(path)
        .map_err(|e| JpegError::io(Operation::Truncate, path, e))?;

    let len = file
        .metadata()
        .map_err(|e| JpegError::io(Operation::Truncate, path, e))?
        .len();
    if len <= tail.start {
        debug!("{}: nothing to truncate", path.display());
        return Ok(false);
    }

    file.set_len(tail.start)
        .map_err(|e| JpegError::io(Operation::Truncate, path, e))?;
    info!(
        "{}: removed {} trailing bytes",
        path.display(),
        len - tail.start
    );
    Ok(true)
}

/// Rewrites the file without the bytes of `comment`.
///
/// The new content is written to a temporary file next to the original and
/// renamed over it only after it has been completely written and synced. On
/// any failure the temporary file is deleted and the original stays as it was.
pub fn remove_comment(path: &Path, comment: &CommentLocation) -> Result<(), JpegError> {
    let fail = |e: io::Error| JpegError::io(Operation::RemoveComment, path, e);

    let original = File::open(path).map_err(fail)?;
    let permissions = original.metadata().map_err(fail)?.permissions();
    let directory = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".jpegmark-")
        .suffix(".tmp")
        .tempfile_in(directory)
        .map_err(fail)?;
    debug!(
        "{}: writing comment-free copy to {}",
        path.display(),
        temp.path().display()
    );

    {
        let mut reader = BufReader::new(original);
        let mut writer = BufWriter::new(temp.as_file_mut());
        copy_exact(&mut reader, &mut writer, comment.segment_start).map_err(fail)?;
        copy_exact(&mut reader, &mut io::sink(), comment.total_length).map_err(fail)?;
        io::copy(&mut reader, &mut writer).map_err(fail)?;
        writer.flush().map_err(fail)?;
    }
    temp.as_file().sync_all().map_err(fail)?;
    fs::set_permissions(temp.path(), permissions).map_err(fail)?;

    temp.persist(path).map_err(|e| fail(e.error))?;
    info!(
        "{}: removed {}-byte comment segment at offset {}",
        path.display(),
        comment.total_length,
        comment.segment_start
    );
    Ok(())
}

/// Copies exactly `count` bytes, failing if the reader runs dry first.
fn copy_exact<R: Read, W: Write + ?Sized>(reader: &mut R, writer: &mut W, count: u64) -> io::Result<()> {
    let copied = io::copy(&mut reader.by_ref().take(count), writer)?;
    if copied < count {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("file ended after {} of {} bytes", copied, count),
        ));
    }
    Ok(())
}

/// Modification time of `path`, to be put back after an edit.
pub fn read_mtime(path: &Path) -> Result<FileTime, JpegError> {
    let meta = fs::metadata(path).map_err(|e| JpegError::io(Operation::KeepDate, path, e))?;
    Ok(FileTime::from_last_modification_time(&meta))
}

pub fn restore_mtime(path: &Path, mtime: FileTime) -> Result<(), JpegError> {
    set_file_mtime(path, mtime).map_err(|e| JpegError::io(Operation::KeepDate, path, e))
}
