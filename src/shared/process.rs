use log::{debug, warn};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::library::error::{JpegError, Operation};
use crate::library::jpeg::{ScanOutcome, scan};
use crate::library::source::ByteSource;
use crate::library::write::{read_mtime, remove_comment, restore_mtime, truncate_tail};
use crate::shared::filecheck::has_jpeg_magic;
use crate::shared::settings::Options;
use crate::shared::signature::SignatureWriter;

/// Result of handling one file.
#[derive(Debug, Default)]
pub struct FileReport {
    pub scan: ScanOutcome,
    pub tail_truncated: bool,
    pub comment_removed: bool,
    /// Edit failures; they do not undo the scan or the other edit.
    pub edit_errors: Vec<JpegError>,
}

impl FileReport {
    pub fn is_clean(&self) -> bool {
        self.edit_errors.is_empty()
    }
}

/// Scans one file, writing the requested display to `out`, then applies the
/// requested edits using the offsets found by the scan.
///
/// Fails without touching the file if it is not a JPEG or if its marker
/// stream is cut short.
pub fn process_file<W: Write>(path: &Path, options: &Options, out: &mut W) -> Result<FileReport, JpegError> {
    if options.show_filename {
        write!(out, "{} ", path.display()).map_err(|e| JpegError::io(Operation::Report, path, e))?;
    }

    let scanned = scan_file(path, options, out);

    if options.ends_line() {
        writeln!(out).map_err(|e| JpegError::io(Operation::Report, path, e))?;
    }
    let outcome = scanned?;

    let mut report = FileReport {
        scan: outcome,
        ..FileReport::default()
    };
    if options.edits() {
        apply_edits(path, options, &mut report)?;
    }
    Ok(report)
}

/// Runs the requested edits at the locations recorded in `report.scan`.
///
/// A failed edit is collected in `report.edit_errors` and does not stop the
/// other one. Only failing to read the modification time for keep-date
/// aborts before anything is changed.
fn apply_edits(path: &Path, options: &Options, report: &mut FileReport) -> Result<(), JpegError> {
    let mtime = if options.keep_date {
        Some(read_mtime(path)?)
    } else {
        None
    };

    if options.delete_tail {
        if let Some(tail) = report.scan.tail {
            match truncate_tail(path, &tail) {
                Ok(done) => report.tail_truncated = done,
                Err(e) => report.edit_errors.push(e),
            }
        }
    }

    if options.delete_comment {
        if let Some(comment) = report.scan.comment {
            match remove_comment(path, &comment) {
                Ok(()) => report.comment_removed = true,
                Err(e) => report.edit_errors.push(e),
            }
        }
    }

    if let Some(mtime) = mtime {
        if report.tail_truncated || report.comment_removed {
            if let Err(e) = restore_mtime(path, mtime) {
                report.edit_errors.push(e);
            }
        }
    }

    Ok(())
}

/// Opens, checks and scans the file. The handle is closed before returning.
fn scan_file<W: Write>(path: &Path, options: &Options, out: &mut W) -> Result<ScanOutcome, JpegError> {
    let mut file = File::open(path).map_err(|e| JpegError::io(Operation::Open, path, e))?;

    if !has_jpeg_magic(&mut file).map_err(|e| JpegError::io(Operation::Read, path, e))? {
        warn!("{}: skipped, no start-of-image marker", path.display());
        return Err(JpegError::NotAJpeg {
            path: path.to_path_buf(),
        });
    }

    let mut source = ByteSource::new(file);
    let mut display = SignatureWriter::new(out, options);
    let outcome = scan(&mut source, options.to_scan_options(), &mut display)
        .map_err(|e| JpegError::scan(path, e))?;

    debug!(
        "{}: {} markers, comment {:?}, tail {:?}",
        path.display(),
        outcome.markers,
        outcome.comment,
        outcome.tail
    );
    Ok(outcome)
}
