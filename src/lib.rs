//! Inspects and edits the marker structure of JPEG files without decoding
//! any image data: lists the marker signature, shows or removes the comment
//! segment, and shows or truncates data appended after the end of the image.

pub mod library;
pub mod shared;

// MARKER TABLE AND STREAM SCANNER //

pub use library::jpeg::{
    CommentLocation, NoSink, ScanOptions, ScanOutcome, ScanSink, ScanToken, Segment, TailLocation, scan,
};
pub use library::marker::{has_payload, marker_name};
pub use library::segment::skip_or_copy;
pub use library::source::ByteSource;

// EDITING IN PLACE //

pub use library::write::{remove_comment, truncate_tail};

// ERRORS AND LOGGING //

pub use library::error::{JpegError, Operation, ScanError};
pub use library::log::{LogMode, init_logging};

// PER-FILE PROCESSING //

pub use shared::process::{FileReport, process_file};
pub use shared::settings::Options;
