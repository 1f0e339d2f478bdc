use log::debug;
use std::io::{self, Read, Write};

use crate::library::error::ScanError;
use crate::library::marker::{COM, EOI, MARKER_PREFIX, STUFFED, has_payload};
use crate::library::segment::{CHUNK_SIZE, LENGTH_FIELD_LEN, skip_or_copy};
use crate::library::source::ByteSource;

// SCANNING THE MARKER STREAM //

/// Two bytes of `0xFF xx` in front of every segment.
pub const MARKER_LEN: u64 = 2;

/// Position of the first comment segment, covering marker, length field and payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentLocation {
    pub segment_start: u64,
    pub total_length: u64,
}

impl CommentLocation {
    pub fn end(&self) -> u64 {
        self.segment_start + self.total_length
    }
}

/// Position of the first byte after the end-of-image marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailLocation {
    pub start: u64,
}

/// One recognised marker as it passes by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub code: u8,
    /// Offset of the leading `0xFF`.
    pub offset: u64,
    pub declared_length: Option<u16>,
    pub payload_start: u64,
}

/// A single entry of the scan report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanToken {
    Marker { code: u8, offset: u64 },
    /// Unstructured bytes: entropy-coded scan data or trailing data.
    NonMarker { offset: u64 },
}

/// Receives the side channel of a scan. All methods default to doing nothing.
pub trait ScanSink {
    fn on_token(&mut self, _token: ScanToken) -> io::Result<()> {
        Ok(())
    }

    /// Called once the segment has been consumed, so the declared length is known.
    fn on_segment(&mut self, _segment: &Segment) -> io::Result<()> {
        Ok(())
    }

    fn on_comment_bytes(&mut self, _bytes: &[u8]) -> io::Result<()> {
        Ok(())
    }

    fn on_tail_bytes(&mut self, _bytes: &[u8]) -> io::Result<()> {
        Ok(())
    }
}

/// Sink that discards everything.
pub struct NoSink;

impl ScanSink for NoSink {}

impl ScanSink for Vec<ScanToken> {
    fn on_token(&mut self, token: ScanToken) -> io::Result<()> {
        self.push(token);
        Ok(())
    }
}

/// Which payload bytes are forwarded to the sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub capture_comment: bool,
    pub capture_tail: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub comment: Option<CommentLocation>,
    pub tail: Option<TailLocation>,
    /// Offset of the `0xFF` of the end-of-image marker.
    pub end_of_image: Option<u64>,
    pub markers: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Seeking,
    TagByte,
    ScanData,
    AfterEoi,
}

/// Adapts the comment channel of a sink to `Write` for the length codec.
struct CommentWriter<'a, S: ScanSink + ?Sized>(&'a mut S);

impl<S: ScanSink + ?Sized> Write for CommentWriter<'_, S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.on_comment_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Walks `source` once from its first byte to the end.
///
/// The stream must not have been advanced past the magic bytes; the leading
/// `FF D8` is reported like any other marker.
///
/// # Returns
/// The location of the first comment segment and of trailing data, if any.
/// A stream that ends inside a segment's length field or payload aborts the
/// whole scan, as does a sink that fails to take its output
/// (`ScanError::Sink`).
pub fn scan<R, S>(source: &mut ByteSource<R>, options: ScanOptions, sink: &mut S) -> Result<ScanOutcome, ScanError>
where
    R: Read,
    S: ScanSink + ?Sized,
{
    let mut outcome = ScanOutcome::default();
    let mut state = State::Seeking;

    while let Some(byte) = source.next_byte()? {
        let offset = source.position() - 1;
        state = match state {
            State::Seeking if byte == MARKER_PREFIX => State::TagByte,
            State::Seeking => {
                sink.on_token(ScanToken::NonMarker { offset }).map_err(ScanError::Sink)?;
                State::ScanData
            }
            State::ScanData if byte == MARKER_PREFIX => State::TagByte,
            State::ScanData => State::ScanData,
            State::TagByte if byte == STUFFED || byte == MARKER_PREFIX => State::ScanData,
            State::TagByte => read_marker(source, byte, offset - 1, options, sink, &mut outcome)?,
            State::AfterEoi => {
                outcome.tail = Some(TailLocation { start: offset });
                sink.on_token(ScanToken::NonMarker { offset }).map_err(ScanError::Sink)?;
                if options.capture_tail {
                    sink.on_tail_bytes(&[byte]).map_err(ScanError::Sink)?;
                }
                drain_tail(source, options, sink)?;
                debug!("trailing data from offset {} to {}", offset, source.position());
                break;
            }
        };
    }

    Ok(outcome)
}

fn read_marker<R, S>(
    source: &mut ByteSource<R>,
    code: u8,
    marker_offset: u64,
    options: ScanOptions,
    sink: &mut S,
    outcome: &mut ScanOutcome,
) -> Result<State, ScanError>
where
    R: Read,
    S: ScanSink + ?Sized,
{
    sink.on_token(ScanToken::Marker {
        code,
        offset: marker_offset,
    })
    .map_err(ScanError::Sink)?;
    outcome.markers += 1;

    let first_comment = code == COM && outcome.comment.is_none();
    let payload_start = source.position();

    let declared_length = if has_payload(code) {
        let declared = if code == COM && options.capture_comment {
            skip_or_copy(source, Some(&mut CommentWriter(&mut *sink)))?
        } else {
            skip_or_copy::<_, io::Sink>(source, None)?
        };
        Some(declared)
    } else {
        None
    };

    if first_comment {
        let declared = declared_length.unwrap_or(LENGTH_FIELD_LEN).max(LENGTH_FIELD_LEN);
        let location = CommentLocation {
            segment_start: marker_offset,
            total_length: MARKER_LEN + u64::from(declared),
        };
        debug!(
            "comment segment at offset {} ({} bytes)",
            location.segment_start, location.total_length
        );
        outcome.comment = Some(location);
    }

    sink.on_segment(&Segment {
        code,
        offset: marker_offset,
        declared_length,
        payload_start,
    })
    .map_err(ScanError::Sink)?;

    if code == EOI {
        outcome.end_of_image = Some(marker_offset);
        Ok(State::AfterEoi)
    } else {
        Ok(State::Seeking)
    }
}

/// Consumes everything after the first trailing byte, forwarding it when asked.
fn drain_tail<R, S>(source: &mut ByteSource<R>, options: ScanOptions, sink: &mut S) -> Result<(), ScanError>
where
    R: Read,
    S: ScanSink + ?Sized,
{
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        let n = match source.read(&mut chunk) {
            Ok(0) => return Ok(()),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ScanError::Io(e)),
        };
        if options.capture_tail {
            sink.on_tail_bytes(&chunk[..n]).map_err(ScanError::Sink)?;
        }
    }
}
