use log::debug;
use std::io::{self, Write};

use crate::library::jpeg::{ScanSink, ScanToken, Segment};
use crate::library::marker::{SOI, marker_name};
use crate::shared::settings::Options;

/// Placeholder written for a run of bytes that are not markers.
pub const NON_MARKER: &str = "XX";

/// Display side of a scan: writes the marker signature, the comment text and
/// the trailing data to `out`, as selected in the options.
pub struct SignatureWriter<W: Write> {
    out: W,
    show_signature: bool,
    show_comment: bool,
    show_tail: bool,
    previous: Option<ScanToken>,
}

impl<W: Write> SignatureWriter<W> {
    pub fn new(out: W, options: &Options) -> Self {
        SignatureWriter {
            out,
            show_signature: options.show_signature,
            show_comment: options.show_comment,
            show_tail: options.show_tail,
            previous: None,
        }
    }
}

impl<W: Write> ScanSink for SignatureWriter<W> {
    fn on_token(&mut self, token: ScanToken) -> io::Result<()> {
        let previous = self.previous.replace(token);
        if !self.show_signature {
            return Ok(());
        }

        match token {
            ScanToken::Marker { code: SOI, .. } => write!(self.out, "{:02x}", SOI),
            ScanToken::Marker { code, .. } => write!(self.out, " {:02x}", code),
            ScanToken::NonMarker { .. } if matches!(previous, Some(ScanToken::NonMarker { .. })) => Ok(()),
            ScanToken::NonMarker { .. } => write!(self.out, " {}", NON_MARKER),
        }
    }

    fn on_segment(&mut self, segment: &Segment) -> io::Result<()> {
        match segment.declared_length {
            Some(length) => debug!(
                "{} at offset {}, length {}, payload from offset {}",
                marker_name(segment.code),
                segment.offset,
                length,
                segment.payload_start
            ),
            None => debug!("{} at offset {}", marker_name(segment.code), segment.offset),
        }
        Ok(())
    }

    fn on_comment_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.show_comment {
            self.out.write_all(bytes)?;
        }
        Ok(())
    }

    fn on_tail_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.show_tail {
            self.out.write_all(bytes)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(tokens: &[ScanToken]) -> String {
        let options = Options {
            show_signature: true,
            ..Options::default()
        };
        let mut writer = SignatureWriter::new(Vec::new(), &options);
        for token in tokens {
            writer.on_token(*token).unwrap();
        }
        String::from_utf8(writer.out).unwrap()
    }

    fn marker(code: u8) -> ScanToken {
        ScanToken::Marker { code, offset: 0 }
    }

    fn span() -> ScanToken {
        ScanToken::NonMarker { offset: 0 }
    }

    #[test]
    fn typical_baseline_signature() {
        let tokens = [
            marker(0xD8),
            marker(0xE0),
            marker(0xDB),
            marker(0xC0),
            marker(0xC4),
            marker(0xDA),
            span(),
            marker(0xD9),
        ];
        assert_eq!(render(&tokens), "d8 e0 db c0 c4 da XX d9");
    }

    #[test]
    fn consecutive_spans_are_collapsed() {
        let tokens = [marker(0xD8), span(), span(), marker(0xD9)];
        assert_eq!(render(&tokens), "d8 XX d9");
    }

    #[test]
    fn leading_span_gets_a_separator() {
        assert_eq!(render(&[span(), marker(0xD9)]), " XX d9");
    }

    #[test]
    fn nothing_written_when_display_is_off() {
        let mut writer = SignatureWriter::new(Vec::new(), &Options::default());
        writer.on_token(marker(0xD8)).unwrap();
        writer.on_comment_bytes(b"hello").unwrap();
        writer.on_tail_bytes(&[0xAA]).unwrap();
        assert!(writer.out.is_empty());
    }

    #[test]
    fn segments_only_go_to_the_log() {
        let options = Options {
            show_signature: true,
            show_comment: true,
            ..Options::default()
        };
        let mut writer = SignatureWriter::new(Vec::new(), &options);
        let segment = Segment {
            code: 0xE1,
            offset: 2,
            declared_length: Some(16),
            payload_start: 6,
        };
        writer.on_segment(&segment).unwrap();
        assert!(writer.out.is_empty());
    }

    #[test]
    fn comment_and_tail_are_raw() {
        let options = Options {
            show_comment: true,
            show_tail: true,
            ..Options::default()
        };
        let mut writer = SignatureWriter::new(Vec::new(), &options);
        writer.on_comment_bytes(b"hi").unwrap();
        writer.on_tail_bytes(&[0xAA, 0xBB]).unwrap();
        assert_eq!(writer.out, vec![b'h', b'i', 0xAA, 0xBB]);
    }
}
