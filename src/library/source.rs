use std::io::{self, BufRead, BufReader, Read};

/// Forward-only reader that keeps track of the absolute offset of the next
/// byte it will hand out.
pub struct ByteSource<R: Read> {
    reader: BufReader<R>,
    position: u64,
}

impl<R: Read> ByteSource<R> {
    pub fn new(inner: R) -> Self {
        ByteSource {
            reader: BufReader::new(inner),
            position: 0,
        }
    }

    /// Reads a single byte, `Ok(None)` at end of stream.
    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = loop {
            match self.reader.fill_buf() {
                Ok([]) => return Ok(None),
                Ok(buf) => break buf[0],
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        self.reader.consume(1);
        self.position += 1;
        Ok(Some(byte))
    }

    /// Offset of the next byte to be read.
    pub fn position(&self) -> u64 {
        self.position
    }
}

impl<R: Read> Read for ByteSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.reader.read(buf)?;
        self.position += n as u64;
        Ok(n)
    }
}
