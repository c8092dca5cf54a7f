#![cfg(test)]
use std::io::{Cursor, ErrorKind, Read, Write};

/// Accepts `limit` bytes, then fails every write.
pub(crate) struct FailingWriter {
    buf: Vec<u8>,
    limit: usize,
}

impl FailingWriter {
    pub(crate) fn new(limit: usize) -> Self {
        Self { buf: vec![], limit }
    }

    pub(crate) fn written(self) -> Vec<u8> {
        self.buf
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let room = self.limit - self.buf.len();
        if room == 0 {
            return Err(std::io::Error::other("disk full"));
        }
        let len = buf.len().min(room);
        self.buf.extend_from_slice(&buf[..len]);
        Ok(len)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Hands out one byte per read, after an initial `Interrupted`.
pub(crate) struct Trickle {
    reader: Cursor<Vec<u8>>,
    interrupted: bool,
}

impl Trickle {
    pub(crate) fn new(data: Vec<u8>) -> Self {
        Self {
            reader: Cursor::new(data),
            interrupted: false,
        }
    }
}

impl Read for Trickle {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if !self.interrupted {
            self.interrupted = true;
            return Err(ErrorKind::Interrupted.into());
        }
        let len = buf.len().min(1);
        self.reader.read(&mut buf[..len])
    }
}
