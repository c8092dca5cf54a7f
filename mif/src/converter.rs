use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::ops::RangeInclusive;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::err::Error;
use crate::records::{Content, Footer, Header, Padding, Record, TOTAL_SIZE, WORD_SIZE};

/// Word index of the first image word, validated against the memory geometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StartAddress(usize);

impl StartAddress {
    /// # Errors
    ///
    /// Will return `Err` if `addr` is not word-aligned or lies past the last word.
    pub fn from_byte_addr(addr: usize) -> Result<Self, Error> {
        if !addr.is_multiple_of(WORD_SIZE) {
            return Err(Error::InvalidArgument(format!(
                "start address must be word-aligned, got {addr:#x}"
            )));
        }
        let index = addr / WORD_SIZE;
        if index >= TOTAL_SIZE {
            return Err(Error::RangeOverflow { index });
        }
        Ok(Self(index))
    }

    #[must_use]
    pub fn word_index(self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for StartAddress {
    type Error = Error;

    fn try_from(addr: usize) -> Result<Self, Self::Error> {
        Self::from_byte_addr(addr)
    }
}

/// Words written by a conversion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WordRange {
    pub start: usize,
    pub len: usize,
}

impl WordRange {
    fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// First word index after the image.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Addresses covered by the zero fill, `None` once the image reaches the last word.
    #[must_use]
    pub fn padding(&self) -> Option<RangeInclusive<usize>> {
        (self.end() < TOTAL_SIZE).then(|| self.end()..=TOTAL_SIZE - 1)
    }

    fn check_fits(&self) -> Result<(), Error> {
        if self.end() > TOTAL_SIZE {
            return Err(Error::RangeOverflow {
                index: self.end() - 1,
            });
        }
        Ok(())
    }
}

pub struct MifWriter<W: Write> {
    writer: W,
}

impl MifWriter<BufWriter<File>> {
    /// # Errors
    ///
    /// Will return `Err` if the file cannot be created.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> MifWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, record: &impl Record) -> Result<(), Error> {
        record.write_record(&mut self.writer)
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }
}

pub struct FirmwareImage<R: Read> {
    reader: R,
    start: StartAddress,
}

impl FirmwareImage<BufReader<File>> {
    /// Opens an image file after checking that it is a whole number of words
    /// and fits in memory from `start`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the path cannot be accessed, or the image length
    /// is not word-aligned or overflows the memory.
    pub fn from_path(path: impl AsRef<Path>, start: StartAddress) -> Result<Self, Error> {
        let meta = fs::metadata(&path)?;
        let len = usize::try_from(meta.len())?;
        let extent = WordRange::new(start.word_index(), len / WORD_SIZE);
        if !len.is_multiple_of(WORD_SIZE) {
            return Err(Error::PartialWord {
                index: extent.end(),
                len: len % WORD_SIZE,
            });
        }
        extent.check_fits()?;
        let file = File::open(&path)?;
        Ok(Self::new(BufReader::new(file), start))
    }
}

impl<R: Read> FirmwareImage<R> {
    pub fn new(reader: R, start: StartAddress) -> Self {
        Self { reader, start }
    }

    #[must_use]
    pub fn start(&self) -> StartAddress {
        self.start
    }

    /// Streams the image into `mif` as a complete memory initialization file.
    ///
    /// # Errors
    ///
    /// Will return `Err` if reading or writing fails, if the image ends in a
    /// partial word, or if it runs past the last word of memory. Lines
    /// already written stay in the output.
    #[instrument(skip_all)]
    pub fn convert<W: Write>(&mut self, mif: &mut MifWriter<W>) -> Result<WordRange, Error> {
        mif.emit(&Header)?;

        let first = self.start.word_index();
        let mut index = first;
        let mut word = [0u8; WORD_SIZE];
        loop {
            match read_word(&mut self.reader, &mut word)? {
                0 => break,
                WORD_SIZE => {}
                len => return Err(Error::PartialWord { index, len }),
            }
            if index >= TOTAL_SIZE {
                return Err(Error::RangeOverflow { index });
            }
            let content = Content { index, word };
            debug!(index, value = content.value(), "Word");
            mif.emit(&content)?;
            index += 1;
        }

        let written = WordRange::new(first, index - first);
        if let Some(padding) = written.padding() {
            mif.emit(&Padding {
                start: *padding.start(),
            })?;
        }
        mif.emit(&Footer)?;
        mif.flush()?;

        info!(
            words = written.len,
            first = written.start,
            next_free = written.end(),
            "Converted"
        );
        Ok(written)
    }
}

/// Fills `buf` unless the reader runs dry, returning the number of bytes read.
fn read_word(reader: &mut impl Read, buf: &mut [u8; WORD_SIZE]) -> Result<usize, Error> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => {}
            Err(err) => return Err(err.into()),
        }
    }
    Ok(filled)
}

/// Converts the image at `input` into a MIF at `output`.
///
/// The image is validated before `output` is created, so a rejected image
/// leaves any existing output untouched.
///
/// # Errors
///
/// Will return `Err` if either path cannot be accessed or the image is rejected.
pub fn convert_file(
    start: StartAddress,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<WordRange, Error> {
    let mut image = FirmwareImage::from_path(input, start)?;
    let mut mif = MifWriter::from_path(output)?;
    image.convert(&mut mif)
}
