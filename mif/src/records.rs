use std::io::Write;

use crate::err::Error;

/// Number of words in the target memory.
pub const TOTAL_SIZE: usize = 512;
/// Bytes per memory word.
pub const WORD_SIZE: usize = 4;
/// Bits per memory word.
pub const WORD_WIDTH: usize = WORD_SIZE * 8;

pub trait Record {
    fn write_record(&self, writer: &mut dyn Write) -> Result<(), Error>;
}

pub struct Header;

impl Record for Header {
    fn write_record(&self, writer: &mut dyn Write) -> Result<(), Error> {
        write!(
            writer,
            "\nWIDTH={WORD_WIDTH};\nDEPTH={TOTAL_SIZE};\n\nADDRESS_RADIX=UNS;\nDATA_RADIX=HEX;\n\nCONTENT BEGIN\n"
        )?;
        Ok(())
    }
}

/// One little-endian image word stored at `index`.
pub struct Content {
    pub index: usize,
    pub word: [u8; WORD_SIZE],
}

impl Content {
    pub fn value(&self) -> u32 {
        u32::from_le_bytes(self.word)
    }
}

impl Record for Content {
    fn write_record(&self, writer: &mut dyn Write) -> Result<(), Error> {
        writeln!(writer, "    {} : {:08x};", self.index, self.value())?;
        Ok(())
    }
}

/// Zero fill from `start` to the last address.
pub struct Padding {
    pub start: usize,
}

impl Record for Padding {
    fn write_record(&self, writer: &mut dyn Write) -> Result<(), Error> {
        writeln!(
            writer,
            "    [{}..{}] : {:08x};",
            self.start,
            TOTAL_SIZE - 1,
            0
        )?;
        Ok(())
    }
}

pub struct Footer;

impl Record for Footer {
    fn write_record(&self, writer: &mut dyn Write) -> Result<(), Error> {
        writer.write_all(b"END;\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(record: &impl Record) -> String {
        let mut out = vec![];
        record.write_record(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn header_is_byte_exact() {
        assert_eq!(
            render(&Header),
            "\nWIDTH=32;\nDEPTH=512;\n\nADDRESS_RADIX=UNS;\nDATA_RADIX=HEX;\n\nCONTENT BEGIN\n"
        );
    }

    #[test]
    fn content_swaps_bytes() {
        let line = render(&Content {
            index: 7,
            word: [0x01, 0x02, 0x03, 0x04],
        });
        assert_eq!(line, "    7 : 04030201;\n");
    }

    #[test]
    fn content_keeps_leading_zeros_lowercase() {
        let line = render(&Content {
            index: 0,
            word: [0xef, 0xbe, 0x00, 0x00],
        });
        assert_eq!(line, "    0 : 0000beef;\n");
    }

    #[test]
    fn padding_ends_at_last_address() {
        assert_eq!(render(&Padding { start: 2 }), "    [2..511] : 00000000;\n");
        assert_eq!(
            render(&Padding { start: 511 }),
            "    [511..511] : 00000000;\n"
        );
    }

    #[test]
    fn footer() {
        assert_eq!(render(&Footer), "END;\n");
    }
}
