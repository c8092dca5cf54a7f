//! Conversion of raw firmware images into Memory Initialization Files for
//! a 512 x 32-bit block RAM.

mod converter;
mod err;
mod records;
mod test_mocks;

pub use converter::{convert_file, FirmwareImage, MifWriter, StartAddress, WordRange};
pub use err::Error;
pub use records::{TOTAL_SIZE, WORD_SIZE, WORD_WIDTH};
