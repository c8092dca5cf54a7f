#![allow(clippy::missing_errors_doc)]

mod utils;

pub use mif::{convert_file, StartAddress, WordRange};
pub use utils::{parse_addr, parse_start_address, CommonArgs};
