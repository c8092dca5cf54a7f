use anyhow::Result;
use mif::StartAddress;
use tracing::level_filters::LevelFilter;

struct AddrSuffix {
    suffix: char,
    multiplier: usize,
}

const ADDR_SUFFIXES: [AddrSuffix; 1] = [AddrSuffix {
    suffix: 'K',
    multiplier: 1024,
}];

/// Parses a byte address in decimal, `0x`, `0o` or `0b` notation (prefix in
/// either case), with an optional `K` multiplier.
///
/// # Errors
///
/// Will return `Err` if `arg` is not a non-negative integer literal.
pub fn parse_addr(arg: &str) -> Result<usize> {
    for addr_suffix in ADDR_SUFFIXES {
        if let Some(prefix) = arg.strip_suffix(addr_suffix.suffix) {
            let value = parse_literal(prefix)?;
            return value
                .checked_mul(addr_suffix.multiplier)
                .ok_or_else(|| anyhow::anyhow!("address {arg} is too large"));
        }
    }
    parse_literal(arg)
}

fn parse_literal(literal: &str) -> Result<usize> {
    // parse_int only knows lowercase radix prefixes; digits are case-insensitive.
    Ok(parse_int::parse::<usize>(&literal.to_ascii_lowercase())?)
}

/// # Errors
///
/// Will return `Err` if `arg` does not parse or is not a valid start address.
pub fn parse_start_address(arg: &str) -> Result<StartAddress> {
    Ok(StartAddress::from_byte_addr(parse_addr(arg)?)?)
}

#[derive(clap::Args, Debug)]
pub struct CommonArgs {
    /// Logging level. `Off` for silent operation.
    #[arg(short, long, default_value = "Info")]
    pub log_level: LevelFilter,
}

impl CommonArgs {
    pub fn init_logger(&self) {
        tracing_subscriber::fmt()
            .with_max_level(self.log_level)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_radix_prefixes() {
        assert_eq!(parse_addr("16").unwrap(), 16);
        assert_eq!(parse_addr("0x10").unwrap(), 16);
        assert_eq!(parse_addr("0o20").unwrap(), 16);
        assert_eq!(parse_addr("0b1_0000").unwrap(), 16);
    }

    #[test]
    fn parses_uppercase_radix_prefixes() {
        assert_eq!(parse_addr("0X10").unwrap(), 16);
        assert_eq!(parse_addr("0XfF").unwrap(), 255);
        assert_eq!(parse_addr("0B1_0000").unwrap(), 16);
        assert_eq!(parse_addr("0O20").unwrap(), 16);
        assert_eq!(parse_start_address("0X100").unwrap().word_index(), 64);
    }

    #[test]
    fn leading_zero_is_decimal() {
        assert_eq!(parse_addr("010").unwrap(), 10);
    }

    #[test]
    fn parses_size_suffixes() {
        assert_eq!(parse_addr("1K").unwrap(), 1024);
        assert_eq!(parse_addr("0x2K").unwrap(), 2048);
        assert_eq!(parse_addr("0X1K").unwrap(), 1024);
        assert!(parse_addr("1M").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_addr("").is_err());
        assert!(parse_addr("-4").is_err());
        assert!(parse_addr("0xzz").is_err());
    }

    #[test]
    fn start_address_must_be_aligned() {
        assert_eq!(parse_start_address("0x8").unwrap().word_index(), 2);
        let err = parse_start_address("6").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<mif::Error>(),
            Some(mif::Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn start_address_must_be_inside_memory() {
        assert_eq!(parse_start_address("2044").unwrap().word_index(), 511);
        assert!(parse_start_address("2K").is_err());
    }
}
