use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use img2mif::{convert_file, parse_start_address, CommonArgs, StartAddress};
use tracing::info;

/// Convert a raw firmware image into a Memory Initialization File.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Word-aligned byte address of the first image word
    #[arg(value_name = "START_ADDRESS", value_parser = parse_start_address)]
    start: StartAddress,

    /// Raw binary image to convert
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// MIF file to create or overwrite
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.common.init_logger();

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        start = args.start.word_index(),
        "Converting"
    );
    convert_file(args.start, &args.input, &args.output).with_context(|| {
        format!(
            "Failed to convert {} into {}",
            args.input.display(),
            args.output.display()
        )
    })?;

    Ok(())
}
