//! Shared driver for the per-feed converter binaries.

use std::{
    io::{self, BufWriter},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;

use itch::{Feed, Options};

/// Command-line arguments shared by both converter binaries.
#[derive(Debug, Parser)]
#[clap(version, about)]
pub struct Args {
    #[clap(help = "A pcap capture file to convert", value_name = "PCAP_FILE")]
    pub pcap_file: PathBuf,
    #[clap(
        default_value = "itch.parquet",
        help = "Where to write the Parquet table",
        value_name = "PARQUET_FILE"
    )]
    pub parquet_file: PathBuf,
    #[clap(
        long,
        default_value_t = itch::DEFAULT_ROW_GROUP_SIZE,
        help = "Rows per Parquet row group",
        value_name = "ROWS"
    )]
    pub row_group_size: usize,
}

impl Args {
    /// Turns the parsed arguments into conversion options.
    pub fn options(&self) -> Options {
        let mut options = Options::new(&self.pcap_file, &self.parquet_file);
        options.row_group_size = self.row_group_size;
        options
    }
}

/// Parses the command line, converts the capture, then dumps the written
/// Parquet file back to standard output.
///
/// # Errors
/// Returns an error if the conversion or the read-back fails; the binaries
/// surface it on stderr with a non-zero exit status.
pub fn run(feed: &Feed) -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let options = args.options();

    itch::convert(feed, &options)
        .with_context(|| format!("converting '{}'", options.pcap_file.display()))?;

    let mut out = BufWriter::new(io::stdout().lock());
    itch::read::dump(&options.parquet_file, feed, &mut out)
        .with_context(|| format!("reading back '{}'", options.parquet_file.display()))?;
    Ok(())
}
