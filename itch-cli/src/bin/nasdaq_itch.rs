//! Converts NASDAQ TotalView-ITCH 5.0 pcap captures to Parquet.

fn main() -> anyhow::Result<()> {
    itch_cli::run(&itch::feeds::nasdaq::FEED)
}
