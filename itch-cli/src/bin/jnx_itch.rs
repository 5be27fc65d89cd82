//! Converts JNX PTS-ITCH 1.6 pcap captures to Parquet.

fn main() -> anyhow::Result<()> {
    itch_cli::run(&itch::feeds::jnx::FEED)
}
