//! A crate for converting captured MoldUDP64/ITCH market-data traffic into
//! Parquet tables.
//!
//! The pipeline reads a pcap capture of Ethernet/IPv4/UDP frames, strips the
//! MoldUDP64 downstream framing, decodes every ITCH message against a
//! per-feed catalog, and writes one wide, sparse row per message into a
//! single Parquet file. Two feed flavors are built in: NASDAQ
//! TotalView-ITCH 5.0 ([`feeds::nasdaq`]) and JNX PTS-ITCH 1.6
//! ([`feeds::jnx`]).
//!
//! The core is single-threaded and synchronous; [`convert`] drives the whole
//! pipeline and [`read::dump`] renders a written file back as
//! comma-separated text for round-trip verification.

pub mod codec;
pub mod convert;
pub mod demux;
pub mod error;
pub mod feed;
pub mod feeds;
pub mod mold;
pub mod pcap;
pub mod read;
pub mod row;
pub mod schema;
pub mod write;

pub use crate::convert::{convert, Options, Summary, DEFAULT_ROW_GROUP_SIZE};
pub use crate::error::{Error, Result};
pub use crate::feed::Feed;
