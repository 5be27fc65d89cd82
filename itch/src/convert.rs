//! The conversion driver: pcap records in, Parquet rows out.

use std::path::PathBuf;

use log::{info, warn};

use crate::codec::Cursor;
use crate::demux::{self, FrameSkip};
use crate::error::Result;
use crate::feed::Feed;
use crate::mold;
use crate::pcap::PcapReader;
use crate::row::Row;
use crate::write::ParquetSink;

/// Default number of rows per Parquet row group.
pub const DEFAULT_ROW_GROUP_SIZE: usize = 1000;

/// Conversion options.
#[derive(Debug, Clone)]
pub struct Options {
    /// Input capture file.
    pub pcap_file: PathBuf,
    /// Output Parquet file.
    pub parquet_file: PathBuf,
    /// Rows per Parquet row group.
    pub row_group_size: usize,
}

impl Options {
    /// Creates options with the default row group size.
    pub fn new(pcap_file: impl Into<PathBuf>, parquet_file: impl Into<PathBuf>) -> Self {
        Self {
            pcap_file: pcap_file.into(),
            parquet_file: parquet_file.into(),
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }
}

/// Counters kept across one conversion.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// pcap records processed, whether or not they yielded rows.
    pub packets: u64,
    /// Rows written to the Parquet file.
    pub rows: u64,
    /// Frames (or MoldUDP64 payloads) dropped because parsing ran past the
    /// captured bytes.
    pub truncated_frames: u64,
    /// Frames without IPv4/UDP carriage within the permitted shim depth.
    pub foreign_frames: u64,
    /// Messages whose type has no catalog entry.
    pub unknown_messages: u64,
    /// Messages whose declared layout width disagreed with the MoldUDP64
    /// length field.
    pub length_mismatches: u64,
}

/// Converts the capture in `options.pcap_file` to a Parquet table at
/// `options.parquet_file`, one row per catalogued ITCH message.
///
/// Rows are emitted in capture order: ascending pcap record, then ascending
/// message index within the packet. The sink is closed (flushing the final
/// row group) before the capture handle is dropped.
///
/// # Errors
/// Returns an error if either file cannot be opened, if the capture is not
/// a pcap file, or if the Parquet writer fails. Per-frame and per-message
/// problems are counted in the returned [`Summary`] instead.
pub fn convert(feed: &Feed, options: &Options) -> Result<Summary> {
    let mut reader = PcapReader::from_file(&options.pcap_file)?;
    let mut sink = ParquetSink::create(&options.parquet_file, feed, options.row_group_size)?;
    let mut row = Row::new(feed);
    let mut summary = Summary::default();

    while let Some(frame) = reader.next_frame()? {
        summary.packets += 1;
        row.pcap_index += 1;
        row.pcap_timestamp = frame.timestamp;

        let payload = match demux::udp_payload(frame.data) {
            Ok(payload) => payload,
            Err(FrameSkip::Truncated) => {
                summary.truncated_frames += 1;
                continue;
            }
            Err(FrameSkip::NotUdp) => {
                summary.foreign_frames += 1;
                continue;
            }
        };

        let Some(packet) = mold::Packet::parse(payload) else {
            summary.truncated_frames += 1;
            continue;
        };
        row.session.clear();
        row.session.push_str(&packet.session);
        row.message_index = 0;

        for body in packet.blocks() {
            row.message_index += 1;
            row.message_sequence = packet.sequence + u64::from(row.message_index) - 1;
            if body.is_empty() {
                warn!("empty message block in packet {}; skipping", row.pcap_index);
                summary.length_mismatches += 1;
                continue;
            }
            row.message_type = body[0];

            let Some(layout) = feed.layout(row.message_type) else {
                summary.unknown_messages += 1;
                continue;
            };
            if feed.message_len(layout) != body.len() {
                warn!(
                    "message type {} declares {} bytes but block carries {}; skipping",
                    row.message_type as char,
                    feed.message_len(layout),
                    body.len(),
                );
                summary.length_mismatches += 1;
                continue;
            }

            row.reset();
            let mut cursor = Cursor::new(&body[1..]);
            for &column in layout {
                row.set(column, feed.fields[column].codec.decode(&mut cursor));
            }
            sink.append(&row)?;
            summary.rows += 1;
        }
    }

    sink.close()?;
    info!(
        "{}: {} packets -> {} rows ({} truncated, {} foreign, {} unknown, {} mismatched)",
        feed.name,
        summary.packets,
        summary.rows,
        summary.truncated_frames,
        summary.foreign_frames,
        summary.unknown_messages,
        summary.length_mismatches,
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::{jnx, nasdaq};

    use std::fs::File;
    use std::io::Write as _;

    use arrow::array::{Array, StringArray, UInt16Array, UInt64Array, UInt8Array};
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use crate::schema::FRAMING_COLUMNS;

    fn mold_packet(session: &[u8; 10], sequence: u64, count: u16, bodies: &[&[u8]]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(session);
        out.extend_from_slice(&sequence.to_be_bytes());
        out.extend_from_slice(&count.to_be_bytes());
        for body in bodies {
            out.extend_from_slice(&(body.len() as u16).to_be_bytes());
            out.extend_from_slice(body);
        }
        out
    }

    fn ethernet_udp_frame(payload: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; 12];
        out.extend_from_slice(&0x0800u16.to_be_bytes());
        let mut ip = [0u8; 20];
        ip[0] = 0x45;
        ip[9] = 17;
        out.extend_from_slice(&ip);
        out.extend_from_slice(&[0, 0, 0, 0]);
        out.extend_from_slice(&((8 + payload.len()) as u16).to_be_bytes());
        out.extend_from_slice(&[0, 0]);
        out.extend_from_slice(payload);
        out
    }

    fn pcap_file(dir: &tempfile::TempDir, frames: &[(u32, Vec<u8>)]) -> PathBuf {
        let path = dir.path().join("capture.pcap");
        let mut out = Vec::new();
        out.extend_from_slice(&0xA1B2_C3D4u32.to_le_bytes());
        out.extend_from_slice(&0x0002_0004u32.to_le_bytes());
        out.extend_from_slice(&[0u8; 8]);
        out.extend_from_slice(&0xFFFFu32.to_le_bytes());
        out.extend_from_slice(&1u32.to_le_bytes());
        for (sec, frame) in frames {
            out.extend_from_slice(&sec.to_le_bytes());
            out.extend_from_slice(&0u32.to_le_bytes());
            out.extend_from_slice(&(frame.len() as u32).to_le_bytes());
            out.extend_from_slice(&(frame.len() as u32).to_le_bytes());
            out.extend_from_slice(frame);
        }
        File::create(&path).unwrap().write_all(&out).unwrap();
        path
    }

    fn nasdaq_order_delete(order_reference_number: u64) -> Vec<u8> {
        let mut body = vec![b'D'];
        body.extend_from_slice(&1u16.to_be_bytes());
        body.extend_from_slice(&0u16.to_be_bytes());
        body.extend_from_slice(&[0, 0, 0, 0, 0, 1]);
        body.extend_from_slice(&order_reference_number.to_be_bytes());
        body
    }

    #[test]
    fn test_known_and_unknown_messages_in_one_packet() {
        let dir = tempfile::tempdir().unwrap();
        let delete = nasdaq_order_delete(0x0100);
        let unknown = vec![0x7A, 1, 2, 3];
        let payload = mold_packet(b"SESSION001", 500, 2, &[&delete, &unknown]);
        let pcap = pcap_file(&dir, &[(10, ethernet_udp_frame(&payload))]);

        let parquet = dir.path().join("out.parquet");
        let options = Options::new(&pcap, &parquet);
        let summary = convert(&nasdaq::FEED, &options).unwrap();

        assert_eq!(summary.packets, 1);
        assert_eq!(summary.rows, 1);
        assert_eq!(summary.unknown_messages, 1);
        assert_eq!(summary.length_mismatches, 0);

        let mut reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&parquet).unwrap())
            .unwrap()
            .build()
            .unwrap();
        let batch = reader.next().unwrap().unwrap();
        assert_eq!(batch.num_rows(), 1);
        let index = batch
            .column(4)
            .as_any()
            .downcast_ref::<UInt16Array>()
            .unwrap();
        assert_eq!(index.value(0), 1);
        let sequence = batch
            .column(3)
            .as_any()
            .downcast_ref::<UInt64Array>()
            .unwrap();
        assert_eq!(sequence.value(0), 500);
        let order_ref = batch
            .column(FRAMING_COLUMNS + nasdaq::col::ORDER_REFERENCE_NUMBER)
            .as_any()
            .downcast_ref::<UInt64Array>()
            .unwrap();
        assert_eq!(order_ref.value(0), 0x0100);
    }

    #[test]
    fn test_heartbeat_advances_pcap_index_without_rows() {
        let dir = tempfile::tempdir().unwrap();
        let heartbeat = mold_packet(b"SESSION001", 7, 0, &[]);
        let delete = nasdaq_order_delete(42);
        let data = mold_packet(b"SESSION001", 7, 1, &[&delete]);
        let pcap = pcap_file(
            &dir,
            &[
                (1, ethernet_udp_frame(&heartbeat)),
                (2, ethernet_udp_frame(&data)),
            ],
        );

        let parquet = dir.path().join("out.parquet");
        let summary = convert(&nasdaq::FEED, &Options::new(&pcap, &parquet)).unwrap();
        assert_eq!(summary.packets, 2);
        assert_eq!(summary.rows, 1);

        let mut reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&parquet).unwrap())
            .unwrap()
            .build()
            .unwrap();
        let batch = reader.next().unwrap().unwrap();
        let pcap_index = batch
            .column(0)
            .as_any()
            .downcast_ref::<UInt64Array>()
            .unwrap();
        // The row from the second record still carries pcap_index 2.
        assert_eq!(pcap_index.value(0), 2);
    }

    #[test]
    fn test_length_mismatch_skips_block_but_not_packet() {
        let dir = tempfile::tempdir().unwrap();
        // An order-delete body with one byte lopped off, then a valid one.
        let mut short = nasdaq_order_delete(1);
        short.pop();
        let valid = nasdaq_order_delete(2);
        let payload = mold_packet(b"SESSION001", 10, 2, &[&short, &valid]);
        let pcap = pcap_file(&dir, &[(1, ethernet_udp_frame(&payload))]);

        let parquet = dir.path().join("out.parquet");
        let summary = convert(&nasdaq::FEED, &Options::new(&pcap, &parquet)).unwrap();
        assert_eq!(summary.rows, 1);
        assert_eq!(summary.length_mismatches, 1);

        let mut reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&parquet).unwrap())
            .unwrap()
            .build()
            .unwrap();
        let batch = reader.next().unwrap().unwrap();
        let sequence = batch
            .column(3)
            .as_any()
            .downcast_ref::<UInt64Array>()
            .unwrap();
        // The surviving row is the second block: sequence 11, index 2.
        assert_eq!(sequence.value(0), 11);
        let index = batch
            .column(4)
            .as_any()
            .downcast_ref::<UInt16Array>()
            .unwrap();
        assert_eq!(index.value(0), 2);
    }

    #[test]
    fn test_non_udp_frame_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut tcp_frame = ethernet_udp_frame(&[]);
        tcp_frame[14 + 9] = 6; // rewrite the IPv4 protocol to TCP
        let delete = nasdaq_order_delete(5);
        let data = mold_packet(b"SESSION001", 1, 1, &[&delete]);
        let pcap = pcap_file(&dir, &[(1, tcp_frame), (2, ethernet_udp_frame(&data))]);

        let parquet = dir.path().join("out.parquet");
        let summary = convert(&nasdaq::FEED, &Options::new(&pcap, &parquet)).unwrap();
        assert_eq!(summary.packets, 2);
        assert_eq!(summary.foreign_frames, 1);
        assert_eq!(summary.rows, 1);
    }

    #[test]
    fn test_jnx_timestamp_then_trading_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut seconds = vec![b'T'];
        seconds.extend_from_slice(&34_200u32.to_be_bytes());
        let mut state = vec![b'H'];
        state.extend_from_slice(&123u32.to_be_bytes());
        state.extend_from_slice(&1301u32.to_be_bytes());
        state.extend_from_slice(b"JPN ");
        state.push(b'C');
        let payload = mold_packet(b"JNX0000001", 900, 2, &[&seconds, &state]);
        let pcap = pcap_file(&dir, &[(1, ethernet_udp_frame(&payload))]);

        let parquet = dir.path().join("out.parquet");
        let summary = convert(&jnx::FEED, &Options::new(&pcap, &parquet)).unwrap();
        assert_eq!(summary.rows, 2);

        let mut reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&parquet).unwrap())
            .unwrap()
            .build()
            .unwrap();
        let batch = reader.next().unwrap().unwrap();
        assert_eq!(batch.num_rows(), 2);

        let seconds_col = batch
            .column(FRAMING_COLUMNS + jnx::col::TIMESTAMP_SECONDS)
            .as_any()
            .downcast_ref::<arrow::array::UInt32Array>()
            .unwrap();
        assert_eq!(seconds_col.value(0), 34_200);
        assert!(seconds_col.is_null(1));

        let group = batch
            .column(FRAMING_COLUMNS + jnx::col::GROUP)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert!(group.is_null(0));
        assert_eq!(group.value(1), "JPN");

        let state_col = batch
            .column(FRAMING_COLUMNS + jnx::col::TRADING_STATE)
            .as_any()
            .downcast_ref::<UInt8Array>()
            .unwrap();
        assert_eq!(state_col.value(1), b'C');

        let sequence = batch
            .column(3)
            .as_any()
            .downcast_ref::<UInt64Array>()
            .unwrap();
        assert_eq!(sequence.value(0), 900);
        assert_eq!(sequence.value(1), 901);
    }
}
