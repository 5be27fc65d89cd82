//! The wide mutable row shared across all messages of a conversion.

use crate::codec::Value;
use crate::feed::Feed;

/// One output row: six framing slots plus the sparse union of message
/// fields for the feed.
///
/// The driver owns a single `Row` for the whole conversion. Framing slots
/// are overwritten per message (or per packet); message slots are cleared
/// by [`reset`](Self::reset) before each message is decoded, so a row only
/// ever carries the fields of the message type it was dispatched to.
#[derive(Debug)]
pub struct Row {
    /// 1-based index of the pcap record this message came from.
    pub pcap_index: u64,
    /// Capture timestamp in microseconds since the UNIX epoch.
    pub pcap_timestamp: i64,
    /// MoldUDP64 session identifier.
    pub session: String,
    /// Sequence number of this message.
    pub message_sequence: u64,
    /// 1-based index of this message within its packet.
    pub message_index: u16,
    /// One-byte message type tag.
    pub message_type: u8,
    values: Vec<Option<Value>>,
}

impl Row {
    /// Creates an empty row sized for `feed`.
    pub fn new(feed: &Feed) -> Self {
        Self {
            pcap_index: 0,
            pcap_timestamp: 0,
            session: String::new(),
            message_sequence: 0,
            message_index: 0,
            message_type: 0,
            values: vec![None; feed.fields.len()],
        }
    }

    /// Clears every message slot; framing slots are left alone.
    pub fn reset(&mut self) {
        for value in &mut self.values {
            *value = None;
        }
    }

    /// Stores a decoded value in message slot `column`.
    pub fn set(&mut self, column: usize, value: Value) {
        self.values[column] = Some(value);
    }

    /// Message slots in column order.
    pub fn values(&self) -> &[Option<Value>] {
        &self.values
    }
}
