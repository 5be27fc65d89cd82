//! Arrow schema construction for a feed's output table.

use arrow::datatypes::{DataType, Field, Schema, TimeUnit};

use crate::codec::Codec;
use crate::feed::Feed;

/// Number of framing columns preceding the message fields.
pub const FRAMING_COLUMNS: usize = 6;

/// Arrow type used to store values of `codec`.
pub fn arrow_type(codec: Codec) -> DataType {
    match codec {
        Codec::U16 => DataType::UInt16,
        Codec::U32 => DataType::UInt32,
        Codec::U64 | Codec::U48 => DataType::UInt64,
        Codec::Char => DataType::UInt8,
        Codec::Ascii(_) => DataType::Utf8,
    }
}

/// Builds the output schema for `feed`: the six required framing columns
/// followed by the feed's message columns, each nullable.
pub fn feed_schema(feed: &Feed) -> Schema {
    let mut fields = vec![
        Field::new("pcap_index", DataType::UInt64, false),
        Field::new(
            "pcap_timestamp",
            DataType::Timestamp(TimeUnit::Microsecond, None),
            false,
        ),
        Field::new("session", DataType::Utf8, false),
        Field::new("message_sequence", DataType::UInt64, false),
        Field::new("message_index", DataType::UInt16, false),
        Field::new("message_type", DataType::UInt8, false),
    ];
    for def in feed.fields {
        fields.push(Field::new(def.name, arrow_type(def.codec), true));
    }
    Schema::new(fields)
}
