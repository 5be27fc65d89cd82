//! Read-back of a written Parquet file as comma-separated text.
//!
//! Used after conversion to verify round-trip integrity: every column in
//! schema order, each value followed by a comma, one line per row.

use std::{fs::File, io::Write, path::Path};

use arrow::array::{
    Array, StringArray, TimestampMicrosecondArray, UInt16Array, UInt32Array, UInt64Array,
    UInt8Array,
};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use time::format_description::BorrowedFormatItem;
use time::OffsetDateTime;

use crate::codec::Codec;
use crate::error::{Error, Result};
use crate::feed::Feed;
use crate::schema::FRAMING_COLUMNS;

/// Renders a capture timestamp at second resolution in UTC.
fn fmt_pcap_timestamp(micros: i64) -> String {
    const TS_FORMAT: &[BorrowedFormatItem<'static>] =
        time::macros::format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    OffsetDateTime::from_unix_timestamp(micros.div_euclid(1_000_000))
        .map_err(|_| ())
        .and_then(|dt| dt.format(TS_FORMAT).map_err(|_| ()))
        .unwrap_or_else(|_| micros.to_string())
}

fn column<'a, T: 'static>(
    batch: &'a RecordBatch,
    index: usize,
    name: &'static str,
) -> Result<&'a T> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<T>()
        .ok_or(Error::ColumnType(name))
}

/// Reads the Parquet file at `path` back and writes one comma-terminated
/// line per row to `out`. Returns the number of rows dumped.
///
/// Absent optionals render as empty strings; character-coded columns (and
/// `message_type`) render as the literal ASCII character; `pcap_timestamp`
/// renders as `YYYY-MM-DD HH:MM:SS` in UTC.
///
/// # Errors
/// Returns [`Error::UnopenableInput`] if the file cannot be opened, a
/// Parquet/Arrow error if it cannot be decoded, and [`Error::ColumnType`]
/// if a column does not match the feed schema.
pub fn dump(path: impl AsRef<Path>, feed: &Feed, out: &mut impl Write) -> Result<u64> {
    let file = File::open(path.as_ref()).map_err(|source| Error::UnopenableInput {
        path: path.as_ref().to_owned(),
        source,
    })?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut rows = 0u64;
    for batch in reader {
        let batch = batch?;
        let pcap_index = column::<UInt64Array>(&batch, 0, "pcap_index")?;
        let pcap_timestamp = column::<TimestampMicrosecondArray>(&batch, 1, "pcap_timestamp")?;
        let session = column::<StringArray>(&batch, 2, "session")?;
        let message_sequence = column::<UInt64Array>(&batch, 3, "message_sequence")?;
        let message_index = column::<UInt16Array>(&batch, 4, "message_index")?;
        let message_type = column::<UInt8Array>(&batch, 5, "message_type")?;

        for i in 0..batch.num_rows() {
            write!(out, "{},", pcap_index.value(i))?;
            write!(out, "{},", fmt_pcap_timestamp(pcap_timestamp.value(i)))?;
            write!(out, "{},", session.value(i))?;
            write!(out, "{},", message_sequence.value(i))?;
            write!(out, "{},", message_index.value(i))?;
            out.write_all(&[message_type.value(i), b','])?;

            for (c, def) in feed.fields.iter().enumerate() {
                let col = FRAMING_COLUMNS + c;
                match def.codec {
                    Codec::Char => {
                        let array = column::<UInt8Array>(&batch, col, def.name)?;
                        if !array.is_null(i) {
                            out.write_all(&[array.value(i)])?;
                        }
                    }
                    Codec::U16 => {
                        let array = column::<UInt16Array>(&batch, col, def.name)?;
                        if !array.is_null(i) {
                            write!(out, "{}", array.value(i))?;
                        }
                    }
                    Codec::U32 => {
                        let array = column::<UInt32Array>(&batch, col, def.name)?;
                        if !array.is_null(i) {
                            write!(out, "{}", array.value(i))?;
                        }
                    }
                    Codec::U64 | Codec::U48 => {
                        let array = column::<UInt64Array>(&batch, col, def.name)?;
                        if !array.is_null(i) {
                            write!(out, "{}", array.value(i))?;
                        }
                    }
                    Codec::Ascii(_) => {
                        let array = column::<StringArray>(&batch, col, def.name)?;
                        if !array.is_null(i) {
                            write!(out, "{}", array.value(i))?;
                        }
                    }
                }
                out.write_all(b",")?;
            }
            out.write_all(b"\n")?;
            rows += 1;
        }
    }
    out.flush()?;
    Ok(rows)
}
