//! Streaming Parquet sink for decoded rows.

use std::{fs::File, path::Path, sync::Arc};

use arrow::array::{
    ArrayRef, StringBuilder, TimestampMicrosecondBuilder, UInt16Builder, UInt32Builder,
    UInt64Builder, UInt8Builder,
};
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::codec::{Codec, Value};
use crate::error::{Error, Result};
use crate::feed::Feed;
use crate::row::Row;
use crate::schema::feed_schema;

/// One Arrow builder per message column, chosen by the column's codec.
enum ColumnBuilder {
    U8(UInt8Builder),
    U16(UInt16Builder),
    U32(UInt32Builder),
    U64(UInt64Builder),
    Text(StringBuilder),
}

impl ColumnBuilder {
    fn for_codec(codec: Codec) -> Self {
        match codec {
            Codec::U16 => ColumnBuilder::U16(UInt16Builder::new()),
            Codec::U32 => ColumnBuilder::U32(UInt32Builder::new()),
            Codec::U64 | Codec::U48 => ColumnBuilder::U64(UInt64Builder::new()),
            Codec::Char => ColumnBuilder::U8(UInt8Builder::new()),
            Codec::Ascii(_) => ColumnBuilder::Text(StringBuilder::new()),
        }
    }

    fn append(&mut self, value: Option<&Value>) {
        // The feed table fixes one codec per column, so the value variant
        // always matches the builder variant.
        match (self, value) {
            (ColumnBuilder::U8(b), Some(Value::U8(v))) => b.append_value(*v),
            (ColumnBuilder::U16(b), Some(Value::U16(v))) => b.append_value(*v),
            (ColumnBuilder::U32(b), Some(Value::U32(v))) => b.append_value(*v),
            (ColumnBuilder::U64(b), Some(Value::U64(v))) => b.append_value(*v),
            (ColumnBuilder::Text(b), Some(Value::Text(v))) => b.append_value(v),
            (ColumnBuilder::U8(b), None) => b.append_null(),
            (ColumnBuilder::U16(b), None) => b.append_null(),
            (ColumnBuilder::U32(b), None) => b.append_null(),
            (ColumnBuilder::U64(b), None) => b.append_null(),
            (ColumnBuilder::Text(b), None) => b.append_null(),
            _ => unreachable!("decoded value does not match its column type"),
        }
    }

    fn finish(&mut self) -> ArrayRef {
        match self {
            ColumnBuilder::U8(b) => Arc::new(b.finish()),
            ColumnBuilder::U16(b) => Arc::new(b.finish()),
            ColumnBuilder::U32(b) => Arc::new(b.finish()),
            ColumnBuilder::U64(b) => Arc::new(b.finish()),
            ColumnBuilder::Text(b) => Arc::new(b.finish()),
        }
    }
}

/// Buffers rows column-wise and writes them to a Parquet file in row groups
/// of a fixed size.
///
/// Rows are appended in arrival order and never reordered. [`close`]
/// (Self::close) must be called to flush the final partial row group.
pub struct ParquetSink {
    writer: ArrowWriter<File>,
    schema: Arc<Schema>,
    pcap_index: UInt64Builder,
    pcap_timestamp: TimestampMicrosecondBuilder,
    session: StringBuilder,
    message_sequence: UInt64Builder,
    message_index: UInt16Builder,
    message_type: UInt8Builder,
    columns: Vec<ColumnBuilder>,
    buffered: usize,
    row_group_size: usize,
}

impl ParquetSink {
    /// Creates the output file and writer for `feed`.
    ///
    /// # Errors
    /// Returns [`Error::UnopenableOutput`] if the file cannot be created, or
    /// a Parquet error if the writer rejects the schema.
    pub fn create(path: impl AsRef<Path>, feed: &Feed, row_group_size: usize) -> Result<Self> {
        let file = File::create(path.as_ref()).map_err(|source| Error::UnopenableOutput {
            path: path.as_ref().to_owned(),
            source,
        })?;
        let schema = Arc::new(feed_schema(feed));
        let props = WriterProperties::builder()
            .set_max_row_group_size(row_group_size)
            .build();
        let writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;
        Ok(Self {
            writer,
            schema,
            pcap_index: UInt64Builder::new(),
            pcap_timestamp: TimestampMicrosecondBuilder::new(),
            session: StringBuilder::new(),
            message_sequence: UInt64Builder::new(),
            message_index: UInt16Builder::new(),
            message_type: UInt8Builder::new(),
            columns: feed
                .fields
                .iter()
                .map(|def| ColumnBuilder::for_codec(def.codec))
                .collect(),
            buffered: 0,
            row_group_size,
        })
    }

    /// Appends one row, flushing a row group when the buffer fills.
    ///
    /// # Errors
    /// Returns a Parquet/Arrow error if a row group fails to write.
    pub fn append(&mut self, row: &Row) -> Result<()> {
        self.pcap_index.append_value(row.pcap_index);
        self.pcap_timestamp.append_value(row.pcap_timestamp);
        self.session.append_value(&row.session);
        self.message_sequence.append_value(row.message_sequence);
        self.message_index.append_value(row.message_index);
        self.message_type.append_value(row.message_type);
        for (builder, value) in self.columns.iter_mut().zip(row.values()) {
            builder.append(value.as_ref());
        }
        self.buffered += 1;
        if self.buffered == self.row_group_size {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.buffered == 0 {
            return Ok(());
        }
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(self.schema.fields().len());
        arrays.push(Arc::new(self.pcap_index.finish()));
        arrays.push(Arc::new(self.pcap_timestamp.finish()));
        arrays.push(Arc::new(self.session.finish()));
        arrays.push(Arc::new(self.message_sequence.finish()));
        arrays.push(Arc::new(self.message_index.finish()));
        arrays.push(Arc::new(self.message_type.finish()));
        for builder in &mut self.columns {
            arrays.push(builder.finish());
        }
        let batch = RecordBatch::try_new(self.schema.clone(), arrays)?;
        self.writer.write(&batch)?;
        self.buffered = 0;
        Ok(())
    }

    /// Flushes the final row group and closes the Parquet file.
    ///
    /// # Errors
    /// Returns a Parquet/Arrow error if the flush or footer write fails.
    pub fn close(mut self) -> Result<()> {
        self.flush()?;
        self.writer.close()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Value;
    use crate::feeds::nasdaq;

    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use parquet::file::reader::{FileReader, SerializedFileReader};

    fn sample_row(index: u64) -> Row {
        let mut row = Row::new(&nasdaq::FEED);
        row.pcap_index = index;
        row.pcap_timestamp = 1_000_000;
        row.session = "SESSION001".to_owned();
        row.message_sequence = 100 + index;
        row.message_index = 1;
        row.message_type = b'S';
        row.set(nasdaq::col::STOCK_LOCATE, Value::U16(0));
        row.set(nasdaq::col::TRACKING_NUMBER, Value::U16(0));
        row.set(nasdaq::col::TIMESTAMP, Value::U64(57_600));
        row.set(nasdaq::col::EVENT_CODE, Value::U8(b'O'));
        row
    }

    #[test]
    fn test_row_groups_cut_at_configured_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grouped.parquet");
        let mut sink = ParquetSink::create(&path, &nasdaq::FEED, 2).unwrap();
        for i in 1..=5 {
            sink.append(&sample_row(i)).unwrap();
        }
        sink.close().unwrap();

        let reader = SerializedFileReader::new(File::open(&path).unwrap()).unwrap();
        let metadata = reader.metadata();
        assert_eq!(metadata.file_metadata().num_rows(), 5);
        let sizes: Vec<_> = metadata
            .row_groups()
            .iter()
            .map(|rg| rg.num_rows())
            .collect();
        assert_eq!(sizes, vec![2, 2, 1]);
    }

    #[test]
    fn test_written_values_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.parquet");
        let mut sink = ParquetSink::create(&path, &nasdaq::FEED, 1000).unwrap();
        sink.append(&sample_row(1)).unwrap();
        sink.close().unwrap();

        let mut reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap())
            .unwrap()
            .build()
            .unwrap();
        let batch = reader.next().unwrap().unwrap();
        assert_eq!(batch.num_rows(), 1);
        assert_eq!(
            batch.num_columns(),
            crate::schema::FRAMING_COLUMNS + nasdaq::FIELDS.len()
        );

        use arrow::array::{StringArray, UInt64Array, UInt8Array};
        let index = batch
            .column(0)
            .as_any()
            .downcast_ref::<UInt64Array>()
            .unwrap();
        assert_eq!(index.value(0), 1);
        let session = batch
            .column(2)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(session.value(0), "SESSION001");
        let event_code = batch
            .column(crate::schema::FRAMING_COLUMNS + nasdaq::col::EVENT_CODE)
            .as_any()
            .downcast_ref::<UInt8Array>()
            .unwrap();
        assert_eq!(event_code.value(0), b'O');
        // A column the message does not carry stays null.
        let price = batch.column(crate::schema::FRAMING_COLUMNS + nasdaq::col::PRICE);
        assert!(price.is_null(0));
    }
}
