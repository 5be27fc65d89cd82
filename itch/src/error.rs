//! Error types for capture conversion.

use std::{io, path::PathBuf};

use thiserror::Error;

/// A fatal conversion error. Recoverable conditions (truncated frames,
/// unknown message types, catalog length mismatches) never surface here;
/// they are counted in [`Summary`](crate::convert::Summary) and processing
/// continues.
#[derive(Debug, Error)]
pub enum Error {
    /// An input file could not be opened.
    #[error("unable to open input file '{path}': {source}")]
    UnopenableInput {
        /// Path passed to the reader.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },
    /// The output file could not be created.
    #[error("unable to open output file '{path}': {source}")]
    UnopenableOutput {
        /// Path passed to the writer.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },
    /// The capture file is not a classic-pcap file.
    #[error("malformed capture file: {0}")]
    BadCapture(&'static str),
    /// Reading the capture or writing the text dump failed at the OS level.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The Parquet writer or reader reported a failure.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    /// Building or consuming an Arrow record batch failed.
    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    /// A read-back column did not have the type the feed schema declares.
    #[error("unexpected column type for '{0}'")]
    ColumnType(&'static str),
}

/// Alias for a `Result` with [`enum@Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
