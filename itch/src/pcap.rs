//! Reading classic-pcap (libpcap) capture files.

use std::{
    fs::File,
    io::{self, BufReader},
    path::Path,
};

use log::warn;

use crate::error::{Error, Result};

const MAGIC_MICROS: u32 = 0xA1B2_C3D4;
const MAGIC_NANOS: u32 = 0xA1B2_3C4D;
const GLOBAL_HEADER_LEN: usize = 24;
const RECORD_HEADER_LEN: usize = 16;

/// Upper bound on a sane captured-frame length. A record claiming more is
/// taken as file corruption and ends the capture.
const MAX_FRAME_LEN: usize = 256 * 1024;

/// One captured Ethernet frame.
#[derive(Debug)]
pub struct Frame<'a> {
    /// Capture timestamp in microseconds since the UNIX epoch.
    pub timestamp: i64,
    /// Raw frame bytes, starting at the Ethernet header.
    pub data: &'a [u8],
}

/// Streaming reader for classic-pcap capture files.
///
/// Handles both byte orders of the global-header magic and both the
/// microsecond and nanosecond timestamp flavors. Frames are yielded from an
/// internal buffer that is reused between records.
pub struct PcapReader<R: io::Read> {
    reader: R,
    little_endian: bool,
    nanos: bool,
    buffer: Vec<u8>,
}

impl PcapReader<BufReader<File>> {
    /// Opens the capture file at `path`.
    ///
    /// # Errors
    /// Returns [`Error::UnopenableInput`] if the file cannot be opened and
    /// [`Error::BadCapture`] if it does not start with a pcap global header.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|source| Error::UnopenableInput {
            path: path.as_ref().to_owned(),
            source,
        })?;
        Self::new(BufReader::new(file))
    }
}

impl<R: io::Read> PcapReader<R> {
    /// Creates a reader from `reader`, consuming the global header.
    ///
    /// # Errors
    /// Returns [`Error::BadCapture`] if the magic number is not a classic
    /// pcap magic, or an I/O error if the header cannot be read.
    pub fn new(mut reader: R) -> Result<Self> {
        let mut header = [0u8; GLOBAL_HEADER_LEN];
        reader.read_exact(&mut header)?;
        let magic = u32::from_le_bytes(header[..4].try_into().unwrap());
        let (little_endian, nanos) = match magic {
            MAGIC_MICROS => (true, false),
            MAGIC_NANOS => (true, true),
            _ => match magic.swap_bytes() {
                MAGIC_MICROS => (false, false),
                MAGIC_NANOS => (false, true),
                _ => return Err(Error::BadCapture("unrecognized pcap magic number")),
            },
        };
        Ok(Self {
            reader,
            little_endian,
            nanos,
            buffer: Vec::new(),
        })
    }

    fn read_u32(&self, bytes: &[u8]) -> u32 {
        let bytes = bytes.try_into().unwrap();
        if self.little_endian {
            u32::from_le_bytes(bytes)
        } else {
            u32::from_be_bytes(bytes)
        }
    }

    /// Reads the next frame, or `None` at end of capture.
    ///
    /// A record truncated mid-header or mid-frame is treated as the end of
    /// the capture, matching how an interrupted capture writer leaves files.
    ///
    /// # Errors
    /// Propagates OS-level read failures.
    pub fn next_frame(&mut self) -> Result<Option<Frame<'_>>> {
        let mut header = [0u8; RECORD_HEADER_LEN];
        match read_fully(&mut self.reader, &mut header)? {
            Fill::Empty => return Ok(None),
            Fill::Partial => {
                warn!("capture ends mid record header; stopping");
                return Ok(None);
            }
            Fill::Complete => {}
        }

        let ts_sec = i64::from(self.read_u32(&header[0..4]));
        let ts_frac = i64::from(self.read_u32(&header[4..8]));
        let incl_len = self.read_u32(&header[8..12]) as usize;
        if incl_len > MAX_FRAME_LEN {
            warn!("capture record claims {incl_len} bytes; stopping");
            return Ok(None);
        }

        self.buffer.resize(incl_len, 0);
        match read_fully(&mut self.reader, &mut self.buffer)? {
            Fill::Complete => {}
            Fill::Empty | Fill::Partial => {
                warn!("capture ends mid frame; stopping");
                return Ok(None);
            }
        }

        let micros = if self.nanos { ts_frac / 1000 } else { ts_frac };
        Ok(Some(Frame {
            timestamp: ts_sec * 1_000_000 + micros,
            data: &self.buffer,
        }))
    }
}

enum Fill {
    Complete,
    Partial,
    Empty,
}

/// Reads until `buf` is full, distinguishing a clean EOF at the first byte
/// from one in the middle of `buf`.
fn read_fully<R: io::Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<Fill> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Ok(if filled == 0 { Fill::Empty } else { Fill::Partial });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(Fill::Complete)
}
