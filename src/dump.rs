//! A bus that writes down what it is given instead of sending it
//!
//! Every byte becomes a `0x%02x ` token, six per line, so one line holds one
//! command (or one row of the reset sequence). A `#0x27` style line marks the
//! target address whenever it changes.

use std::{fmt, io::Write};

use embedded_hal::i2c::{self, ErrorKind, ErrorType, I2c, Operation, SevenBitAddress};

use crate::error::{Error, Result};

const TOKENS_PER_LINE: usize = 6;

/// Records bytes to any [`Write`] sink
pub struct DumpBus<W: Write> {
    sink: W,
    address: Option<u8>,
    written: usize,
    line_len: usize,
}

impl<W: Write> DumpBus<W> {
    /// Record into `sink`
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            address: None,
            written: 0,
            line_len: 0,
        }
    }

    /// Number of bytes recorded so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// End the last line, flush, and hand the sink back
    pub fn finish(mut self) -> Result<W> {
        if self.line_len != 0 {
            writeln!(self.sink).map_err(|source| Error::CloseFailed { source })?;
        }
        self.sink
            .flush()
            .map_err(|source| Error::CloseFailed { source })?;
        Ok(self.sink)
    }

    fn record(&mut self, address: u8, bytes: &[u8]) -> std::io::Result<()> {
        if self.address != Some(address) {
            if self.line_len != 0 {
                writeln!(self.sink)?;
                self.line_len = 0;
            }
            writeln!(self.sink, "#0x{address:02x}")?;
            self.address = Some(address);
        }

        for byte in bytes {
            write!(self.sink, "0x{byte:02x} ")?;
            self.written += 1;
            self.line_len += 1;
            if self.line_len == TOKENS_PER_LINE {
                writeln!(self.sink)?;
                self.line_len = 0;
            }
        }

        Ok(())
    }
}

/// Why a dump bus refused an operation
#[derive(Debug)]
pub enum DumpError {
    /// the sink failed
    Io(std::io::Error),
    /// the display is write-only, nothing can be read back from a dump
    Read,
}

impl fmt::Display for DumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "dump sink failed: {err}"),
            Self::Read => write!(f, "cannot read from a dump"),
        }
    }
}

impl std::error::Error for DumpError {}

impl i2c::Error for DumpError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl<W: Write> ErrorType for DumpBus<W> {
    type Error = DumpError;
}

impl<W: Write> I2c<SevenBitAddress> for DumpBus<W> {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for operation in operations {
            match operation {
                Operation::Write(bytes) => self.record(address, *bytes).map_err(DumpError::Io)?,
                Operation::Read(_) => return Err(DumpError::Read),
            }
        }
        Ok(())
    }
}
