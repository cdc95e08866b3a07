//! Error type shared by every operation of the crate

use std::path::PathBuf;

use embedded_hal::i2c::ErrorKind;

/// Crate wide result alias
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while talking to the display
///
/// Only [`Error::CloseFailed`] is meant to be non-fatal: by the time a transport
/// is released, the display already holds its last write.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The bus device node is missing, is not a character device, or cannot be opened
    #[error("failed to open the i2c bus at {}", path.display())]
    DeviceUnavailable {
        /// device node that was requested
        path: PathBuf,
        /// underlying reason
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The target address is not 7-bit, or the bus refused to bind it
    #[error("cannot talk to i2c target 0x{address:02x}")]
    AddressRejected {
        /// rejected address
        address: u8,
        /// what the bus said, when it got that far
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A single byte did not make it onto the bus
    #[error("failed to write 0x{byte:02x} to the i2c bus: {kind}")]
    BusWriteFailed {
        /// byte that was being written
        byte: u8,
        /// error reported by the bus
        kind: ErrorKind,
    },

    /// Row number outside `1..=rows`
    #[error("row number must be between 1 and {rows}, got {row}")]
    RowOutOfRange {
        /// requested row, 1-based
        row: usize,
        /// configured row count
        rows: u8,
    },

    /// Column number outside `1..=columns`
    #[error("column number must be between 1 and {columns}, got {column}")]
    ColumnOutOfRange {
        /// requested column, 1-based
        column: usize,
        /// configured column count
        columns: u8,
    },

    /// Row count other than 1, 2 or 4
    #[error("row count can be 1, 2 or 4, got {0}")]
    InvalidLineCount(u8),

    /// Column count the controller cannot address with the given row count
    #[error("column count {columns} is not usable with {lines} rows")]
    InvalidColumns {
        /// requested column count
        columns: u8,
        /// configured row count
        lines: u8,
    },

    /// The transport could not be released cleanly
    #[error("failed to close the i2c bus")]
    CloseFailed {
        /// underlying reason
        #[source]
        source: std::io::Error,
    },

    /// The dump sink could not be written
    #[error("failed to write the byte dump")]
    Dump(#[source] std::io::Error),
}

impl Error {
    /// Whether the program outcome should change because of this error
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::CloseFailed { .. })
    }
}
