//! Display description and timing, validated when built

use std::fmt;

use crate::error::{Error, Result};

/// Narrowest display this driver accepts
pub const MIN_COLUMNS: u8 = 16;
/// Widest display this driver accepts
pub const MAX_COLUMNS: u8 = 80;
/// Bus most single board computers expose on their header
pub const DEFAULT_DEVICE: &str = "/dev/i2c-1";
/// Address most PCF8574 backpacks ship with
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// How many visible rows the display has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCount {
    /// 1 row
    One,
    /// 2 rows
    Two,
    /// 4 rows
    #[default]
    Four,
}

impl LineCount {
    /// Row count as a number
    pub fn get(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
        }
    }
}

impl TryFrom<u8> for LineCount {
    type Error = Error;

    fn try_from(lines: u8) -> Result<Self> {
        match lines {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            4 => Ok(Self::Four),
            other => Err(Error::InvalidLineCount(other)),
        }
    }
}

impl fmt::Display for LineCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// 7-bit I2C target address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusAddress(u8);

impl BusAddress {
    /// Check that `address` fits in 7 bits
    pub fn new(address: u8) -> Result<Self> {
        if address > 0x7F {
            return Err(Error::AddressRejected {
                address,
                source: None,
            });
        }
        Ok(Self(address))
    }

    /// Raw address
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for BusAddress {
    fn default() -> Self {
        Self(DEFAULT_ADDRESS)
    }
}

impl fmt::Display for BusAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}", self.0)
    }
}

/// Shape and address of the display, fixed once the driver is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayGeometry {
    lines: LineCount,
    columns: u8,
    address: BusAddress,
}

impl DisplayGeometry {
    /// Validate a geometry
    ///
    /// Columns must lie in `16..=80`. On 4 row displays rows 3 and 4 start
    /// `columns` cells after rows 1 and 2, and their base command must still fit
    /// in a byte, which stops them at 63 columns.
    pub fn new(lines: LineCount, columns: u8, address: BusAddress) -> Result<Self> {
        let invalid = || Error::InvalidColumns {
            columns,
            lines: lines.get(),
        };

        if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&columns) {
            return Err(invalid());
        }

        if lines == LineCount::Four && 0xC0u8.checked_add(columns).is_none() {
            return Err(invalid());
        }

        Ok(Self {
            lines,
            columns,
            address,
        })
    }

    /// Visible rows
    pub fn lines(&self) -> LineCount {
        self.lines
    }

    /// Visible cells per row
    pub fn columns(&self) -> u8 {
        self.columns
    }

    /// Target address of the I2C adapter
    pub fn address(&self) -> BusAddress {
        self.address
    }
}

/// Settle delays, in milliseconds
///
/// Both default to 50 ms, far above what the controller asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// wait after every byte put on the bus
    pub byte_settle_ms: u32,
    /// extra wait after every complete command or character
    pub command_settle_ms: u32,
}

impl Timing {
    /// Delay used for both settle points unless told otherwise
    pub const DEFAULT_SETTLE_MS: u32 = 50;

    /// No waiting at all, for doubles that don't need it
    pub const fn none() -> Self {
        Self {
            byte_settle_ms: 0,
            command_settle_ms: 0,
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            byte_settle_ms: Self::DEFAULT_SETTLE_MS,
            command_settle_ms: Self::DEFAULT_SETTLE_MS,
        }
    }
}
