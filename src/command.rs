//! Controller commands and the bit layout of the I2C adapter
//!
//! The PCF8574 expander drives the controller's pins as:
//!
//! P7 -> P0
//! DB7/DB6/DB5/DB4/BL/EN/RW/RS

use crate::utils::BitOps;

/// Register select, set for character data
pub const RS_BIT: u8 = 0;
/// Read/write select, always clear: this driver never reads back
pub const RW_BIT: u8 = 1;
/// Enable line, the controller latches the data nibble on its falling edge
pub const ENABLE_BIT: u8 = 2;
/// Backlight transistor
pub const BACKLIGHT_BIT: u8 = 3;

/// Wake-up sequence for a PCF8574 backed controller
///
/// Each row already is a complete pair of enable pulses as they go on the bus,
/// backlight included. Sent verbatim, in order, when a reset is requested.
pub const RESET_SEQUENCE: [[u8; 6]; 10] = [
    [0x08, 0x0c, 0x08, 0x38, 0x3c, 0x38],
    [0x08, 0x0c, 0x08, 0x38, 0x3c, 0x38],
    [0x08, 0x0c, 0x08, 0x38, 0x3c, 0x38],
    [0x08, 0x0c, 0x08, 0x28, 0x2c, 0x28],
    [0x28, 0x2c, 0x28, 0x88, 0x8c, 0x88],
    [0x08, 0x0c, 0x08, 0xc8, 0xcc, 0xc8],
    [0x08, 0x0c, 0x08, 0x18, 0x1c, 0x18],
    [0x08, 0x0c, 0x08, 0x68, 0x6c, 0x68],
    [0x08, 0x0c, 0x08, 0x18, 0x1c, 0x18],
    [0x08, 0x0c, 0x08, 0x28, 0x2c, 0x28],
];

/// Padding written after short text
pub const BLANK: u8 = b' ';

/// The commands this driver issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSet {
    /// Clear the whole display
    ClearDisplay,
    /// Move cursor and display window back to the origin
    ReturnHome,
    /// Move the cursor, the argument is a full "set DDRAM address" byte
    SetDDRAM(u8),
    /// Put a character at the cursor
    WriteDataToRAM(u8),
}

/// Which controller register a byte goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterSelection {
    /// Instruction register
    #[default]
    Command,
    /// Data register
    Data,
}

impl RegisterSelection {
    /// The bits this selection puts on the low half of every bus byte
    pub fn mode_bits(self) -> u8 {
        let mut bits = 0u8;
        if self == Self::Data {
            bits.set_bit(RS_BIT);
        }
        bits
    }
}

/// On/off switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// Switched off
    Off,
    /// Switched on
    #[default]
    On,
}

/// One logical byte for the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    rs: RegisterSelection,
    data: u8,
}

impl Command {
    /// Build a command from its raw parts
    pub fn new(rs: RegisterSelection, data: u8) -> Self {
        Self { rs, data }
    }

    /// Register the byte goes to
    pub fn get_register_selection(&self) -> RegisterSelection {
        self.rs
    }

    /// The byte itself
    pub fn get_data(&self) -> u8 {
        self.data
    }
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        match command {
            CommandSet::ClearDisplay => Self::new(RegisterSelection::Command, 0b0000_0001),

            CommandSet::ReturnHome => Self::new(RegisterSelection::Command, 0b0000_0010),

            CommandSet::SetDDRAM(addr) => {
                let mut raw_bits = addr;
                raw_bits.set_bit(7);
                Self::new(RegisterSelection::Command, raw_bits)
            }

            CommandSet::WriteDataToRAM(data) => Self::new(RegisterSelection::Data, data),
        }
    }
}
