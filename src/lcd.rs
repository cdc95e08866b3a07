//! The initialized display

use embedded_hal::delay::DelayNs;
use tracing::debug;

use crate::{
    command::{Command, CommandSet, RegisterSelection, State, BLANK},
    config::DisplayGeometry,
    error::{Error, Result},
    sender::SendCommand,
    state::LcdState,
};

/// A display ready to take text, built by [`Builder::init()`](crate::builder::Builder::init)
///
/// Calls must not be interleaved: one [`Lcd`] per bus, used from one place at a time.
pub struct Lcd<'a, 'b, Sender: SendCommand<Delayer>, Delayer: DelayNs> {
    sender: &'a mut Sender,
    delayer: &'b mut Delayer,
    state: LcdState,
    command_settle_ms: u32,
}

impl<'a, 'b, Sender: SendCommand<Delayer>, Delayer: DelayNs> Lcd<'a, 'b, Sender, Delayer> {
    pub(crate) fn new(
        sender: &'a mut Sender,
        delayer: &'b mut Delayer,
        state: LcdState,
        command_settle_ms: u32,
    ) -> Self {
        Self {
            sender,
            delayer,
            state,
            command_settle_ms,
        }
    }
}

impl<'a, 'b, Sender: SendCommand<Delayer>, Delayer: DelayNs> Lcd<'a, 'b, Sender, Delayer> {
    /// Shape and address the display was built with
    pub fn geometry(&self) -> &DisplayGeometry {
        self.state.get_geometry()
    }

    /// Base "set DDRAM address" command of each row, row 1 first
    pub fn row_addresses(&self) -> &[u8] {
        self.state.get_row_addresses().as_slice()
    }

    /// Backlight state, always on for this driver
    pub fn backlight(&self) -> State {
        self.state.get_backlight()
    }

    /// Send one byte to the command or data register, as two nibble transfers
    pub fn write_byte(&mut self, value: u8, rs: RegisterSelection) -> Result<()> {
        self.sender.send(Command::new(rs, value), self.delayer)
    }

    /// Replace the content of a row (1-based) with `text`
    ///
    /// Text longer than the row is cut, shorter text is padded with spaces,
    /// so exactly one row worth of cells is written.
    pub fn write_line(&mut self, text: impl AsRef<[u8]>, row: usize) -> Result<()> {
        self.put_line(text.as_ref(), row, true)
    }

    /// Like [`Lcd::write_line()`], but leave the cells after the text untouched
    pub fn write_text(&mut self, text: impl AsRef<[u8]>, row: usize) -> Result<()> {
        self.put_line(text.as_ref(), row, false)
    }

    /// Write a single character at a 1-based row and column
    ///
    /// Cells whose address does not fit the "set DDRAM address" command, such as
    /// the far end of row 2 on a display wider than 63 columns, are out of range.
    pub fn write_char_at(&mut self, byte: u8, row: usize, column: usize) -> Result<()> {
        let base = self.row_base(row)?;

        let columns = self.state.get_line_capacity();
        if column == 0 || column > columns as usize {
            return Err(Error::ColumnOutOfRange { column, columns });
        }

        // wide rows run past the last address a single command can reach
        let address = u8::try_from(column - 1)
            .ok()
            .and_then(|offset| base.checked_add(offset))
            .ok_or(Error::ColumnOutOfRange { column, columns })?;
        self.send_and_settle(CommandSet::SetDDRAM(address))?;
        self.send_and_settle(CommandSet::WriteDataToRAM(byte))
    }

    /// Blank the whole display and move the cursor home
    pub fn clear(&mut self) -> Result<()> {
        debug!("clearing display");
        self.send_and_settle(CommandSet::ClearDisplay)?;
        self.send_and_settle(CommandSet::ReturnHome)
    }

    /// Stop using the display and give the bus back
    ///
    /// The transport itself belongs to the caller, who closes it afterwards, so
    /// nothing can fail here. See [`DumpBus::finish()`](crate::dump::DumpBus::finish)
    /// for the only close that reports [`Error::CloseFailed`].
    pub fn shutdown(self) {
        debug!("display released");
    }

    fn put_line(&mut self, text: &[u8], row: usize, pad: bool) -> Result<()> {
        let base = self.row_base(row)?;

        let columns = self.state.get_line_capacity() as usize;
        let shown = &text[..text.len().min(columns)];
        let padding = if pad { columns - shown.len() } else { 0 };

        debug!(
            row,
            len = text.len(),
            written = shown.len(),
            padding,
            "writing line"
        );

        self.send_and_settle(CommandSet::SetDDRAM(base))?;

        for &byte in shown {
            self.send_and_settle(CommandSet::WriteDataToRAM(byte))?;
        }

        for _ in 0..padding {
            self.send_and_settle(CommandSet::WriteDataToRAM(BLANK))?;
        }

        Ok(())
    }

    fn row_base(&self, row: usize) -> Result<u8> {
        self.state
            .get_row_addresses()
            .get(row)
            .ok_or(Error::RowOutOfRange {
                row,
                rows: self.state.get_line_count(),
            })
    }

    fn send_and_settle(&mut self, command: CommandSet) -> Result<()> {
        self.sender
            .send_and_delay(command, self.delayer, self.command_settle_ms)
    }
}
