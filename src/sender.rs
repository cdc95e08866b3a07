//! Built-in sender
//! If you want to create a new sender, you will need to implement [`SendCommand`] trait

use embedded_hal::delay::DelayNs;

use crate::{
    command::{Command, State},
    error::Result,
};

mod i2c_sender;

pub use i2c_sender::I2cSender;

/// [`SendCommand`] is the trait a sender should implement to communicate with the hardware
///
/// Every method blocks until the bytes are on the bus, and returns as soon as one of
/// them fails: a half sent nibble cannot be replayed safely, so nothing is retried.
pub trait SendCommand<Delayer: DelayNs> {
    /// Put a [`Command`] on the bus as two 4 bit transfers
    fn send(&mut self, command: Command, delayer: &mut Delayer) -> Result<()>;

    /// Put one byte on the bus exactly as given, bypassing the nibble encoding
    fn send_raw(&mut self, byte: u8, delayer: &mut Delayer) -> Result<()>;

    /// Send a command, then wait specific duration
    fn send_and_delay(
        &mut self,
        command: impl Into<Command>,
        delayer: &mut Delayer,
        delay_ms: u32,
    ) -> Result<()> {
        self.send(command.into(), delayer)?;
        delayer.delay_ms(delay_ms);
        Ok(())
    }

    /// Get the current backlight
    ///
    /// Note:
    /// If a driver doesn't drive a backlight, it reports the default
    fn get_backlight(&self) -> State {
        State::default()
    }
}
