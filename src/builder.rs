//! Describe a display, then initialize it into a [`Lcd`]

use embedded_hal::delay::DelayNs;
use tracing::debug;

use crate::{
    command::RESET_SEQUENCE,
    config::{DisplayGeometry, Timing},
    error::Result,
    lcd::Lcd,
    sender::SendCommand,
    state::LcdState,
};

/// Collects what is needed to build a [`Lcd`]
///
/// A [`Builder`] is a display nobody wrote to yet. [`Builder::init()`] consumes it,
/// so a [`Lcd`] always has a computed row table behind it.
pub struct Builder<'a, 'b, Sender: SendCommand<Delayer>, Delayer: DelayNs> {
    sender: &'a mut Sender,
    delayer: &'b mut Delayer,
    geometry: DisplayGeometry,
    timing: Timing,
    reset: bool,
}

impl<'a, 'b, Sender: SendCommand<Delayer>, Delayer: DelayNs> Builder<'a, 'b, Sender, Delayer> {
    /// Start describing a display reached through `sender`
    pub fn new(sender: &'a mut Sender, delayer: &'b mut Delayer, geometry: DisplayGeometry) -> Self {
        Self {
            sender,
            delayer,
            geometry,
            timing: Timing::default(),
            reset: false,
        }
    }

    /// Settle delays used between commands
    ///
    /// Delays between single bus bytes belong to the sender.
    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Replay the controller wake-up sequence during [`Builder::init()`]
    pub fn reset_sequence(mut self, reset: bool) -> Self {
        self.reset = reset;
        self
    }

    /// Compute the row table and, when asked, wake the controller up
    ///
    /// The reset sequence is sent byte by byte, in order, and stops at the first
    /// bus failure.
    pub fn init(self) -> Result<Lcd<'a, 'b, Sender, Delayer>> {
        let state = LcdState::new(self.geometry);

        debug!(
            rows = %self.geometry.lines(),
            columns = self.geometry.columns(),
            address = %self.geometry.address(),
            row_addresses = ?state.get_row_addresses().as_slice(),
            "initializing display"
        );

        if self.reset {
            debug!("sending reset sequence");
            for byte in RESET_SEQUENCE.iter().flatten() {
                self.sender.send_raw(*byte, self.delayer)?;
            }
        }

        Ok(Lcd::new(
            self.sender,
            self.delayer,
            state,
            self.timing.command_settle_ms,
        ))
    }
}
