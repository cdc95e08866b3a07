use embedded_hal::{
    delay::DelayNs,
    i2c::{Error as _, I2c},
};
use tracing::trace;

use crate::{
    command::{Command, State, BACKLIGHT_BIT, ENABLE_BIT, RW_BIT},
    config::{BusAddress, Timing},
    error::{Error, Result},
    sender::SendCommand,
    utils::BitOps,
};

/// Sender for a PCF8574 adapter board
///
/// Every bus byte is its own single byte I2C write, followed by the byte settle delay.
pub struct I2cSender<'a, I2cLcd: I2c> {
    i2c: &'a mut I2cLcd,
    addr: u8,
    byte_settle_ms: u32,
    backlight: State,
}

impl<'a, I2cLcd: I2c> I2cSender<'a, I2cLcd> {
    /// Borrow a bus, and talk to `addr` on it with the default timing
    pub fn new(i2c: &'a mut I2cLcd, addr: BusAddress) -> Self {
        Self::with_timing(i2c, addr, Timing::default())
    }

    /// Same as [`I2cSender::new()`], with an explicit settle delay
    pub fn with_timing(i2c: &'a mut I2cLcd, addr: BusAddress, timing: Timing) -> Self {
        Self {
            i2c,
            addr: addr.get(),
            byte_settle_ms: timing.byte_settle_ms,
            backlight: State::On,
        }
    }

    fn write_byte(&mut self, byte: u8, delayer: &mut impl DelayNs) -> Result<()> {
        self.i2c
            .write(self.addr, &[byte])
            .map_err(|err| Error::BusWriteFailed {
                byte,
                kind: err.kind(),
            })?;
        trace!("i2c write 0x{byte:02x}");
        delayer.delay_ms(self.byte_settle_ms);
        Ok(())
    }
}

impl<'a, I2cLcd: I2c, Delayer: DelayNs> SendCommand<Delayer> for I2cSender<'a, I2cLcd> {
    fn send(&mut self, command: Command, delayer: &mut Delayer) -> Result<()> {
        let I2cSeq(seq) = I2cRawData::from(command).with_backlight(self.backlight);

        for byte in seq {
            self.write_byte(byte, delayer)?;
        }

        Ok(())
    }

    fn send_raw(&mut self, byte: u8, delayer: &mut Delayer) -> Result<()> {
        self.write_byte(byte, delayer)
    }

    fn get_backlight(&self) -> State {
        self.backlight
    }
}

/// The two nibbles of a command, each in the upper half, with mode bits in the lower half
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct I2cRawData(u8, u8);

impl From<Command> for I2cRawData {
    fn from(command: Command) -> Self {
        let mode = command.get_register_selection().mode_bits();
        let value = command.get_data();

        I2cRawData(mode | (value & 0xF0), mode | ((value << 4) & 0xF0))
    }
}

impl I2cRawData {
    fn with_backlight(self, backlight: State) -> I2cSeq {
        let mut seq = [0u8; 6];

        for (pulse, nibble) in seq.chunks_exact_mut(3).zip([self.0, self.1]) {
            let mut disable = nibble;
            disable.clear_bit(ENABLE_BIT);
            disable.clear_bit(RW_BIT);
            if backlight == State::On {
                disable.set_bit(BACKLIGHT_BIT);
            }
            let mut enable = disable;
            enable.set_bit(ENABLE_BIT);

            pulse.copy_from_slice(&[disable, enable, disable]);
        }

        I2cSeq(seq)
    }
}

/// Bus bytes for one command: data, enable high, enable low, for each nibble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct I2cSeq([u8; 6]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        command::{CommandSet, RegisterSelection},
        utils::BitState,
    };
    use embedded_hal_mock::eh1::{
        delay::NoopDelay,
        i2c::{Mock as I2cMock, Transaction as I2cTransaction},
    };

    fn encode(value: u8, rs: RegisterSelection) -> [u8; 6] {
        let I2cSeq(seq) = I2cRawData::from(Command::new(rs, value)).with_backlight(State::On);
        seq
    }

    // a nibble is latched on the falling edge: keep the byte seen while enable was high
    fn latched(seq: &[u8; 6]) -> Vec<u8> {
        seq.windows(2)
            .filter(|pair| {
                pair[0].check_bit(ENABLE_BIT) == BitState::Set
                    && pair[1].check_bit(ENABLE_BIT) == BitState::Clear
            })
            .map(|pair| pair[0] & !(1 << ENABLE_BIT) & !(1 << BACKLIGHT_BIT))
            .collect()
    }

    #[test]
    fn command_byte_encoding() {
        assert_eq!(
            encode(0x80, RegisterSelection::Command),
            [0x88, 0x8C, 0x88, 0x08, 0x0C, 0x08]
        );
        assert_eq!(
            encode(b'h', RegisterSelection::Data),
            [0x69, 0x6D, 0x69, 0x89, 0x8D, 0x89]
        );
    }

    #[test]
    fn every_byte_and_mode_round_trips_through_enable_pulses() {
        for rs in [RegisterSelection::Command, RegisterSelection::Data] {
            let mode = rs.mode_bits();
            for value in 0..=u8::MAX {
                let seq = encode(value, rs);
                assert_eq!(
                    latched(&seq),
                    vec![mode | (value & 0xF0), mode | ((value << 4) & 0xF0)]
                );
                assert!(seq
                    .iter()
                    .all(|byte| byte.check_bit(BACKLIGHT_BIT) == BitState::Set));
                assert!(seq
                    .iter()
                    .all(|byte| byte.check_bit(RW_BIT) == BitState::Clear));
            }
        }
    }

    #[test]
    fn send_writes_six_single_bytes() {
        let expectations = [0x08, 0x0C, 0x08, 0x18, 0x1C, 0x18]
            .map(|byte| I2cTransaction::write(0x27, vec![byte]));
        let mut i2c = I2cMock::new(&expectations);
        let mut delayer = NoopDelay::new();

        let mut sender = I2cSender::new(&mut i2c, BusAddress::default());
        sender
            .send(CommandSet::ClearDisplay.into(), &mut delayer)
            .unwrap();
        assert_eq!(
            SendCommand::<NoopDelay>::get_backlight(&sender),
            State::On
        );

        i2c.done();
    }

    #[test]
    fn failed_byte_stops_the_command() {
        let expectations = [
            I2cTransaction::write(0x27, vec![0x08]),
            I2cTransaction::write(0x27, vec![0x0C])
                .with_error(embedded_hal::i2c::ErrorKind::Other),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut delayer = NoopDelay::new();

        let mut sender = I2cSender::new(&mut i2c, BusAddress::default());
        let err = sender
            .send(CommandSet::ClearDisplay.into(), &mut delayer)
            .unwrap_err();
        assert!(matches!(err, Error::BusWriteFailed { byte: 0x0C, .. }));

        i2c.done();
    }

    #[test]
    fn raw_bytes_go_out_untouched() {
        let expectations = [I2cTransaction::write(0x3F, vec![0x38])];
        let mut i2c = I2cMock::new(&expectations);
        let mut delayer = NoopDelay::new();

        let mut sender = I2cSender::new(&mut i2c, BusAddress::new(0x3F).unwrap());
        sender.send_raw(0x38, &mut delayer).unwrap();

        i2c.done();
    }
}
