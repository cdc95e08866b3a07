#![allow(dead_code)]

use embedded_hal::{
    delay::DelayNs,
    i2c::{ErrorKind, ErrorType, I2c, Operation, SevenBitAddress},
};

/// Bus that keeps every write, and can be told to fail on the Nth one (1-based)
#[derive(Debug, Default)]
pub struct RecordingBus {
    pub writes: Vec<(u8, Vec<u8>)>,
    pub attempts: usize,
    pub fail_at: Option<usize>,
}

impl RecordingBus {
    pub fn failing_at(attempt: usize) -> Self {
        Self {
            fail_at: Some(attempt),
            ..Self::default()
        }
    }

    /// All written bytes, in order
    pub fn bytes(&self) -> Vec<u8> {
        self.writes
            .iter()
            .flat_map(|(_, bytes)| bytes.iter().copied())
            .collect()
    }

    /// Logical bytes rebuilt from the enable pulses, with their register select bit
    pub fn decoded(&self) -> Vec<(u8, bool)> {
        let bytes = self.bytes();
        assert_eq!(bytes.len() % 6, 0, "partial command on the bus");
        bytes
            .chunks_exact(6)
            .map(|seq| ((seq[1] & 0xF0) | (seq[4] >> 4), seq[1] & 1 == 1))
            .collect()
    }

    /// Characters sent to the data register
    pub fn characters(&self) -> Vec<u8> {
        self.decoded()
            .into_iter()
            .filter(|(_, data)| *data)
            .map(|(byte, _)| byte)
            .collect()
    }
}

impl ErrorType for RecordingBus {
    type Error = ErrorKind;
}

impl I2c<SevenBitAddress> for RecordingBus {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    self.attempts += 1;
                    if self.fail_at == Some(self.attempts) {
                        return Err(ErrorKind::Bus);
                    }
                    self.writes.push((address, bytes.to_vec()));
                }
                Operation::Read(_) => panic!("the display is never read"),
            }
        }
        Ok(())
    }
}

/// Delay that only writes down what it was asked for
#[derive(Debug, Default)]
pub struct CountingDelay {
    pub ms: Vec<u32>,
}

impl CountingDelay {
    pub fn total_ms(&self) -> u64 {
        self.ms.iter().map(|&ms| u64::from(ms)).sum()
    }
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.ms.push(ms);
    }
}
