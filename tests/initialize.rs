mod common;

use simple_lcd::{
    builder::Builder,
    command::{State, RESET_SEQUENCE},
    config::{BusAddress, DisplayGeometry, LineCount, Timing},
    dump::DumpBus,
    sender::I2cSender,
    Error,
};

use common::{CountingDelay, RecordingBus};

fn geometry() -> DisplayGeometry {
    DisplayGeometry::new(LineCount::Two, 16, BusAddress::new(0x3F).unwrap()).unwrap()
}

#[test]
fn without_reset_nothing_is_sent() {
    let mut bus = RecordingBus::default();
    let mut delayer = CountingDelay::default();

    {
        let mut sender = I2cSender::new(&mut bus, geometry().address());
        let lcd = Builder::new(&mut sender, &mut delayer, geometry())
            .reset_sequence(false)
            .init()
            .unwrap();
        assert_eq!(lcd.backlight(), State::On);
        assert_eq!(lcd.geometry(), &geometry());
        assert_eq!(lcd.row_addresses(), &[0x80, 0xC0]);
        lcd.shutdown();
    }

    assert_eq!(bus.attempts, 0);
    assert!(delayer.ms.is_empty());
}

#[test]
fn reset_sequence_goes_out_verbatim_one_byte_at_a_time() {
    let mut bus = RecordingBus::default();
    let mut delayer = CountingDelay::default();

    {
        let mut sender = I2cSender::new(&mut bus, geometry().address());
        Builder::new(&mut sender, &mut delayer, geometry())
            .reset_sequence(true)
            .init()
            .unwrap();
    }

    let expected: Vec<(u8, Vec<u8>)> = RESET_SEQUENCE
        .iter()
        .flatten()
        .map(|&byte| (0x3F, vec![byte]))
        .collect();
    assert_eq!(bus.writes, expected);
    assert_eq!(delayer.ms, vec![50; 60]);
}

#[test]
fn reset_stops_at_the_first_failure() {
    for fail_at in [1, 2, 31, 60] {
        let mut bus = RecordingBus::failing_at(fail_at);
        let mut delayer = CountingDelay::default();

        let result = {
            let mut sender = I2cSender::new(&mut bus, geometry().address());
            Builder::new(&mut sender, &mut delayer, geometry())
                .reset_sequence(true)
                .init()
                .map(|lcd| lcd.shutdown())
        };

        let failed_byte = RESET_SEQUENCE.iter().flatten().nth(fail_at - 1).copied();
        match result {
            Err(Error::BusWriteFailed { byte, .. }) => assert_eq!(Some(byte), failed_byte),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(bus.attempts, fail_at);
        assert_eq!(bus.writes.len(), fail_at - 1);
        assert_eq!(delayer.ms.len(), fail_at - 1);
    }
}

#[test]
fn dump_bus_records_a_whole_session() {
    let mut bus = DumpBus::new(Vec::new());
    let mut delayer = CountingDelay::default();

    {
        let mut sender = I2cSender::with_timing(&mut bus, geometry().address(), Timing::none());
        let mut lcd = Builder::new(&mut sender, &mut delayer, geometry())
            .timing(Timing::none())
            .reset_sequence(true)
            .init()
            .unwrap();
        lcd.write_line("hello", 2).unwrap();
        lcd.shutdown();
    }

    assert_eq!(bus.written(), 60 + 17 * 6);
    let text = String::from_utf8(bus.finish().unwrap()).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "#0x3f");
    assert_eq!(lines[1], "0x08 0x0c 0x08 0x38 0x3c 0x38 ");
    // reset rows, then the position command for row 2
    assert_eq!(lines[11], "0xc8 0xcc 0xc8 0x08 0x0c 0x08 ");
    assert_eq!(lines.len(), 1 + 10 + 17);
}
