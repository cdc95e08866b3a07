/*!
# Simple LCD

Write one line of text to an HD44780 compatible character LCD, driven through a
PCF8574 I2C to parallel adapter in 4 bit mode.

Basic Usage:

1. Open a bus <br/>
    Anything implementing [`embedded_hal::i2c::I2c`] will do. On Linux,
    [`transport::open()`] gives a `/dev/i2c-*` bus, and [`dump::DumpBus`] records
    bytes instead of sending them.
<br/>
<br/>
2. Wrap the bus in a [`sender::I2cSender`], or any type implementing [`sender::SendCommand`]
<br/>
<br/>
3. Use [`builder::Builder`] to describe the display, and [`builder::Builder::init()`] to get a [`lcd::Lcd`]
<br/>
<br/>
4. Use [`lcd::Lcd::write_line()`] to print text, then [`lcd::Lcd::shutdown()`]
<br/>
<br/>
5. Close the bus yourself <br/>
    The driver only borrows it. [`Error::CloseFailed`] is only ever returned by
    [`dump::DumpBus::finish()`]; a Linux bus is closed by dropping it, which
    cannot fail visibly.
*/

#![warn(missing_docs)]

pub mod builder;
pub mod command;
pub mod config;
pub mod dump;
pub mod error;
pub mod lcd;
pub mod sender;
mod state;
#[cfg(target_os = "linux")]
pub mod transport;
pub mod utils;

pub use error::{Error, Result};
