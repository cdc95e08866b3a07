//! Linux host transport: `/dev/i2c-*` nodes through linux-embedded-hal
//!
//! [`open()`] binds the target address as soon as the node is opened, so a target
//! the kernel refuses (for example one claimed by a kernel driver) fails before
//! anything is written. The descriptor is released when the [`I2cdev`] is dropped,
//! which cannot report a failure.

use std::{fs, os::unix::fs::FileTypeExt, path::Path};

use tracing::debug;

pub use linux_embedded_hal::{Delay, I2cdev};

use crate::{
    config::BusAddress,
    error::{Error, Result},
};

/// Open an I2C bus device node and bind `address` on it
///
/// The node must exist and be a character device before it is opened.
pub fn open(path: impl AsRef<Path>, address: BusAddress) -> Result<I2cdev> {
    let path = path.as_ref();
    let unavailable = |source: Box<dyn std::error::Error + Send + Sync>| Error::DeviceUnavailable {
        path: path.to_owned(),
        source,
    };

    let metadata = fs::metadata(path).map_err(|err| unavailable(err.into()))?;
    if !metadata.file_type().is_char_device() {
        return Err(unavailable("not a character device".into()));
    }

    let mut bus = I2cdev::new(path).map_err(|err| unavailable(err.into()))?;
    debug!(path = %path.display(), "opened i2c bus");

    bus.set_slave_address(u16::from(address.get()))
        .map_err(|err| Error::AddressRejected {
            address: address.get(),
            source: Some(err.into()),
        })?;
    debug!(%address, "bound i2c target");

    Ok(bus)
}
