//! FM24CL64B EEPROM driver
//!
//! Driver for the FM24CL64B 64-Kbit serial EEPROM on I2C, built on the Embus
//! transport capability. The driver is bus agnostic: it consumes any
//! [`I2cBus`](embus_driver::i2c::I2cBus) implementation — a peripheral
//! binding or a test double — by exclusive borrow, and formats the device's
//! wire traffic itself (two-byte big-endian memory address, page-aligned
//! write bursts).
//!
//! Up to eight chips share a bus through the A2..A0 address pins; the driver
//! resolves the slave address from the wired select value via
//! [`DeviceSelect`](embus_core::DeviceSelect) at construction.
//!
//! A device in the middle of an internal write cycle does not acknowledge its
//! address. The driver absorbs that window by retrying not-acknowledged
//! transfers a bounded number of times with a fixed backoff before surfacing
//! [`BusError::DeviceBusy`]; every other bus failure propagates immediately.
//! Nothing here blocks without bound and nothing panics on bus failure.
#![no_std]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

mod config;
mod driver;

pub use config::Config;
pub use driver::Fm24cl64b;

use embus_core::{Address, BusError};

/// Device family address: `1010` in the upper nibble, select bits below.
pub const BASE_ADDR: Address = Address::new(0b101_0000).unwrap();

/// First valid memory address.
pub const START_ADDR: u16 = 0x0000;

/// Last valid memory address.
pub const END_ADDR: u16 = 0x1fff;

/// Write page alignment unit in bytes.
pub const PAGE_SIZE: usize = 32;

/// Total device capacity in bytes.
pub const CAPACITY: usize = 8192;

/// EEPROM operation failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Offset or length falls outside the device memory. The bus is never
    /// touched for such a request.
    OutOfRange,
    /// The transport reported a protocol failure.
    Bus(BusError),
}

impl From<BusError> for Error {
    fn from(err: BusError) -> Self {
        Error::Bus(err)
    }
}

/// Paged EEPROM capability
///
/// The abstraction device consumers should depend on; [`Fm24cl64b`] is the
/// concrete implementation. Offsets are relative to [`START_ADDR`].
#[allow(async_fn_in_trait)]
pub trait Eeprom {
    /// Reads `buffer.len()` bytes starting at `offset`.
    async fn read(&mut self, offset: u16, buffer: &mut [u8]) -> Result<(), Error>;

    /// Writes `data` starting at `offset`, splitting at page boundaries.
    async fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), Error>;
}
