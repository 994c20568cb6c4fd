//! I2C message framing and transport capability

pub use embus_core::{Address, BusError, DeviceSelect};

use crate::PayloadTooLarge;

/// Transfer direction as seen from the bus master.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Read,
    Write,
}

/// Wire-level I2C transfer with a payload bounded by `N`
///
/// A write message carries the actual bytes; a read message carries only the
/// requested length. The payload length never exceeds `N` (checked at
/// construction). Messages are value types: the caller copies them into the
/// transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Message<const N: usize> {
    address: Address,
    direction: Direction,
    length: usize,
    bytes: [u8; N],
}

impl<const N: usize> Message<N> {
    /// Creates a write transfer from a payload slice.
    pub fn write(address: Address, data: &[u8]) -> Result<Self, PayloadTooLarge> {
        if data.len() > N {
            return Err(PayloadTooLarge);
        }
        let mut bytes = [0; N];
        bytes[..data.len()].copy_from_slice(data);

        Ok(Self {
            address,
            direction: Direction::Write,
            length: data.len(),
            bytes,
        })
    }

    /// Creates a read transfer requesting `length` bytes.
    pub fn read(address: Address, length: usize) -> Result<Self, PayloadTooLarge> {
        if length > N {
            return Err(PayloadTooLarge);
        }
        Ok(Self {
            address,
            direction: Direction::Read,
            length,
            bytes: [0; N],
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub const fn capacity() -> usize {
        N
    }
}

impl<const N: usize> core::ops::Deref for Message<N> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.bytes[..self.length]
    }
}

impl<const N: usize> core::ops::DerefMut for Message<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.bytes[..self.length]
    }
}

/// I2C master transport capability
///
/// Device drivers are agnostic to whether the implementation is a real
/// peripheral binding or a mock. Both operations either complete or fail with
/// a [`BusError`]; neither blocks beyond the transport's own deadline.
///
/// A transport instance must not be shared between in-flight calls without
/// external serialization: drivers borrow it exclusively per call.
#[allow(async_fn_in_trait)]
pub trait I2cBus {
    /// Transmits one write-direction message.
    ///
    /// Read requests do not go through `send`: use [`I2cBus::receive`].
    async fn send<const N: usize>(&mut self, message: &Message<N>) -> Result<(), BusError>;

    /// Reads `buffer.len()` bytes from the device at `address`.
    async fn receive(&mut self, address: Address, buffer: &mut [u8]) -> Result<(), BusError>;
}
