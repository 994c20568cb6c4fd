//! Production transport binding over `embedded-hal-async`
//!
//! Wraps any `embedded-hal-async` I2C master in the Embus transport
//! capability, folding the open-ended HAL error surface into the closed
//! [`BusError`] taxonomy. Mock transports do not need this module: test
//! doubles implement [`I2cBus`] directly.

use embedded_hal_async::i2c::{Error as HalError, ErrorKind, I2c};

use crate::i2c::{Address, BusError, Direction, I2cBus, Message};

/// Adapter implementing [`I2cBus`] for an `embedded-hal-async` I2C master.
pub struct Hal<T>(pub T);

impl<T> Hal<T> {
    pub fn new(bus: T) -> Self {
        Self(bus)
    }

    pub fn release(self) -> T {
        self.0
    }
}

impl<T: I2c> I2cBus for Hal<T> {
    async fn send<const N: usize>(&mut self, message: &Message<N>) -> Result<(), BusError> {
        debug_assert_eq!(message.direction(), Direction::Write);

        trace!("i2c send: addr={=u8:x} len={=usize}", message.address().into_u8(), message.length());
        self.0
            .write(message.address().into_u8(), message)
            .await
            .map_err(map_err)
    }

    async fn receive(&mut self, address: Address, buffer: &mut [u8]) -> Result<(), BusError> {
        trace!("i2c receive: addr={=u8:x} len={=usize}", address.into_u8(), buffer.len());
        self.0
            .read(address.into_u8(), buffer)
            .await
            .map_err(map_err)
    }
}

fn map_err<E: HalError>(err: E) -> BusError {
    match err.kind() {
        ErrorKind::NoAcknowledge(_) => BusError::NoAck,
        ErrorKind::ArbitrationLoss => BusError::ArbitrationLost,
        _ => BusError::BusTimeout,
    }
}
