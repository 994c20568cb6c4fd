use embassy_time::Timer;
use embus_core::DeviceSelect;
use embus_driver::i2c::{Address, BusError, I2cBus, Message};

use crate::{Config, Eeprom, Error, BASE_ADDR, CAPACITY, PAGE_SIZE, START_ADDR};

// two-byte memory address plus one page
const MESSAGE_CAPACITY: usize = 2 + PAGE_SIZE;

/// FM24CL64B driver bound to an injected bus transport
///
/// Constructed once per physical chip with the wired A2..A0 select value.
/// The driver keeps no state across calls beyond its configuration: each
/// call formats its messages, pushes them through the transport, and maps
/// the outcome onto [`Error`].
pub struct Fm24cl64b<'a, B: I2cBus> {
    bus: &'a mut B,
    address: Address,
    config: Config,
}

impl<'a, B: I2cBus> Fm24cl64b<'a, B> {
    pub fn new(bus: &'a mut B, select: u8, config: Config) -> Self {
        Self {
            bus,
            address: DeviceSelect::new(BASE_ADDR, select).address(),
            config,
        }
    }

    /// The resolved slave address of this chip.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sequential read from the device's internal address pointer.
    ///
    /// The pointer advances with every read and wraps at the end of memory;
    /// [`Eeprom::read`] sets it explicitly first.
    pub async fn read_current(&mut self, buffer: &mut [u8]) -> Result<(), Error> {
        self.bus.receive(self.address, buffer).await?;
        Ok(())
    }

    /// Sets the device's internal address pointer without transferring data.
    async fn point_to(&mut self, offset: u16) -> Result<(), Error> {
        let message = unwrap!(Message::<2>::write(
            self.address,
            &(START_ADDR + offset).to_be_bytes(),
        ));
        self.send_with_retry(&message).await
    }

    /// Transmits one message, absorbing the device's write-cycle window.
    ///
    /// A not-acknowledged transfer is attempted again after a fixed backoff,
    /// up to `max_retries` total attempts; exhaustion surfaces `DeviceBusy`.
    /// Other bus failures propagate on the first occurrence.
    async fn send_with_retry<const N: usize>(
        &mut self,
        message: &Message<N>,
    ) -> Result<(), Error> {
        let mut attempt = 1;
        loop {
            match self.bus.send(message).await {
                Ok(()) => return Ok(()),
                Err(BusError::NoAck) if attempt < self.config.max_retries => {
                    trace!(
                        "fm24cl64b: no ack, attempt {=u8}/{=u8}",
                        attempt,
                        self.config.max_retries
                    );
                    attempt += 1;
                    Timer::after(self.config.retry_backoff).await;
                }
                Err(BusError::NoAck) => {
                    warn!("fm24cl64b: still busy after {=u8} attempts", attempt);
                    return Err(Error::Bus(BusError::DeviceBusy));
                }
                Err(err) => return Err(Error::Bus(err)),
            }
        }
    }
}

impl<'a, B: I2cBus> Eeprom for Fm24cl64b<'a, B> {
    async fn read(&mut self, offset: u16, buffer: &mut [u8]) -> Result<(), Error> {
        check_range(offset, buffer.len())?;
        self.point_to(offset).await?;
        self.read_current(buffer).await
    }

    async fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), Error> {
        check_range(offset, data.len())?;

        let mut addr = usize::from(offset);
        let mut remaining = data;
        while !remaining.is_empty() {
            // first chunk may be short to reach page alignment
            let chunk = (PAGE_SIZE - addr % PAGE_SIZE).min(remaining.len());
            let (page, rest) = remaining.split_at(chunk);

            let mut payload = [0; MESSAGE_CAPACITY];
            let mem_addr = START_ADDR + addr as u16;
            payload[..2].copy_from_slice(&mem_addr.to_be_bytes());
            payload[2..2 + chunk].copy_from_slice(page);

            let message = unwrap!(Message::<MESSAGE_CAPACITY>::write(
                self.address,
                &payload[..2 + chunk],
            ));
            self.send_with_retry(&message).await?;

            addr += chunk;
            remaining = rest;
        }
        Ok(())
    }
}

fn check_range(offset: u16, length: usize) -> Result<(), Error> {
    let offset = usize::from(offset);
    if offset >= CAPACITY || offset + length > CAPACITY {
        return Err(Error::OutOfRange);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range() {
        assert_eq!(check_range(0, CAPACITY), Ok(()));
        assert_eq!(check_range(0x1fff, 1), Ok(()));
        assert_eq!(check_range(0x1fff, 2), Err(Error::OutOfRange));
        assert_eq!(check_range(0x2000, 0), Err(Error::OutOfRange));
        assert_eq!(check_range(0xffff, 1), Err(Error::OutOfRange));
    }
}
