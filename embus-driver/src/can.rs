//! CAN message framing and transport capability

pub use embus_core::BusError;
pub use embedded_can::{ExtendedId, Id, StandardId};

use crate::PayloadTooLarge;

/// Classic CAN payload limit (DLC).
pub const MAX_DLC: usize = 8;

/// Nominal bit rate of the bus.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    Kbps125,
    Kbps200,
    Kbps250,
    Kbps500,
}

impl Speed {
    pub const fn bit_rate(self) -> u32 {
        match self {
            Speed::Kbps125 => 125_000,
            Speed::Kbps200 => 200_000,
            Speed::Kbps250 => 250_000,
            Speed::Kbps500 => 500_000,
        }
    }
}

/// Classic CAN frame
///
/// The identifier is standard (11-bit) or extended (29-bit). Data frames
/// carry up to [`MAX_DLC`] payload bytes; remote frames carry a requested
/// length and no data. The length never exceeds [`MAX_DLC`] (checked at
/// construction). Messages are value types: the caller copies them into the
/// transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    id: Id,
    remote: bool,
    length: usize,
    bytes: [u8; MAX_DLC],
}

impl Message {
    /// Creates a data frame from a payload slice.
    pub fn new(id: impl Into<Id>, data: &[u8]) -> Result<Self, PayloadTooLarge> {
        if data.len() > MAX_DLC {
            return Err(PayloadTooLarge);
        }
        let mut bytes = [0; MAX_DLC];
        bytes[..data.len()].copy_from_slice(data);

        Ok(Self {
            id: id.into(),
            remote: false,
            length: data.len(),
            bytes,
        })
    }

    /// Creates a remote frame requesting `length` bytes.
    pub fn remote(id: impl Into<Id>, length: usize) -> Result<Self, PayloadTooLarge> {
        if length > MAX_DLC {
            return Err(PayloadTooLarge);
        }
        Ok(Self {
            id: id.into(),
            remote: true,
            length,
            bytes: [0; MAX_DLC],
        })
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn is_extended(&self) -> bool {
        matches!(self.id, Id::Extended(_))
    }

    pub fn is_remote(&self) -> bool {
        self.remote
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Raw identifier bits, right-aligned.
    pub fn id_raw(&self) -> u32 {
        match self.id {
            Id::Standard(id) => id.as_raw().into(),
            Id::Extended(id) => id.as_raw(),
        }
    }
}

impl core::ops::Deref for Message {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.bytes[..self.length]
    }
}

impl core::ops::DerefMut for Message {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.bytes[..self.length]
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Message {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Message {{ id: {=u32:x}, ext: {=bool}, rtr: {=bool}, data: {=[u8]:x} }}",
            self.id_raw(),
            self.is_extended(),
            self.remote,
            &self.bytes[..self.length],
        )
    }
}

/// CAN transport capability
///
/// The same exclusivity contract as [`crate::i2c::I2cBus`] applies: one
/// in-flight call per transport instance.
#[allow(async_fn_in_trait)]
pub trait CanBus {
    /// Transmits one frame.
    async fn send(&mut self, message: &Message) -> Result<(), BusError>;

    /// Fetches the next received frame.
    async fn receive(&mut self) -> Result<Message, BusError>;
}
