//! Embus core data types
//!
//! This crate provides basic data type definitions used by other Embus crates:
//! the bus error taxonomy, the 7-bit I2C slave address, and the chip-select
//! address encoding. Embus users should not depend on this crate directly.
//! Use the `embus::core` reexport instead.
#![no_std]

#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidValue;

/// Protocol-level bus failure reported by a transport.
///
/// Capacity and addressing errors are not bus errors. They are caller logic
/// errors and carry their own types next to the operations that produce them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// The addressed device did not acknowledge a byte.
    NoAck,
    /// The device kept not acknowledging for the whole bounded retry window.
    DeviceBusy,
    /// The transfer did not complete within the transport's own deadline.
    BusTimeout,
    /// Lost bus arbitration to another node (CAN).
    ArbitrationLost,
}

/// 7-bit I2C slave address
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Address(u8);

impl Address {
    const MAX_VALUE: u8 = 0x7f;
    pub const MAX: Address = Address(Self::MAX_VALUE);

    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::MAX_VALUE {
            Some(Self::from_u8_truncating(value))
        } else {
            None
        }
    }

    pub const fn from_u8_truncating(value: u8) -> Self {
        Self(value & Self::MAX_VALUE)
    }

    pub const fn into_u8(self) -> u8 {
        self.0
    }
}

impl From<Address> for u8 {
    fn from(value: Address) -> Self {
        value.into_u8()
    }
}

impl From<Address> for usize {
    fn from(value: Address) -> Self {
        u8::from(value).into()
    }
}

impl TryFrom<u8> for Address {
    type Error = InvalidValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidValue)
    }
}

/// Chip-select address encoding
///
/// Multi-chip device arrays share one address range: the device family claims
/// the upper bits of the 7-bit address and up to three hardware select pins
/// (A2, A1, A0) claim the lower bits. The encoding masks the select value to
/// its three reserved bit positions, so the family bits of the base address
/// are never overwritten.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceSelect {
    base: Address,
    select: u8,
}

impl DeviceSelect {
    const SELECT_MASK: u8 = 0b111;

    pub const fn new(base: Address, select: u8) -> Self {
        Self {
            base,
            select: select & Self::SELECT_MASK,
        }
    }

    /// Builds the select value from the wired state of the address pins.
    pub const fn from_pins(a2: bool, a1: bool, a0: bool) -> u8 {
        (a2 as u8) << 2 | (a1 as u8) << 1 | a0 as u8
    }

    /// The transmittable slave address: family bits of the base OR select bits.
    pub const fn address(self) -> Address {
        Address::from_u8_truncating(
            (self.base.into_u8() & !Self::SELECT_MASK) | self.select,
        )
    }

    /// Recovers the select value from an encoded address.
    pub const fn select_bits(address: Address) -> u8 {
        address.into_u8() & Self::SELECT_MASK
    }

    pub const fn select(self) -> u8 {
        self.select
    }
}
