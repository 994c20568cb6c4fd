//! Embus bus interface
//!
//! The crate provides the interface between bus transports and the rest of the
//! Embus stack: wire-level message framing for I2C and CAN, plus the transport
//! capability traits that device drivers consume. Limited scope facilitates
//! compatibility across versions. Transport and device driver crates should
//! depend on this crate. Embus stack users should depend on the `embus` crate
//! instead.
//!
//! A transport is anything implementing [`i2c::I2cBus`] or [`can::CanBus`]:
//! a peripheral binding (see [`hal`]) or a test double. Device drivers take
//! the capability by exclusive borrow for the duration of one call and never
//! assume more than "send message, receive message". All fallible operations
//! return values; nothing in this layer panics on bus failure.
#![no_std]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod can;
pub mod hal;
pub mod i2c;

pub mod time {
    pub use embassy_time::{Duration, Instant};
}

/// Requested payload does not fit the message capacity.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PayloadTooLarge;
