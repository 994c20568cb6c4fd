//! # Embus
//!
//! Fixed-capacity, allocation-free containers and a small bus-communication
//! layer for resource-constrained embedded targets.
//!
//! The library provides two things:
//!
//! * **Containers** with a fixed backing store and no heap use:
//!   [`ring_buffer::RingBuffer`], the FIFO [`queue::Queue`] built on it, the
//!   index-linked [`static_list::StaticList`], and [`bitset::Bitset`]. Every
//!   fallible operation reports failure through a `Result`; nothing silently
//!   evicts or corrupts state on overflow.
//! * **Bus plumbing**: I2C/CAN message framing and transport capabilities
//!   (re-exported from `embus-driver`), and [`buffer::TxQueue`] — a bounded
//!   message channel that lets producers stage transfers for an asynchronous
//!   bus drainer.
//!
//! Device drivers (e.g. the FM24CL64B EEPROM driver in `embus-fm24cl64b`)
//! consume the transport capability and sit on top of this crate's framing.
//!
//! ## Concurrency model
//!
//! The containers are designed for single-threaded, cooperative use on a
//! bare-metal or RTOS task context and provide no internal locking: callers
//! serialize access. The one exception is [`buffer::TxQueue`], which takes an
//! `embassy-sync` raw-mutex parameter so the caller picks the serialization
//! domain:
//!
//! * `CriticalSectionRawMutex` allows producers and drainer to run at
//!   different interrupt levels, at the cost of bounded interrupt latency.
//! * `ThreadModeRawMutex`/`NoopRawMutex` have no system-wide effects but
//!   require all parties in a thread (non-interrupt) executor.
//!
//! No operation blocks indefinitely: container operations are O(1) and bus
//! operations either complete, fail immediately, or fail after a bounded
//! retry count defined by the driver on top.
#![no_std]

pub use embus_core as core;
pub use embus_driver::{can, hal, i2c, time};

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod bitset;
pub mod buffer;
pub mod queue;
pub mod ring_buffer;
pub mod static_list;
