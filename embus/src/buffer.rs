//! Queued message transport
//!
//! [`TxQueue`] bridges message producers and a bus-draining task: producers
//! stage write transfers without blocking, and a single drainer awaits the
//! next staged message and pushes it into the transport. The backing store is
//! the bounded [`Queue`]; a full queue rejects the message instead of
//! evicting staged traffic.

use core::cell::RefCell;
use core::future::poll_fn;
use core::task::{Context, Poll};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::waitqueue::WakerRegistration;

use crate::i2c::{I2cBus, Message};
use crate::queue::{Overflow, Queue};

struct Inner<const SZ: usize, const N: usize> {
    queue: Queue<Message<SZ>, N>,
    waker: WakerRegistration,
}

/// Bounded transmit queue for asynchronous bus draining
///
/// `SZ` is the payload capacity of one staged message, `N` the number of
/// staging slots. The mutex parameter selects the serialization domain, as
/// elsewhere in the embassy ecosystem: `CriticalSectionRawMutex` to produce
/// from interrupt context, `NoopRawMutex` when everything shares one task.
///
/// Single-consumer: at most one task may await [`TxQueue::pop`] (or run the
/// drainer) at a time; a later waker registration replaces the earlier one.
pub struct TxQueue<M: RawMutex, const SZ: usize, const N: usize> {
    inner: Mutex<M, RefCell<Inner<SZ, N>>>,
}

impl<M: RawMutex, const SZ: usize, const N: usize> TxQueue<M, SZ, N> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Inner {
                queue: Queue::new(),
                waker: WakerRegistration::new(),
            })),
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.inner.lock(|inner| inner.borrow().queue.len())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock(|inner| inner.borrow().queue.is_empty())
    }

    /// Stages a message for transmission. Never blocks; a full queue hands
    /// the message back.
    pub fn push(&self, message: Message<SZ>) -> Result<(), Overflow<Message<SZ>>> {
        self.inner.lock(|inner| {
            let mut inner = inner.borrow_mut();
            inner.queue.push(message)?;
            inner.waker.wake();
            Ok(())
        })
    }

    /// Asynchronously fetches the next staged message. Safe to drop.
    pub async fn pop(&self) -> Message<SZ> {
        poll_fn(|cx| self.poll_pop(cx)).await
    }

    fn poll_pop(&self, cx: &mut Context<'_>) -> Poll<Message<SZ>> {
        self.inner.lock(|inner| {
            let mut inner = inner.borrow_mut();
            match inner.queue.pop() {
                Ok(message) => Poll::Ready(message),
                Err(_) => {
                    inner.waker.register(cx.waker());
                    Poll::Pending
                }
            }
        })
    }

    /// Drains staged messages into the transport forever.
    ///
    /// A failed send is logged and dropped; retry policy belongs to the
    /// device driver that staged the message, not to the drain loop.
    pub async fn run<B: I2cBus>(&self, bus: &mut B) -> ! {
        loop {
            let message = self.pop().await;
            if let Err(err) = bus.send(&message).await {
                warn!("tx drain: dropping message: {}", err);
            }
        }
    }
}

impl<M: RawMutex, const SZ: usize, const N: usize> Default for TxQueue<M, SZ, N> {
    fn default() -> Self {
        Self::new()
    }
}
