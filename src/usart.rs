//! Byte-stream transport over the receive buffer and transmit register.
//!
//! # Architecture
//!
//! ```text
//!               ┌─────────────┐
//! RX ISR ─────▶ │  RxShared   │ ─────▶ receive_byte / receive_str
//!               └─────────────┘
//!                                       send_byte / send_str
//! tx_ready? ◀── busy-wait ◀──────────── (blocking, in order)
//! ```
//!
//! Transmission is fully synchronous: every byte busy-waits until the
//! hardware reports the holding register empty, then writes. There is no
//! timeout; if the hardware never reports ready, `send_byte` stalls
//! forever. That is the accepted hardware contract in this design, which
//! is why the wait sits behind [`TxRegister`] where a bounded-wait policy
//! could be introduced later.
//!
//! Reception never blocks: [`Usart::receive_byte`] returns `None` when
//! nothing is buffered, and [`Usart::available`] is cheap enough to poll
//! in a loop without side effects.

use core::fmt;

use crate::hal::TxRegister;
use crate::rx_buffer::{RxShared, RX_BUFFER_SIZE};

/// A drain overflowed the caller's destination buffer.
///
/// The receive buffer was still fully drained; `written` bytes fit,
/// `dropped` did not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncated {
    /// Bytes written to the destination (terminator excluded).
    pub written: usize,
    /// Bytes drained but discarded for lack of space.
    pub dropped: usize,
}

impl fmt::Display for Truncated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "receive truncated: {} bytes written, {} dropped",
            self.written, self.dropped
        )
    }
}

/// USART driver: blocking transmit, non-blocking interrupt-fed receive.
///
/// Owns the transmit side and holds a shared reference to the receive
/// buffer the ISR pushes into. Single consumer: the receive methods take
/// `&mut self` to keep a second foreground reader out.
pub struct Usart<'a, T: TxRegister, const N: usize = RX_BUFFER_SIZE> {
    tx: T,
    rx: &'a RxShared<N>,
}

impl<'a, T: TxRegister, const N: usize> Usart<'a, T, N> {
    /// Create a driver over a transmit register and the shared receive
    /// buffer the ISR feeds.
    pub fn new(tx: T, rx: &'a RxShared<N>) -> Self {
        Self { tx, rx }
    }

    /// Send one byte, blocking until the transmit register accepts it.
    ///
    /// Busy-waits on [`TxRegister::tx_ready`]; can stall indefinitely if
    /// the hardware never reports ready.
    pub fn send_byte(&mut self, byte: u8) {
        while !self.tx.tx_ready() {}
        self.tx.tx_write(byte);
    }

    /// Send bytes in order, stopping at a NUL terminator.
    ///
    /// The terminator itself is not sent. Bytes after it are ignored,
    /// preserving the C-string wire contract of the protocol this driver
    /// speaks.
    pub fn send_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if byte == 0 {
                return;
            }
            self.send_byte(byte);
        }
    }

    /// Send a string slice.
    pub fn send_str(&mut self, s: &str) {
        self.send_bytes(s.as_bytes());
    }

    /// Send bytes from any source medium, in order, without a terminator
    /// convention.
    ///
    /// Covers read-only sources that yield bytes one element at a time
    /// (flash-resident tables, generated sequences) without a dedicated
    /// entry point per medium.
    pub fn send_iter<I>(&mut self, bytes: I)
    where
        I: IntoIterator<Item = u8>,
    {
        for byte in bytes {
            self.send_byte(byte);
        }
    }

    /// Number of received bytes waiting to be read.
    ///
    /// Non-destructive; safe to poll repeatedly.
    pub fn available(&self) -> usize {
        critical_section::with(|cs| self.rx.borrow_ref(cs).len())
    }

    /// Take the oldest received byte, if any. Never blocks.
    pub fn receive_byte(&mut self) -> Option<u8> {
        critical_section::with(|cs| self.rx.borrow_ref_mut(cs).pop())
    }

    /// Drain every buffered byte into `out` in arrival order and
    /// NUL-terminate the result.
    ///
    /// Returns the number of bytes written, terminator excluded. The
    /// receive buffer is always left empty: if `out` fills up (one slot is
    /// reserved for the terminator), the remaining bytes are still drained
    /// but discarded, reported via [`Truncated`].
    ///
    /// Each byte is popped in its own critical section, so the ISR can
    /// keep delivering while a drain is in progress; bytes that arrive
    /// mid-drain are picked up in the same call.
    pub fn receive_str(&mut self, out: &mut [u8]) -> Result<usize, Truncated> {
        let mut written = 0;
        let mut dropped = 0;

        while let Some(byte) = self.receive_byte() {
            if written + 1 < out.len() {
                out[written] = byte;
                written += 1;
            } else {
                dropped += 1;
            }
        }

        if written < out.len() {
            out[written] = 0;
        }

        if dropped > 0 {
            Err(Truncated { written, dropped })
        } else {
            Ok(written)
        }
    }

    /// Tear the driver apart again.
    ///
    /// Used by tests to inspect the transmit side after a scenario.
    pub fn release(self) -> T {
        self.tx
    }
}

/// Blocking formatted output over the transmit path.
///
/// The driver core carries no logging subsystem; any diagnostics layered
/// on top go through `write!` and block like any other transmission.
impl<T: TxRegister, const N: usize> fmt::Write for Usart<'_, T, N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.send_str(s);
        Ok(())
    }
}
