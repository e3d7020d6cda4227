//! SPSC (Single Producer, Single Consumer) receive ring buffer.
//!
//! This is the heart of the driver. Every received byte flows through here.
//!
//! # Architecture
//!
//! ```text
//! USART RX ISR ──────▶ RxBuffer ──────▶ Foreground
//!                      (fixed size)
//!                      (overwrite-oldest)
//! ```
//!
//! # Rules
//!
//! - The ISR only pushes, the foreground only pops
//! - Both sides run their mutation inside a critical section; on AVR the
//!   receive interrupt is masked while its handler runs, and
//!   `critical_section::with` gives the foreground the same guarantee
//! - `push` completes in O(1) and never blocks

use core::cell::RefCell;

use critical_section::Mutex;

/// Default receive buffer size in bytes. Must be a power of 2.
pub const RX_BUFFER_SIZE: usize = 64;

/// The shared receive buffer instance type.
///
/// A single `RxShared` static is referenced from both the receive ISR and
/// the foreground [`Usart`](crate::usart::Usart) driver; neither side owns
/// a copy, and every access goes through `critical_section::with`.
pub type RxShared<const N: usize = RX_BUFFER_SIZE> = Mutex<RefCell<RxBuffer<N>>>;

/// Fixed-capacity FIFO byte buffer with overwrite-oldest overflow policy.
///
/// `count` is the single source of truth for empty (`0`) and full (`N`);
/// `head` and `tail` alone cannot distinguish the two states.
pub struct RxBuffer<const N: usize = RX_BUFFER_SIZE> {
    storage: [u8; N],
    /// Next write slot.
    head: usize,
    /// Next read slot.
    tail: usize,
    /// Number of valid, unread bytes.
    count: usize,
}

impl<const N: usize> RxBuffer<N> {
    /// Mask for wrapping an index to the buffer size.
    /// N must be a power of 2.
    const MASK: usize = N - 1;

    /// Create a new empty buffer.
    ///
    /// # Panics
    ///
    /// Panics at compile time if N is not a power of 2.
    pub const fn new() -> Self {
        // Compile-time check: N must be power of 2
        assert!(N.is_power_of_two(), "Buffer size must be power of 2");

        Self {
            storage: [0; N],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Push a received byte.
    ///
    /// When the buffer is full the oldest unread byte is silently
    /// overwritten and `tail` advances with `head`, so the buffer always
    /// holds the most recent `N` bytes in arrival order. Overflow is not
    /// an error and is never surfaced.
    ///
    /// # Timing
    ///
    /// O(1), no allocation. Safe to call at interrupt priority.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.storage[self.head] = byte;
        self.head = (self.head + 1) & Self::MASK;

        if self.count < N {
            self.count += 1;
        } else {
            // Full: the slot just written held the oldest unread byte.
            self.tail = (self.tail + 1) & Self::MASK;
        }
    }

    /// Pop the oldest unread byte.
    ///
    /// Returns `None` when the buffer is empty. Underflow is not an error;
    /// no state is mutated on the empty path.
    #[inline]
    pub fn pop(&mut self) -> Option<u8> {
        if self.count == 0 {
            return None;
        }

        let byte = self.storage[self.tail];
        self.tail = (self.tail + 1) & Self::MASK;
        self.count -= 1;
        Some(byte)
    }

    /// Number of unread bytes currently buffered.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if the buffer holds no unread bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get the buffer capacity.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for RxBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
