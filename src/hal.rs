//! Hardware boundary for the transmit path.
//!
//! The transport only needs two things from the hardware: a way to ask
//! whether the transmit holding register can accept a byte, and a way to
//! write one. Keeping the boundary this narrow means the busy-wait policy
//! lives in [`Usart`](crate::usart::Usart), where a timeout could later be
//! added without touching the ring buffer core, and lets host tests supply
//! a loopback implementation.

/// Access to the hardware transmit register.
pub trait TxRegister {
    /// True when the transmit holding register is empty and can accept
    /// the next byte (UDRE flag on AVR).
    fn tx_ready(&self) -> bool;

    /// Write one byte into the transmit holding register.
    ///
    /// Callers must only write after [`tx_ready`](Self::tx_ready) reports
    /// true; writing earlier loses the byte still being shifted out.
    fn tx_write(&mut self, byte: u8);
}
