//! USART configuration.
//!
//! The frame format is fixed at 8 data bits, no parity, 1 stop bit; only
//! the clock and baud rate are configurable.

/// USART line configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UsartConfig {
    /// System clock frequency in Hz.
    pub clock_hz: u32,
    /// Desired bit rate in baud.
    pub baud_rate: u32,
}

impl Default for UsartConfig {
    fn default() -> Self {
        Self {
            clock_hz: 16_000_000, // Stock ATmega328P crystal
            baud_rate: 9_600,
        }
    }
}

impl UsartConfig {
    pub const fn new(clock_hz: u32, baud_rate: u32) -> Self {
        Self { clock_hz, baud_rate }
    }

    /// Baud rate divisor for the UBRR register.
    ///
    /// The hardware derives the bit clock as `clock / (16 * (UBRR + 1))`,
    /// so the divisor is `clock / (16 * baud) - 1`. The formula must match
    /// exactly or the line speed is off and framing breaks.
    pub const fn divisor(&self) -> u16 {
        (self.clock_hz / (16 * self.baud_rate) - 1) as u16
    }
}
