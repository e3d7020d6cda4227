//! # UsartTerminal
//!
//! Interrupt-driven USART driver with a serial login terminal on top.
//!
//! ## Architecture
//!
//! All received bytes flow through [`RxBuffer`]. Contexts are isolated:
//! - The receive ISR pushes into the buffer, doesn't know who reads
//! - Foreground code pops from the buffer, doesn't know when bytes arrive
//! - Coordination only through critical sections, no locks, no blocking
//!   in the interrupt context
//!
//! Transmission is the opposite trade: fully synchronous, busy-waiting on
//! the hardware per byte, so sent data is never lost or reordered.

#![cfg_attr(not(test), no_std)]

pub mod auth;
pub mod config;
pub mod hal;
pub mod rx_buffer;
pub mod terminal;
pub mod usart;

#[cfg(target_arch = "avr")]
pub mod atmega;

pub use config::UsartConfig;
pub use hal::TxRegister;
pub use rx_buffer::{RxBuffer, RxShared, RX_BUFFER_SIZE};
pub use usart::{Truncated, Usart};
