//! ATmega328P register glue.
//!
//! Owns the one process-wide receive buffer and wires it to the hardware:
//! the `USART_RX` interrupt pushes every received byte, [`init`] hands the
//! foreground a [`Usart`] driver borrowing the same buffer. The AVR core
//! masks the receive interrupt while its handler runs, and
//! `avr-device`'s critical-section implementation extends that guarantee
//! to the foreground pop path.
//!
//! # Hardware Setup
//!
//! ```text
//! ATmega328P PD1 (TXD) ──────▶ USB-UART RX
//! ATmega328P PD0 (RXD) ◀────── USB-UART TX
//!                               └─▶ PC serial terminal, 9600 8N1
//! ```

use core::cell::RefCell;

use avr_device::atmega328p::USART0;
use critical_section::Mutex;

use crate::config::UsartConfig;
use crate::hal::TxRegister;
use crate::rx_buffer::{RxBuffer, RxShared};
use crate::usart::Usart;

/// The receive buffer. Fed by [`USART_RX`], drained by the driver
/// returned from [`init`]; no other access path exists.
static RX_BUFFER: RxShared = Mutex::new(RefCell::new(RxBuffer::new()));

/// Transmit side of USART0.
pub struct Tx {
    usart: USART0,
}

impl TxRegister for Tx {
    #[inline]
    fn tx_ready(&self) -> bool {
        // UDRE0: transmit holding register empty
        self.usart.ucsr0a.read().udre0().bit_is_set()
    }

    #[inline]
    fn tx_write(&mut self, byte: u8) {
        self.usart.udr0.write(|w| unsafe { w.bits(byte) });
    }
}

/// Configure USART0 and hand out the driver.
///
/// Sets up asynchronous 8N1 at the configured baud rate, enables the
/// receiver, transmitter and the receive-complete interrupt, then enables
/// interrupts globally. Call once at startup, before any traffic.
pub fn init(usart: USART0, config: &UsartConfig) -> Usart<'static, Tx> {
    // Normal speed, multi-processor mode off
    usart.ucsr0a.write(|w| w.u2x0().clear_bit().mpcm0().clear_bit());

    // UMSEL0 = 00 async, UPM0 = 00 no parity, USBS0 = 0 one stop bit,
    // UCSZ0 = 011 eight data bits
    usart.ucsr0c.write(|w| unsafe { w.bits(0x06) });

    usart.ubrr0.write(|w| unsafe { w.bits(config.divisor()) });

    // Receive-complete interrupt, receiver, transmitter
    usart
        .ucsr0b
        .write(|w| w.rxcie0().set_bit().rxen0().set_bit().txen0().set_bit());

    // SAFETY: the receive handler is registered above and the buffer is in
    // its initial state; enabling interrupts is the last init step.
    unsafe { avr_device::interrupt::enable() };

    Usart::new(Tx { usart }, &RX_BUFFER)
}

#[avr_device::interrupt(atmega328p)]
fn USART_RX() {
    // SAFETY: UDR0 is only read here; the foreground side owns every other
    // USART register through `Tx`.
    let byte = unsafe { (*USART0::ptr()).udr0.read().bits() };

    critical_section::with(|cs| RX_BUFFER.borrow_ref_mut(cs).push(byte));
}
