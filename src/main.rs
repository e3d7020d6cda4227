//! Serial login terminal firmware.
//!
//! Brings up USART0 at 9600 8N1 and runs the name/PIN login loop forever.
//! Only the AVR target gets a real entry point; host builds compile a stub
//! so the library and its tests build everywhere.

#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
#[avr_device::entry]
fn main() -> ! {
    use usart_terminal::{atmega, config::UsartConfig, terminal};

    let dp = avr_device::atmega328p::Peripherals::take().unwrap();
    let mut usart = atmega::init(dp.USART0, &UsartConfig::default());

    loop {
        terminal::login_attempt(&mut usart);
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {}
