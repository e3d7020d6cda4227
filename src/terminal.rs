//! Login session for the serial terminal.
//!
//! One round of the demo application: prompt for a name, look it up,
//! prompt for the PIN digit by digit with `*` echo, report the verdict.
//! Everything here is generic over [`TxRegister`] so the whole session
//! runs unmodified against the loopback harness in the host tests.

use crate::auth::{self, PIN_LEN};
use crate::hal::TxRegister;
use crate::usart::Usart;

/// Maximum accepted name length in bytes.
pub const NAME_LEN: usize = 32;

const PROMPT_NAME: &str = "Enter your full name:\r\n";
const PROMPT_PIN: &str = "Enter your PIN, one digit at a time:\r\n";
const MSG_OK: &str = "Identity verified!\r\n-------------------------------\r\n";
const MSG_BAD_PIN: &str = "Identity check failed. Try again.\r\n\r\n";
const MSG_UNKNOWN: &str = "Unknown name, try again.\r\n\r\n";

/// Read one line, blocking until CR or LF arrives.
///
/// Leading line terminators are skipped so a trailing `\n` from a previous
/// `\r\n` entry does not produce an empty line. Input beyond `out` is
/// dropped. Returns the line length.
pub fn read_line<T: TxRegister, const N: usize>(
    usart: &mut Usart<'_, T, N>,
    out: &mut [u8],
) -> usize {
    let mut len = 0;

    loop {
        let Some(byte) = usart.receive_byte() else {
            continue;
        };

        match byte {
            b'\r' | b'\n' => {
                if len > 0 {
                    return len;
                }
            }
            _ => {
                if len < out.len() {
                    out[len] = byte;
                    len += 1;
                }
            }
        }
    }
}

/// Block until one byte arrives.
fn read_byte<T: TxRegister, const N: usize>(usart: &mut Usart<'_, T, N>) -> u8 {
    loop {
        if let Some(byte) = usart.receive_byte() {
            return byte;
        }
    }
}

/// Block until a byte that is not a line terminator arrives.
///
/// The name entry returns on the `\r` of a `\r\n` pair, leaving the `\n`
/// in the receive buffer; PIN digits must not consume it.
fn read_digit<T: TxRegister, const N: usize>(usart: &mut Usart<'_, T, N>) -> u8 {
    loop {
        let byte = read_byte(usart);
        if byte != b'\r' && byte != b'\n' {
            return byte;
        }
    }
}

/// Run one login round. Returns whether the identity check passed.
pub fn login_attempt<T: TxRegister, const N: usize>(usart: &mut Usart<'_, T, N>) -> bool {
    usart.send_str(PROMPT_NAME);

    let mut name_buf = [0u8; NAME_LEN];
    let len = read_line(usart, &mut name_buf);
    let name = core::str::from_utf8(&name_buf[..len]).unwrap_or("");

    let Some(user) = auth::find_user(name) else {
        usart.send_str(MSG_UNKNOWN);
        return false;
    };

    usart.send_str(PROMPT_PIN);

    let mut pin = [0u8; PIN_LEN];
    for digit in pin.iter_mut() {
        *digit = read_digit(usart);
        usart.send_str("*");
    }
    usart.send_str("\r\n");

    if auth::check_pin(user, &pin) {
        usart.send_str(MSG_OK);
        true
    } else {
        usart.send_str(MSG_BAD_PIN);
        false
    }
}
