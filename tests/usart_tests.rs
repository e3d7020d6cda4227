//! USART transport tests on a loopback harness.

use core::cell::{Cell, RefCell};

use critical_section::Mutex;
use usart_terminal::{RxBuffer, RxShared, TxRegister, Usart};

/// Transmit register double. Records every written byte and can hold the
/// ready flag low for a number of polls to exercise the busy-wait.
struct MockTx {
    sent: Vec<u8>,
    not_ready_polls: Cell<u32>,
    polls: Cell<u32>,
}

impl MockTx {
    fn new() -> Self {
        Self {
            sent: Vec::new(),
            not_ready_polls: Cell::new(0),
            polls: Cell::new(0),
        }
    }

    fn stalled_for(polls: u32) -> Self {
        let tx = Self::new();
        tx.not_ready_polls.set(polls);
        tx
    }
}

impl TxRegister for MockTx {
    fn tx_ready(&self) -> bool {
        self.polls.set(self.polls.get() + 1);

        let remaining = self.not_ready_polls.get();
        if remaining > 0 {
            self.not_ready_polls.set(remaining - 1);
            false
        } else {
            true
        }
    }

    fn tx_write(&mut self, byte: u8) {
        self.sent.push(byte);
    }
}

/// Deliver bytes the way the receive ISR does.
fn isr_deliver<const N: usize>(rx: &RxShared<N>, bytes: &[u8]) {
    for &byte in bytes {
        critical_section::with(|cs| rx.borrow_ref_mut(cs).push(byte));
    }
}

fn fresh_rx<const N: usize>() -> RxShared<N> {
    Mutex::new(RefCell::new(RxBuffer::new()))
}

#[test]
fn test_send_byte_busy_waits_until_ready() {
    let rx = fresh_rx::<8>();
    let mut usart = Usart::new(MockTx::stalled_for(5), &rx);

    usart.send_byte(b'A');

    let tx = usart.release();
    // 5 not-ready polls plus the one that succeeded
    assert_eq!(tx.polls.get(), 6);
    assert_eq!(tx.sent, b"A");
}

#[test]
fn test_send_bytes_preserves_order() {
    let rx = fresh_rx::<8>();
    let mut usart = Usart::new(MockTx::new(), &rx);

    usart.send_bytes(b"hello");

    assert_eq!(usart.release().sent, b"hello");
}

#[test]
fn test_send_bytes_stops_at_terminator() {
    let rx = fresh_rx::<8>();
    let mut usart = Usart::new(MockTx::new(), &rx);

    usart.send_bytes(b"PIN\0garbage");

    // Terminator is not sent, nothing after it either
    assert_eq!(usart.release().sent, b"PIN");
}

#[test]
fn test_send_iter_sends_every_byte() {
    let rx = fresh_rx::<8>();
    let mut usart = Usart::new(MockTx::new(), &rx);

    // Flash-resident-style source: bytes produced one at a time
    usart.send_iter((0u8..4).map(|i| b'0' + i));

    assert_eq!(usart.release().sent, b"0123");
}

#[test]
fn test_receive_byte_never_blocks_when_idle() {
    let rx = fresh_rx::<8>();
    let mut usart = Usart::new(MockTx::new(), &rx);

    assert_eq!(usart.available(), 0);
    assert_eq!(usart.receive_byte(), None);
    assert_eq!(usart.receive_byte(), None);
    assert_eq!(usart.available(), 0);
}

#[test]
fn test_available_tracks_isr_deliveries() {
    let rx = fresh_rx::<8>();
    let mut usart = Usart::new(MockTx::new(), &rx);

    isr_deliver(&rx, b"ab");
    assert_eq!(usart.available(), 2);

    // Polling is side-effect free
    assert_eq!(usart.available(), 2);

    assert_eq!(usart.receive_byte(), Some(b'a'));
    assert_eq!(usart.available(), 1);

    isr_deliver(&rx, b"c");
    assert_eq!(usart.available(), 2);
}

#[test]
fn test_receive_str_drains_and_terminates() {
    let rx = fresh_rx::<8>();
    let mut usart = Usart::new(MockTx::new(), &rx);

    isr_deliver(&rx, &[0x41, 0x42, 0x43]);

    let mut out = [0xAAu8; 8];
    let len = usart.receive_str(&mut out).unwrap();

    assert_eq!(len, 3);
    assert_eq!(&out[..3], b"ABC");
    assert_eq!(out[3], 0);
    assert_eq!(usart.available(), 0);
}

#[test]
fn test_receive_str_empty_buffer_yields_empty_string() {
    let rx = fresh_rx::<8>();
    let mut usart = Usart::new(MockTx::new(), &rx);

    let mut out = [0xAAu8; 4];
    assert_eq!(usart.receive_str(&mut out), Ok(0));
    assert_eq!(out[0], 0);
}

#[test]
fn test_receive_str_truncates_and_reports() {
    let rx = fresh_rx::<16>();
    let mut usart = Usart::new(MockTx::new(), &rx);

    isr_deliver(&rx, b"ABCDEFG");

    // Room for 3 data bytes plus terminator
    let mut out = [0xAAu8; 4];
    let err = usart.receive_str(&mut out).unwrap_err();

    assert_eq!(err.written, 3);
    assert_eq!(err.dropped, 4);
    assert_eq!(&out[..3], b"ABC");
    assert_eq!(out[3], 0);

    // The receive buffer is still fully drained
    assert_eq!(usart.available(), 0);
}

#[test]
fn test_loopback_round_trip() {
    let rx = fresh_rx::<8>();
    let mut usart = Usart::new(MockTx::new(), &rx);

    usart.send_str("PING");

    // Loop the first three transmitted bytes back, one receive-complete
    // interrupt per byte
    isr_deliver(&rx, b"PIN");

    assert_eq!(usart.available(), 3);

    let mut out = [0u8; 8];
    let len = usart.receive_str(&mut out).unwrap();
    assert_eq!(len, 3);
    assert_eq!(&out[..3], b"PIN");

    assert_eq!(usart.release().sent, b"PING");
}

#[test]
fn test_overflow_policy_visible_through_transport() {
    let rx = fresh_rx::<4>();
    let mut usart = Usart::new(MockTx::new(), &rx);

    // Producer outruns the consumer: oldest bytes are silently dropped
    isr_deliver(&rx, b"abcdef");

    assert_eq!(usart.available(), 4);

    let mut out = [0u8; 8];
    let len = usart.receive_str(&mut out).unwrap();
    assert_eq!(len, 4);
    assert_eq!(&out[..4], b"cdef");
}

#[test]
fn test_fmt_write_goes_out_over_tx() {
    use core::fmt::Write;

    let rx = fresh_rx::<8>();
    let mut usart = Usart::new(MockTx::new(), &rx);

    write!(usart, "divisor={}", 103).unwrap();

    assert_eq!(usart.release().sent, b"divisor=103");
}
