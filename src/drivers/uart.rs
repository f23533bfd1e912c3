//! NS16550A UART transmit driver.
//!
//! The transmit FIFO on the QEMU virt UART is only a few bytes deep, so the
//! line-status register is polled before every single byte rather than once
//! per batch. There is no timeout: a UART that never reports ready blocks the
//! caller forever.

use core::hint::spin_loop;

use super::{console::Console, mmio::Mmio};

/// Transmit Holding Register offset (write-only)
pub const THR_OFFSET: usize = 0x0;
/// Line Status Register offset (read-only)
pub const LSR_OFFSET: usize = 0x5;
/// LSR bit 5: THR empty, ready for the next byte
pub const LSR_TX_READY: u8 = 1 << 5;

/// The two registers the transmit path touches.
pub trait UartRegisters {
    fn line_status(&self) -> u8;
    fn write_thr(&self, byte: u8);
}

/// Register block of a memory-mapped 16550.
pub struct Ns16550 {
    thr: Mmio<u8>,
    lsr: Mmio<u8>,
}

impl Ns16550 {
    /// # Safety
    /// `base` must be the MMIO base of a 16550-compatible UART.
    pub const unsafe fn new(base: usize) -> Self {
        Self {
            thr: Mmio::new(base + THR_OFFSET),
            lsr: Mmio::new(base + LSR_OFFSET),
        }
    }
}

impl UartRegisters for Ns16550 {
    #[inline]
    fn line_status(&self) -> u8 {
        self.lsr.read()
    }

    #[inline]
    fn write_thr(&self, byte: u8) {
        self.thr.write(byte);
    }
}

pub struct Uart<R> {
    regs: R,
    settle_spins: usize,
}

impl<R: UartRegisters> Uart<R> {
    pub const fn new(regs: R, settle_spins: usize) -> Self {
        Self { regs, settle_spins }
    }

    /// Send every byte in order. Returns once the last byte is in the THR.
    pub fn transmit(&self, bytes: &[u8]) {
        for &byte in bytes {
            self.put_byte(byte);
        }
    }

    #[inline]
    pub fn put_byte(&self, byte: u8) {
        self.wait_until_ready();
        self.settle();
        self.regs.write_thr(byte);
    }

    pub fn is_ready(&self) -> bool {
        self.regs.line_status() & LSR_TX_READY != 0
    }

    fn wait_until_ready(&self) {
        while !self.is_ready() {
            spin_loop();
        }
    }

    // Slow hardware needs a moment between "ready" and the actual write
    fn settle(&self) {
        for _ in 0..self.settle_spins {
            spin_loop();
        }
    }

    pub fn registers(&self) -> &R {
        &self.regs
    }
}

impl<R: UartRegisters> Console for Uart<R> {
    fn write_bytes(&self, bytes: &[u8]) {
        self.transmit(bytes);
    }
}
