//! Platform contract for QEMU `virt` and compile-time kernel configuration.

use log::LevelFilter;

use crate::drivers::uart::{Ns16550, Uart};

/// NS16550A UART0
pub const UART0_BASE: usize = 0x1000_0000;

/// Bytes the 16550 transmit FIFO holds before writes must wait.
pub const UART_FIFO_DEPTH: usize = 16;

/// Busy-wait between "ready" and the THR write.
pub const UART_SETTLE_SPINS: usize = 32;

/// `time` CSR frequency on QEMU virt (`timebase-frequency` in the device tree).
pub const TIMEBASE_HZ: u64 = 10_000_000;

pub const TICK_MS: u64 = 10;

/// Compare-register increment per tick.
pub const TICK_INTERVAL: u64 = TIMEBASE_HZ / 1000 * TICK_MS;

/// A liveness line is printed every this many ticks.
pub const HEARTBEAT_TICKS: u64 = 100;

/// Kernel console.
// SAFETY: UART0_BASE is the UART0 register block on this board.
pub static CONSOLE: Uart<Ns16550> =
    Uart::new(unsafe { Ns16550::new(UART0_BASE) }, UART_SETTLE_SPINS);

/// Most verbose level compiled in, picked by the `log-*` cargo features.
pub const fn max_log_level() -> LevelFilter {
    if cfg!(feature = "log-trace") {
        LevelFilter::Trace
    } else if cfg!(feature = "log-debug") {
        LevelFilter::Debug
    } else if cfg!(feature = "log-info") {
        LevelFilter::Info
    } else if cfg!(feature = "log-warn") {
        LevelFilter::Warn
    } else if cfg!(feature = "log-error") {
        LevelFilter::Error
    } else {
        LevelFilter::Off
    }
}
