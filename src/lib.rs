//! MAGIos interrupt and serial-output core.
//!
//! Runs in supervisor mode on the QEMU `virt` RISC-V board under OpenSBI:
//! - `drivers`: console trait, MMIO register handle, NS16550A UART
//! - `arch`: trap frame layout, cause decoding, timer and CPU interrupt control
//! - `kernel`: handler registry, trap dispatcher, periodic timer, boot ordering
//!
//! Everything that touches hardware sits behind a trait, so the core logic
//! builds and tests on the host as well.

#![cfg_attr(not(test), no_std)]

pub mod arch;
pub mod config;
pub mod drivers;
pub mod error;
pub mod kernel;
pub mod logging;

#[cfg(all(target_arch = "riscv64", target_os = "none", not(test)))]
mod panic_handler;

#[cfg(test)]
mod testing;
