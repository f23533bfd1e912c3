//! RISC-V (RV64, supervisor mode) specifics: the saved trap frame layout,
//! trap-cause decoding, the timer hardware and CPU interrupt control.

pub mod timer;
pub mod trap;

use self::trap::TrapCause;

// === Trap frame layout saved by trap.S ===
// x1..x31, then sepc, scause, stval, sstatus: 35 * 8 = 280 bytes on RV64
pub const FRAME_WORDS: usize = 35;
pub const GPR_COUNT: usize = 31;

pub const OFF_PC: usize = 31;
pub const OFF_CAUSE: usize = 32;
pub const OFF_TVAL: usize = 33;
pub const OFF_STATUS: usize = 34;

/// Register snapshot written by `trap_entry` at the moment of the trap.
///
/// The dispatcher only ever sees a shared reference that is valid for the
/// duration of one dispatch.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrapFrame {
    /// x1..x31 (x0 is hard-wired to zero and not saved)
    pub gprs: [usize; GPR_COUNT],
    pub pc: usize,
    pub cause: usize,
    pub tval: usize,
    pub status: usize,
}

impl TrapFrame {
    pub const fn zeroed() -> Self {
        Self {
            gprs: [0; GPR_COUNT],
            pc: 0,
            cause: 0,
            tval: 0,
            status: 0,
        }
    }

    pub const fn with_cause(cause: usize) -> Self {
        let mut frame = Self::zeroed();
        frame.cause = cause;
        frame
    }

    pub fn trap_cause(&self) -> TrapCause {
        TrapCause::from_bits(self.cause)
    }
}

impl Default for TrapFrame {
    fn default() -> Self {
        Self::zeroed()
    }
}

#[cfg(target_arch = "riscv64")]
pub use self::cpu::{halt, wait_for_interrupt, SupervisorCpu};

#[cfg(target_arch = "riscv64")]
mod cpu {
    use riscv::register::{
        sie, sstatus,
        stvec::{self, Stvec, TrapMode},
    };

    use crate::kernel::registry::{Armed, InterruptControl, TrapClass};

    // Provided by trap.S
    extern "C" {
        fn trap_entry();
    }

    /// The boot hart, seen through its supervisor interrupt CSRs.
    pub struct SupervisorCpu;

    impl InterruptControl for SupervisorCpu {
        fn install_trap_vector(&mut self) {
            // Direct mode: every trap enters at trap_entry
            unsafe { stvec::write(Stvec::from_bits(trap_entry as usize)) };
        }

        fn trap_vector_installed(&self) -> bool {
            let current = stvec::read();
            current.trap_mode() == TrapMode::Direct
                && current.address() == (trap_entry as usize) & !0x3
        }

        fn unmask(&mut self, source: Armed) {
            unsafe {
                match source.class() {
                    TrapClass::Timer => sie::set_stimer(),
                    TrapClass::External => sie::set_sext(),
                }
            }
        }

        fn enable_interrupts(&mut self) {
            unsafe { sstatus::set_sie() };
        }
    }

    #[inline]
    pub fn wait_for_interrupt() {
        riscv::asm::wfi();
    }

    /// Mask everything and park the hart.
    pub fn halt() -> ! {
        unsafe {
            sstatus::clear_sie();
            sie::clear_stimer();
            sie::clear_sext();
            sie::clear_ssoft();
        }
        loop {
            riscv::asm::wfi();
        }
    }
}
