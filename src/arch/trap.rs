use core::fmt;

pub mod interrupt {
    pub const SUPERVISOR_SOFTWARE: usize = 1;
    pub const MACHINE_SOFTWARE: usize = 3;
    pub const SUPERVISOR_TIMER: usize = 5;
    pub const MACHINE_TIMER: usize = 7;
    pub const SUPERVISOR_EXTERNAL: usize = 9;
    pub const MACHINE_EXTERNAL: usize = 11;
}

pub mod exception {
    pub const INSTRUCTION_ADDRESS_MISALIGNED: usize = 0;
    pub const INSTRUCTION_ACCESS_FAULT: usize = 1;
    pub const ILLEGAL_INSTRUCTION: usize = 2;
    pub const BREAKPOINT: usize = 3;
    pub const LOAD_ADDRESS_MISALIGNED: usize = 4;
    pub const LOAD_ACCESS_FAULT: usize = 5;
    pub const STORE_AMO_ADDRESS_MISALIGNED: usize = 6;
    pub const STORE_AMO_ACCESS_FAULT: usize = 7;
    pub const ENVIRONMENT_CALL_FROM_U_MODE: usize = 8;
    pub const ENVIRONMENT_CALL_FROM_S_MODE: usize = 9;
    pub const ENVIRONMENT_CALL_FROM_M_MODE: usize = 11;
    pub const INSTRUCTION_PAGE_FAULT: usize = 12;
    pub const LOAD_PAGE_FAULT: usize = 13;
    pub const STORE_AMO_PAGE_FAULT: usize = 15;
}

/// Top bit of the cause register: set for interrupts, clear for exceptions.
pub const INTERRUPT_BIT: usize = 1 << (usize::BITS - 1);

/// Raw `scause` value.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TrapCause(usize);

impl TrapCause {
    pub const fn from_bits(bits: usize) -> Self {
        Self(bits)
    }

    pub const fn interrupt(code: usize) -> Self {
        Self(INTERRUPT_BIT | code)
    }

    pub const fn exception(code: usize) -> Self {
        Self(code & !INTERRUPT_BIT)
    }

    pub const fn bits(&self) -> usize {
        self.0
    }

    pub const fn is_interrupt(&self) -> bool {
        self.0 & INTERRUPT_BIT != 0
    }

    pub const fn code(&self) -> usize {
        self.0 & !INTERRUPT_BIT
    }

    pub fn name(&self) -> &'static str {
        use self::{exception::*, interrupt::*};

        if self.is_interrupt() {
            match self.code() {
                SUPERVISOR_SOFTWARE => "Supervisor software interrupt",
                MACHINE_SOFTWARE => "Machine software interrupt",
                SUPERVISOR_TIMER => "Supervisor timer interrupt",
                MACHINE_TIMER => "Machine timer interrupt",
                SUPERVISOR_EXTERNAL => "Supervisor external interrupt",
                MACHINE_EXTERNAL => "Machine external interrupt",
                _ => "Reserved or designated for platform use",
            }
        } else {
            match self.code() {
                INSTRUCTION_ADDRESS_MISALIGNED => "Instruction address misaligned",
                INSTRUCTION_ACCESS_FAULT => "Instruction access fault",
                ILLEGAL_INSTRUCTION => "Illegal instruction",
                BREAKPOINT => "Breakpoint",
                LOAD_ADDRESS_MISALIGNED => "Load address misaligned",
                LOAD_ACCESS_FAULT => "Load access fault",
                STORE_AMO_ADDRESS_MISALIGNED => "Store/AMO address misaligned",
                STORE_AMO_ACCESS_FAULT => "Store/AMO access fault",
                ENVIRONMENT_CALL_FROM_U_MODE => "Environment call from U-mode",
                ENVIRONMENT_CALL_FROM_S_MODE => "Environment call from S-mode",
                ENVIRONMENT_CALL_FROM_M_MODE => "Environment call from M-mode",
                INSTRUCTION_PAGE_FAULT => "Instruction page fault",
                LOAD_PAGE_FAULT => "Load page fault",
                STORE_AMO_PAGE_FAULT => "Store/AMO page fault",
                _ => "Reserved or designated for platform use",
            }
        }
    }
}

impl fmt::Debug for TrapCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrapCause")
            .field("interrupt", &self.is_interrupt())
            .field("code", &self.code())
            .finish()
    }
}

/// Called by `trap_entry` with the address of the frame it just saved.
///
/// Runs with supervisor interrupts masked (the hart clears `sstatus.SIE` on
/// trap entry), so dispatch never nests.
#[cfg(target_arch = "riscv64")]
#[no_mangle]
pub extern "C" fn trap_handler(frame: *const super::TrapFrame) {
    use crate::{
        config::CONSOLE,
        kernel::{dispatch::TrapDispatcher, registry::HANDLERS},
    };

    // SAFETY: trap.S passes the frame it saved on the current stack; it stays
    // untouched until this function returns.
    let frame = unsafe { &*frame };
    TrapDispatcher::new(&HANDLERS, &CONSOLE).dispatch(frame);
}
