//! Supervisor-mode timer hardware: the `time` CSR as counter, and the SBI
//! TIME extension to program the hart's compare register (S-mode cannot
//! write the CLINT directly under OpenSBI).

/// SBI TIME extension ("TIME")
pub const SBI_EID_TIME: usize = 0x5449_4D45;
pub const SBI_FID_SET_TIMER: usize = 0;

#[cfg(target_arch = "riscv64")]
pub use self::sbi::SbiTimer;

#[cfg(target_arch = "riscv64")]
mod sbi {
    use core::arch::asm;

    use log::warn;
    use riscv::register::time;

    use super::{SBI_EID_TIME, SBI_FID_SET_TIMER};
    use crate::kernel::timer::TimerHardware;

    pub struct SbiTimer;

    impl TimerHardware for SbiTimer {
        #[inline]
        fn now(&self) -> u64 {
            time::read64()
        }

        fn set_deadline(&self, deadline: u64) {
            let error = sbi_set_timer(deadline);
            if error != 0 {
                warn!("sbi set_timer({:#x}) failed: {}", deadline, error);
            }
        }
    }

    /// Returns the SBI error code (0 on success).
    fn sbi_set_timer(stime_value: u64) -> isize {
        let error: isize;
        unsafe {
            asm!(
                "ecall",
                in("a7") SBI_EID_TIME,
                in("a6") SBI_FID_SET_TIMER,
                inlateout("a0") stime_value as usize => error,
                lateout("a1") _,
            );
        }
        error
    }
}
