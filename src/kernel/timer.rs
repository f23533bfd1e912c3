//! Periodic tick built on a one-shot compare register.
//!
//! Every tick reprograms the compare register to `now + interval`; a tick that
//! fails to re-arm stops the tick stream for good.

use core::{
    fmt::Write,
    sync::atomic::{AtomicU64, Ordering::Relaxed},
};

use log::info;

use crate::{
    arch::TrapFrame,
    config::HEARTBEAT_TICKS,
    drivers::console::{Console, ConsoleWriter},
    error::{KernelError, Result},
    kernel::registry::{HandlerRegistry, InterruptControl, TrapClass, TrapHandler},
};

/// Free-running time counter plus a one-shot compare register.
pub trait TimerHardware {
    fn now(&self) -> u64;
    fn set_deadline(&self, deadline: u64);
}

/// The system tick. Lives in a `static` and registers itself as the timer
/// trap handler in [`SystemTimer::init`].
pub struct SystemTimer<H, C: ?Sized + 'static> {
    hw: H,
    console: &'static C,
    interval: u64,
    tick_ms: u64,
    // Only ever incremented by on_tick. Wraps at u64::MAX.
    ticks: AtomicU64,
}

impl<H, C> SystemTimer<H, C>
where
    H: TimerHardware + Sync + 'static,
    C: Console + Sync + ?Sized + 'static,
{
    /// `interval` is in timebase counts, `tick_ms` is what one interval means
    /// in wall time. Heartbeats go to `console`.
    pub const fn new(hw: H, console: &'static C, interval: u64, tick_ms: u64) -> Self {
        Self {
            hw,
            console,
            interval,
            tick_ms,
            ticks: AtomicU64::new(0),
        }
    }

    /// Install and verify the vector, register this timer, arm the first
    /// deadline, then unmask the timer and enable interrupts. In that order.
    pub fn init<I: InterruptControl>(
        &'static self,
        registry: &HandlerRegistry,
        cpu: &mut I,
    ) -> Result<()> {
        cpu.install_trap_vector();
        if !cpu.trap_vector_installed() {
            return Err(KernelError::TrapVectorMismatch);
        }
        registry.register(TrapClass::Timer, self)?;

        self.arm_next();
        let armed = registry.arm(TrapClass::Timer)?;
        cpu.unmask(armed);
        cpu.enable_interrupts();

        info!(
            "timer armed: every {} ms ({} counts)",
            self.tick_ms, self.interval
        );
        Ok(())
    }

    /// Interrupt-level tick. Returns the new tick count.
    ///
    /// The heartbeat fires on every non-zero multiple of `HEARTBEAT_TICKS`;
    /// the zero produced by wrapping is not a heartbeat.
    pub fn on_tick(&self) -> u64 {
        let tick = self.ticks.fetch_add(1, Relaxed).wrapping_add(1);

        if tick != 0 && tick % HEARTBEAT_TICKS == 0 {
            let _ = writeln!(ConsoleWriter::new(self.console), "[timer] alive: {} ticks", tick);
        }

        self.arm_next();
        tick
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.load(Relaxed)
    }

    fn arm_next(&self) {
        let now = self.hw.now();
        self.hw.set_deadline(now.wrapping_add(self.interval));
    }
}

impl<H, C> TrapHandler for SystemTimer<H, C>
where
    H: TimerHardware + Sync + 'static,
    C: Console + Sync + ?Sized + 'static,
{
    fn handle(&self, _frame: &TrapFrame) {
        self.on_tick();
    }
}
