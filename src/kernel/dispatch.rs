//! Routes one saved trap frame to its handler.
//!
//! Policy for bring-up:
//! - known interrupt class with a handler: call it
//! - known interrupt class without a handler: ignore silently
//! - any other interrupt: one "unknown interrupt" line on the console
//! - exception: one line on the console, then return to the interrupted
//!   context (no recovery, no termination)

use core::fmt::Write;

use crate::{
    arch::TrapFrame,
    drivers::console::{Console, ConsoleWriter},
    kernel::registry::{HandlerRegistry, TrapClass},
};

/// What `dispatch` did with a trap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapOutcome {
    Handled(TrapClass),
    /// Routable class, but nothing registered for it
    Unhandled(TrapClass),
    UnknownInterrupt(usize),
    Exception(usize),
}

pub struct TrapDispatcher<'a, C: Console + ?Sized> {
    registry: &'a HandlerRegistry,
    console: &'a C,
}

impl<'a, C: Console + ?Sized> TrapDispatcher<'a, C> {
    pub const fn new(registry: &'a HandlerRegistry, console: &'a C) -> Self {
        Self { registry, console }
    }

    /// `frame` is only borrowed for this call; nothing keeps it afterwards.
    pub fn dispatch(&self, frame: &TrapFrame) -> TrapOutcome {
        let cause = frame.trap_cause();
        let code = cause.code();

        if !cause.is_interrupt() {
            let _ = writeln!(
                ConsoleWriter::new(self.console),
                "[trap] exception {}: {} at pc {:#x} (tval {:#x})",
                code,
                cause.name(),
                frame.pc,
                frame.tval
            );
            return TrapOutcome::Exception(code);
        }

        match TrapClass::from_interrupt_code(code) {
            Some(class) => match self.registry.handler(class) {
                Some(handler) => {
                    handler.handle(frame);
                    TrapOutcome::Handled(class)
                }
                None => TrapOutcome::Unhandled(class),
            },
            None => {
                let _ = writeln!(
                    ConsoleWriter::new(self.console),
                    "[trap] unknown interrupt: code {} ({})",
                    code,
                    cause.name()
                );
                TrapOutcome::UnknownInterrupt(code)
            }
        }
    }
}
