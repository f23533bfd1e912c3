//! Trap-class to handler table.
//!
//! There is exactly one live registry, `HANDLERS`, built at compile time and
//! filled in during boot. Each slot is write-once. Unmasking an interrupt
//! source takes an [`Armed`] token, and only the registry hands those out,
//! and only for a class that already has a handler. That makes "enable before
//! register" unrepresentable rather than a convention.

use core::fmt;

use spin::Once;

use crate::{
    arch::{trap::interrupt, TrapFrame},
    error::{KernelError, Result},
};

/// Services one class of trap. Runs at interrupt level with interrupts masked.
pub trait TrapHandler: Sync {
    fn handle(&self, frame: &TrapFrame);
}

impl<F> TrapHandler for F
where
    F: Fn(&TrapFrame) + Sync,
{
    fn handle(&self, frame: &TrapFrame) {
        self(frame)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrapClass {
    Timer,
    External,
}

impl TrapClass {
    pub const ALL: [TrapClass; 2] = [TrapClass::Timer, TrapClass::External];

    /// Map a supervisor interrupt code onto a routable class.
    pub const fn from_interrupt_code(code: usize) -> Option<Self> {
        match code {
            interrupt::SUPERVISOR_TIMER => Some(TrapClass::Timer),
            interrupt::SUPERVISOR_EXTERNAL => Some(TrapClass::External),
            _ => None,
        }
    }

    const fn slot(self) -> usize {
        match self {
            TrapClass::Timer => 0,
            TrapClass::External => 1,
        }
    }
}

impl fmt::Display for TrapClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrapClass::Timer => f.write_str("timer"),
            TrapClass::External => f.write_str("external"),
        }
    }
}

/// Proof that a handler for `class` is installed. Required to unmask it.
#[derive(Debug)]
pub struct Armed {
    class: TrapClass,
}

impl Armed {
    pub fn class(&self) -> TrapClass {
        self.class
    }
}

/// CPU-level interrupt configuration used during boot.
pub trait InterruptControl {
    /// Point the trap vector at the trap-entry stub.
    fn install_trap_vector(&mut self);

    /// Read the vector back and check it points at the trap-entry stub.
    fn trap_vector_installed(&self) -> bool;

    /// Unmask one interrupt source. Only callable with a handler in place.
    fn unmask(&mut self, source: Armed);

    /// Globally enable interrupts on this hart.
    fn enable_interrupts(&mut self);
}

pub struct HandlerRegistry {
    slots: [Once<&'static dyn TrapHandler>; 2],
}

/// The registry consulted by every trap.
pub static HANDLERS: HandlerRegistry = HandlerRegistry::new();

impl HandlerRegistry {
    pub const fn new() -> Self {
        Self {
            slots: [Once::new(), Once::new()],
        }
    }

    /// Install `handler` for `class`. A class can be registered once.
    pub fn register(&self, class: TrapClass, handler: &'static dyn TrapHandler) -> Result<()> {
        let mut installed = false;
        self.slots[class.slot()].call_once(|| {
            installed = true;
            handler
        });

        if installed {
            Ok(())
        } else {
            Err(KernelError::HandlerAlreadyRegistered(class))
        }
    }

    pub fn handler(&self, class: TrapClass) -> Option<&'static dyn TrapHandler> {
        self.slots[class.slot()].get().copied()
    }

    pub fn is_registered(&self, class: TrapClass) -> bool {
        self.handler(class).is_some()
    }

    /// Hand out the token that allows `class` to be unmasked.
    pub fn arm(&self, class: TrapClass) -> Result<Armed> {
        if self.is_registered(class) {
            Ok(Armed { class })
        } else {
            Err(KernelError::HandlerMissing(class))
        }
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use core::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    static FIRST_CALLS: AtomicUsize = AtomicUsize::new(0);
    static SECOND_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn first(_: &TrapFrame) {
        FIRST_CALLS.fetch_add(1, Ordering::SeqCst);
    }

    fn second(_: &TrapFrame) {
        SECOND_CALLS.fetch_add(1, Ordering::SeqCst);
    }

    fn noop(_: &TrapFrame) {}

    #[test]
    fn new_registry_is_empty() {
        let registry = HandlerRegistry::new();
        for class in TrapClass::ALL {
            assert!(registry.handler(class).is_none());
        }
    }

    #[test]
    fn registration_is_per_class() {
        let registry = HandlerRegistry::new();
        registry.register(TrapClass::Timer, &noop).unwrap();

        assert!(registry.is_registered(TrapClass::Timer));
        assert!(!registry.is_registered(TrapClass::External));
    }

    #[test]
    fn second_registration_is_rejected_and_keeps_the_first() {
        let registry = HandlerRegistry::new();
        registry.register(TrapClass::External, &first).unwrap();

        assert_eq!(
            registry.register(TrapClass::External, &second),
            Err(KernelError::HandlerAlreadyRegistered(TrapClass::External))
        );

        let handler = registry.handler(TrapClass::External).unwrap();
        handler.handle(&TrapFrame::zeroed());
        assert_eq!(FIRST_CALLS.load(Ordering::SeqCst), 1);
        assert_eq!(SECOND_CALLS.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn arming_requires_a_handler() {
        let registry = HandlerRegistry::new();
        assert_eq!(
            registry.arm(TrapClass::Timer).unwrap_err(),
            KernelError::HandlerMissing(TrapClass::Timer)
        );

        registry.register(TrapClass::Timer, &noop).unwrap();
        assert_eq!(registry.arm(TrapClass::Timer).unwrap().class(), TrapClass::Timer);
        assert!(registry.arm(TrapClass::External).is_err());
    }

    #[test]
    fn only_supervisor_timer_and_external_codes_are_routable() {
        assert_eq!(TrapClass::from_interrupt_code(5), Some(TrapClass::Timer));
        assert_eq!(TrapClass::from_interrupt_code(9), Some(TrapClass::External));
        assert_eq!(TrapClass::from_interrupt_code(7), None);
        assert_eq!(TrapClass::from_interrupt_code(1), None);
        assert_eq!(TrapClass::from_interrupt_code(11), None);
    }

    #[test]
    fn errors_name_the_class() {
        assert_eq!(
            KernelError::HandlerMissing(TrapClass::External).to_string(),
            "no external handler registered, refusing to unmask the source"
        );
        assert_eq!(
            KernelError::HandlerAlreadyRegistered(TrapClass::Timer).to_string(),
            "a timer handler is already registered"
        );
    }
}
