use thiserror::Error;

use crate::kernel::registry::TrapClass;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    #[error("a {0} handler is already registered")]
    HandlerAlreadyRegistered(TrapClass),

    #[error("no {0} handler registered, refusing to unmask the source")]
    HandlerMissing(TrapClass),

    #[error("trap vector did not read back as installed")]
    TrapVectorMismatch,

    #[error("a kernel logger is already installed")]
    LoggerAlreadyInstalled,
}

pub type Result<T> = core::result::Result<T, KernelError>;
