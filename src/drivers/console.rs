//! Console trait for kernel output.
//!
//! Anything that can push bytes out (the UART, a test recorder) implements
//! `Console`. `ConsoleWriter` adapts it to `core::fmt::Write` so diagnostics
//! can be formatted without an allocator.

use core::fmt;

pub trait Console {
    /// Write every byte, in order. May block.
    fn write_bytes(&self, bytes: &[u8]);

    fn puts(&self, s: &str) {
        self.write_bytes(s.as_bytes());
    }
}

impl<C: Console + ?Sized> Console for &C {
    fn write_bytes(&self, bytes: &[u8]) {
        (**self).write_bytes(bytes);
    }
}

/// Wrapper for using a `Console` with `write!`/`writeln!`.
pub struct ConsoleWriter<'a, C: Console + ?Sized> {
    console: &'a C,
}

impl<'a, C: Console + ?Sized> ConsoleWriter<'a, C> {
    pub const fn new(console: &'a C) -> Self {
        Self { console }
    }
}

impl<C: Console + ?Sized> fmt::Write for ConsoleWriter<'_, C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.console.puts(s);
        Ok(())
    }
}
