//! `log` backend that writes `[LEVEL][target] message` lines to a console.

use core::fmt::Write;

use log::{Log, Metadata, Record};

use crate::{
    config,
    drivers::console::{Console, ConsoleWriter},
    error::{KernelError, Result},
};

pub struct KernelLogger<C: 'static> {
    console: &'static C,
}

impl<C: Console + Sync + 'static> KernelLogger<C> {
    pub const fn new(console: &'static C) -> Self {
        Self { console }
    }
}

impl<C: Console + Sync + 'static> Log for KernelLogger<C> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= config::max_log_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let _ = writeln!(
            ConsoleWriter::new(self.console),
            "[{}][{}] {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

/// Install `logger` as the global `log` backend. Only the first call wins.
pub fn init(logger: &'static dyn Log) -> Result<()> {
    log::set_logger(logger).map_err(|_| KernelError::LoggerAlreadyInstalled)?;
    log::set_max_level(config::max_log_level());
    Ok(())
}
