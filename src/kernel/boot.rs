//! Startup ordering.
//!
//! banner, then timer init (vector install and readback, handler
//! registration, enable), then confirmation. The timer cannot be unmasked
//! before its handler exists; see `registry::Armed`.

use log::info;

use crate::{
    drivers::console::Console,
    error::Result,
    kernel::{
        registry::{HandlerRegistry, InterruptControl},
        timer::{SystemTimer, TimerHardware},
    },
};

pub const BANNER: &str = "\
======================================
MAGI SYSTEM STARTUP SEQUENCE INITIATED
======================================
";

pub const CONFIRMATION: &str = "Trap vector installed, timer online. Pattern Blue.\n";

pub fn run<C, H, T, I>(
    console: &C,
    registry: &HandlerRegistry,
    timer: &'static SystemTimer<H, T>,
    cpu: &mut I,
) -> Result<()>
where
    C: Console + ?Sized,
    H: TimerHardware + Sync + 'static,
    T: Console + Sync + ?Sized + 'static,
    I: InterruptControl,
{
    console.puts(BANNER);

    timer.init(registry, cpu)?;

    console.puts(CONFIRMATION);
    info!("boot complete");
    Ok(())
}
