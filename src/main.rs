#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod kernel_main {
    use log::error;
    use riscv_rt::entry;

    use magios::{
        arch::{halt, timer::SbiTimer, wait_for_interrupt, SupervisorCpu},
        config::{self, CONSOLE},
        drivers::{
            console::Console,
            uart::{Ns16550, Uart},
        },
        kernel::{boot, registry::HANDLERS, timer::SystemTimer},
        logging::{self, KernelLogger},
    };

    static SYSTEM_TIMER: SystemTimer<SbiTimer, Uart<Ns16550>> =
        SystemTimer::new(SbiTimer, &CONSOLE, config::TICK_INTERVAL, config::TICK_MS);

    static LOGGER: KernelLogger<Uart<Ns16550>> = KernelLogger::new(&CONSOLE);

    #[entry]
    fn main() -> ! {
        if logging::init(&LOGGER).is_err() {
            CONSOLE.puts("logger already installed\n");
        }

        let mut cpu = SupervisorCpu;
        if let Err(err) = boot::run(&CONSOLE, &HANDLERS, &SYSTEM_TIMER, &mut cpu) {
            error!("boot failed: {}", err);
            halt();
        }

        loop {
            wait_for_interrupt();
        }
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("magios is a bare-metal kernel; build it with --target riscv64gc-unknown-none-elf");
}
