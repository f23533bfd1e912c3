use core::{fmt::Write, panic::PanicInfo};

use riscv::register::{scause, sepc, sie, sstatus, stval};

use crate::{
    arch::trap::TrapCause,
    config::CONSOLE,
    drivers::console::{Console, ConsoleWriter},
};

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    unsafe {
        // Lock down interrupts deterministically
        sstatus::clear_sie();
        sie::clear_sext();
        sie::clear_stimer();
        sie::clear_ssoft();
    }

    CONSOLE.puts("=== PANIC ===\n");

    let mut out = ConsoleWriter::new(&CONSOLE);
    if let Some(location) = info.location() {
        let _ = writeln!(out, "File: {}", location.file());
        let _ = writeln!(out, "Line: {}", location.line());
    }
    let _ = writeln!(out, "Message: {}", info.message());

    // Last trap, if any, for context
    let cause = TrapCause::from_bits(scause::read().bits());
    let _ = writeln!(out, "Raw scause bits: {:#x}", cause.bits());
    let _ = writeln!(
        out,
        "Cause: {} (code {}): {}",
        if cause.is_interrupt() { "Interrupt" } else { "Exception" },
        cause.code(),
        cause.name()
    );
    let _ = writeln!(out, "sepc (PC): {:#x}", sepc::read());
    let _ = writeln!(out, "stval    : {:#x}", stval::read());

    loop {
        riscv::asm::wfi();
    }
}
