pub mod console;
pub mod mmio;
pub mod uart;
