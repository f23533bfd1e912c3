use std::{env, fs, path::PathBuf};

fn main() {
    // Rebuild if assembly or the memory map changes
    println!("cargo:rerun-if-changed=trap.S");
    println!("cargo:rerun-if-changed=memory.x");

    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    if target_arch != "riscv64" {
        // Host builds only run the unit tests; there is nothing to assemble or link.
        return;
    }

    // riscv-rt's link.x includes memory.x from the linker search path
    let out = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::copy("memory.x", out.join("memory.x")).expect("copy memory.x");
    println!("cargo:rustc-link-search={}", out.display());

    // Compile trap.S for the hard-float ABI used by riscv64gc
    cc::Build::new()
        .file("trap.S")
        .flag("-march=rv64gc")
        .flag("-mabi=lp64d")
        .compile("trap");
}
