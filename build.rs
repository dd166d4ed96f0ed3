use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    println!("cargo:rerun-if-changed=build.rs");

    // Host builds (unit tests) never link against cortex-m-rt.
    if env::var("CARGO_FEATURE_BOARD").is_err() {
        return;
    }

    let memory_src = manifest_dir.join("memory-stm32l4.x");

    // cortex-m-rt's link.x does `INCLUDE memory.x`, so expose the board script under that name.
    fs::copy(&memory_src, out_dir.join("memory.x")).expect("copy memory-stm32l4.x -> memory.x");

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed={}", memory_src.display());
}
