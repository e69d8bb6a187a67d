//! Puts `memory.x` on the linker search path for riscv-rt's `link.x`.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo"));

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=memory.x");

    fs::copy(manifest_dir.join("memory.x"), out_dir.join("memory.x"))
        .expect("Failed to copy memory.x");

    println!("cargo:rustc-link-search={}", out_dir.display());
}
