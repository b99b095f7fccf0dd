//! Build script for VFO firmware
//!
//! Adds the crate root to the linker search path so a board-specific
//! `memory.x` placed next to `Cargo.toml` takes precedence.

fn main() {
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    if let Ok(dir) = std::env::var("CARGO_MANIFEST_DIR") {
        println!("cargo:rustc-link-search={dir}");
    }
}
