// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Vision Aerial <info@visionaerial.com>

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const LINKER_SCRIPT: &str = "linker_scripts/rp2040.x";

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let workspace = manifest_dir.parent().unwrap();

    install_memory_x(workspace, &out_dir);
    export_version(workspace);

    println!("cargo:rerun-if-changed=build.rs");
}

/// cortex-m-rt's `link.x` includes `memory.x` from the search path.
fn install_memory_x(workspace: &Path, out_dir: &Path) {
    let script = workspace.join(LINKER_SCRIPT);
    fs::copy(&script, out_dir.join("memory.x"))
        .unwrap_or_else(|e| panic!("cannot copy {}: {e}", script.display()));

    println!("cargo:rustc-link-search={}", out_dir.display());
    for arg in ["--nmagic", "-Tlink.x", "-Tdefmt.x"] {
        println!("cargo:rustc-link-arg={arg}");
    }
    println!("cargo:rerun-if-changed={}", script.display());
}

/// Firmware version for the boot banner, from the workspace `VERSION` file.
fn export_version(workspace: &Path) {
    let file = workspace.join("VERSION");
    let version = fs::read_to_string(&file)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", file.display()));
    println!("cargo:rustc-env=YAWMECH_VERSION={}", version.trim());
    println!("cargo:rerun-if-changed={}", file.display());
}
