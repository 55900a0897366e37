//! Build script for netglance-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates the Wi-Fi credentials at compile time
//! - Checks that the CYW43439 firmware blobs are present

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// 802.11 SSID limit
const MAX_SSID_LEN: usize = 32;

/// WPA2 passphrase limits
const MIN_PASS_LEN: usize = 8;
const MAX_PASS_LEN: usize = 63;

/// Radio firmware files expected under cyw43-firmware/
const RADIO_BLOBS: [&str; 2] = ["43439A0.bin", "43439A0_clm.bin"];

fn main() {
    setup_linker();
    validate_credentials();
    check_radio_blobs();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate NETGLANCE_WIFI_SSID / NETGLANCE_WIFI_PASS and pass them to rustc
fn validate_credentials() {
    println!("cargo:rerun-if-env-changed=NETGLANCE_WIFI_SSID");
    println!("cargo:rerun-if-env-changed=NETGLANCE_WIFI_PASS");

    let ssid = match env::var("NETGLANCE_WIFI_SSID") {
        Ok(ssid) => ssid,
        Err(_) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: NETGLANCE_WIFI_SSID is not set!                          ║\n\
                ║                                                                  ║\n\
                ║  The firmware joins a fixed network chosen at build time:        ║\n\
                ║                                                                  ║\n\
                ║    NETGLANCE_WIFI_SSID=MyNetwork \\                               ║\n\
                ║    NETGLANCE_WIFI_PASS=secret123 \\                               ║\n\
                ║    cargo build -p netglance-firmware --release                   ║\n\
                ║                                                                  ║\n\
                ║  Leave NETGLANCE_WIFI_PASS unset for an open network.            ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n"
            );
        }
    };
    let pass = env::var("NETGLANCE_WIFI_PASS").unwrap_or_default();

    let errors = credential_errors(&ssid, &pass);
    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid Wi-Fi credentials                                ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    // An unset passphrase still has to exist for env!()
    println!("cargo:rustc-env=NETGLANCE_WIFI_PASS={}", pass);

    if pass.is_empty() {
        println!("cargo:warning=NETGLANCE_WIFI_PASS is empty, joining '{}' as an open network", ssid);
    }
}

/// Check credential lengths against the 802.11/WPA2 limits
fn credential_errors(ssid: &str, pass: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if ssid.is_empty() {
        errors.push("SSID must not be empty".to_string());
    }
    if ssid.len() > MAX_SSID_LEN {
        errors.push(format!(
            "SSID is {} bytes, limit is {}",
            ssid.len(),
            MAX_SSID_LEN
        ));
    }
    if !pass.is_empty() && !(MIN_PASS_LEN..=MAX_PASS_LEN).contains(&pass.len()) {
        errors.push(format!(
            "passphrase must be empty or {}-{} bytes (is {})",
            MIN_PASS_LEN,
            MAX_PASS_LEN,
            pass.len()
        ));
    }

    errors
}

/// Check that the CYW43439 firmware has been placed next to the crate
fn check_radio_blobs() {
    let dir = Path::new("cyw43-firmware");
    println!("cargo:rerun-if-changed=cyw43-firmware");

    let missing: Vec<&str> = RADIO_BLOBS
        .iter()
        .copied()
        .filter(|name| !dir.join(name).exists())
        .collect();

    if !missing.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: CYW43439 radio firmware not found!                       ║\n\
            ║                                                                  ║\n\
            ║  Copy the blobs from the embassy repository (cyw43-firmware/)    ║\n\
            ║  into netglance-firmware/cyw43-firmware/. Missing:               ║\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            missing
                .iter()
                .map(|name| format!("║    {:<62} ║", name))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}
