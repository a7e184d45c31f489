//! Stamps the binary with a local compile counter, timestamp and profile.

use std::fs;
use std::path::Path;

const COUNTER_FILE: &str = "build_number.txt";

fn next_build_number(counter: &Path) -> u64 {
    let previous = fs::read_to_string(counter)
        .ok()
        .and_then(|text| text.trim().parse::<u64>().ok())
        .unwrap_or(0);
    let next = previous + 1;

    if let Err(e) = fs::write(counter, next.to_string()) {
        println!("cargo:warning=shoplist: build counter not saved: {}", e);
    }
    next
}

fn main() {
    println!("cargo:rerun-if-changed=src");

    let build = next_build_number(Path::new(COUNTER_FILE));
    let compiled_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=SHOPLIST_BUILD_NUMBER={}", build);
    println!("cargo:rustc-env=SHOPLIST_BUILD_TIMESTAMP={}", compiled_at);
    println!("cargo:rustc-env=SHOPLIST_BUILD_PROFILE={}", profile);
}
