//! Stamps the vibevault-api binary with its build identity
//!
//! `main` logs these at startup: `GIT_HASH`, `BUILD_TIMESTAMP` (UTC, RFC 3339)
//! and `BUILD_PROFILE`.

use std::env;
use std::process::Command;

/// Short commit hash, or `VIBEVAULT_GIT_HASH` when building outside a checkout
fn git_hash() -> String {
    if let Ok(hash) = env::var("VIBEVAULT_GIT_HASH") {
        return hash;
    }

    let output = match Command::new("git").args(["rev-parse", "--short=8", "HEAD"]).output() {
        Ok(output) if output.status.success() => output,
        _ => return "unknown".to_string(),
    };
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn main() {
    let built_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={}", git_hash());
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", built_at);
    println!("cargo:rustc-env=BUILD_PROFILE={}", profile);

    println!("cargo:rerun-if-env-changed=VIBEVAULT_GIT_HASH");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../.git/HEAD");
}
