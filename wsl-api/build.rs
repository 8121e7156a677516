//! Stamps wsl-api with the commit, build time and profile it was built from
//!
//! Exposed to the crate as `GIT_HASH`, `BUILD_TIMESTAMP` and `BUILD_PROFILE`.
//! There are no `rerun-if-changed` directives, so Cargo reruns this on every
//! build.

use std::process::Command;

fn main() {
    // e.g. "1a2b3c4d" or "1a2b3c4d-dirty" with uncommitted changes
    let commit = git(&["describe", "--always", "--dirty", "--abbrev=8"])
        .unwrap_or_else(|| "unknown".into());
    let built = chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false);
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".into());

    for (name, value) in [
        ("GIT_HASH", commit),
        ("BUILD_TIMESTAMP", built),
        ("BUILD_PROFILE", profile),
    ] {
        println!("cargo:rustc-env={}={}", name, value);
    }
}

/// Trimmed stdout of a successful git command
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string()).filter(|s| !s.is_empty())
}
