//! Build script for fyyur-web
//!
//! Stamps the binary with what the startup banner reports: the commit it
//! was built from (suffixed `-dirty` when the work tree had local edits),
//! when it was built, and the cargo profile.

use std::process::Command;

/// Run a git command and return its trimmed stdout, if it succeeded
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

fn main() {
    let git_hash = match git(&["rev-parse", "--short=8", "HEAD"]) {
        Some(hash) => {
            let dirty = git(&["status", "--porcelain", "--untracked-files=no"])
                .is_some_and(|status| !status.is_empty());
            if dirty {
                format!("{}-dirty", hash)
            } else {
                hash
            }
        }
        None => "unknown".to_string(),
    };

    let build_timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    for (key, value) in [
        ("GIT_HASH", git_hash),
        ("BUILD_TIMESTAMP", build_timestamp),
        ("BUILD_PROFILE", profile),
    ] {
        println!("cargo:rustc-env={}={}", key, value);
    }
}
