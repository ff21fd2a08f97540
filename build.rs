use std::env;
use std::process::Command;

const PREFIX: &str = "FINANCE_TRACKER_BUILD";
const UNKNOWN: &str = "unknown";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");

    let hash = command_output("git", &["rev-parse", "--short", "HEAD"])
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string());
    emit("HASH", &hash);

    let status = match command_output("git", &["status", "--porcelain"]) {
        Some(changes) if changes.is_empty() => "clean",
        Some(_) => "dirty",
        None => UNKNOWN,
    };
    emit("STATUS", status);

    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    emit("TIMESTAMP", &timestamp);

    emit("TARGET", &env::var("TARGET").unwrap_or_else(|_| UNKNOWN.to_string()));
    emit("PROFILE", &env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.to_string()));

    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let version = command_output(&rustc, &["--version"]).unwrap_or_else(|| UNKNOWN.to_string());
    emit("RUSTC", &version);
}

fn emit(key: &str, value: &str) {
    println!("cargo:rustc-env={PREFIX}_{key}={value}");
}

/// Trimmed stdout of a successful command, `None` if it could not run or failed.
fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
