use std::fs;

fn main() {
    let build_time = chrono::Utc::now().to_rfc3339();

    // Cargo.lock is absent on the very first build; fall back to "unknown".
    let axum_version = fs::read_to_string("Cargo.lock")
        .ok()
        .and_then(|cargo_lock| {
            cargo_lock
                .lines()
                .collect::<Vec<_>>()
                .windows(3)
                .find(|window| {
                    window[0].trim() == "[[package]]"
                        && window[1].trim() == "name = \"axum\""
                        && window[2].trim().starts_with("version = ")
                })
                .and_then(|window| {
                    window[2]
                        .trim()
                        .strip_prefix("version = ")
                        .map(|v| v.trim_matches('"').to_string())
                })
        })
        .unwrap_or_else(|| "unknown".to_string());

    let rust_version = std::process::Command::new("rustc")
        .arg("--version")
        .output()
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=BUILD_TIME={build_time}");
    println!("cargo:rustc-env=AXUM_VERSION=axum {axum_version}");
    println!("cargo:rustc-env=RUSTC_VERSION={rust_version}");
    println!("cargo:rerun-if-changed=Cargo.lock");
}
