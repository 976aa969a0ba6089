use std::env;
use std::path::Path;
use std::process::Command;

const SHA_VAR: &str = "SPENDWATCH_BUILD_SHA";

// Release tarballs carry no .git, so packagers pass the revision in.
fn main() {
    println!("cargo:rerun-if-env-changed={SHA_VAR}");

    let sha = match env::var(SHA_VAR) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => git_revision().unwrap_or_else(|| "unknown".to_string()),
    };
    println!("cargo:rustc-env={SHA_VAR}={sha}");
}

fn git_revision() -> Option<String> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").ok()?;
    let workspace = Path::new(&manifest_dir).parent()?;

    let head = workspace.join(".git").join("HEAD");
    if head.exists() {
        println!("cargo:rerun-if-changed={}", head.display());
    }

    let out = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(["rev-parse", "--short=10", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8(out.stdout).ok()?.trim().to_string();
    (!sha.is_empty()).then_some(sha)
}
