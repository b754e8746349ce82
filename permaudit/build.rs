use std::process::Command;

fn main() {
    if let Some(hash) = git_hash() {
        println!("cargo:rustc-env=PERMAUDIT_GIT_HASH={hash}");
    }

    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/refs/");
}

/// Short commit hash, suffixed with `-dirty` when the tree has changes.
fn git_hash() -> Option<String> {
    let head = git(&["rev-parse", "--short", "HEAD"])?;
    let hash = head.trim();
    if hash.is_empty() {
        return None;
    }

    let dirty = git(&["status", "--porcelain"]).is_some_and(|status| !status.trim().is_empty());
    Some(if dirty {
        format!("{hash}-dirty")
    } else {
        hash.to_string()
    })
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).into_owned())
}
