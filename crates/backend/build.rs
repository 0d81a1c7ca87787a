use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory the binary lands in: OUT_DIR is target/<profile>/build/backend-xxx/out
fn binary_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").ok()?);
    let profile = env::var("PROFILE").ok()?;
    out_dir
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let source_config = workspace_root.join("config.toml");

    let Some(target_dir) = binary_dir() else {
        println!("cargo:warning=cannot locate binary directory, config.toml not copied");
        return;
    };

    if !source_config.exists() {
        println!("cargo:warning=config.toml not found at {:?}, embedded defaults apply", source_config);
        return;
    }

    let dest_config = target_dir.join("config.toml");
    if let Err(e) = fs::copy(&source_config, &dest_config) {
        println!("cargo:warning=failed to copy config.toml: {}", e);
    }
}
