//! Build script for storefront crate.
//!
//! Computes content hashes for static assets so templates can version their
//! URLs (`main.css?v=<hash>`) and let browsers cache them indefinitely.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Assets to hash, with the environment variable that receives the hash.
const ASSETS: &[(&str, &str)] = &[
    ("static/css/main.css", "CSS_HASH"),
    ("static/js/storefront.js", "JS_HASH"),
];

fn main() {
    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        println!("cargo:warning=CARGO_MANIFEST_DIR not set, skipping asset hashes");
        for (_, var) in ASSETS {
            println!("cargo:rustc-env={var}=");
        }
        return;
    };

    for (path, var) in ASSETS {
        hash_asset(&Path::new(&manifest_dir).join(path), var);
    }
}

/// Hash an asset and expose the first 8 hex chars of its SHA-256 as `var`.
fn hash_asset(path: &Path, var: &str) {
    // Tell Cargo to rerun if the asset changes
    println!("cargo:rerun-if-changed={}", path.display());

    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read {}: {e}", path.display());
            println!("cargo:rustc-env={var}=");
            return;
        }
    };

    let mut hasher = Sha256::new();
    hasher.update(&content);
    let hash = format!("{:x}", hasher.finalize());

    println!("cargo:rustc-env={var}={}", &hash[..8]);
}
