//! Build script for the storefront crate.
//!
//! Fingerprints the stylesheet so it can be served under a content-addressed
//! name and cached forever.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Length of the hex fingerprint embedded in the file name.
const HASH_LEN: usize = 8;

fn main() {
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by Cargo"));
    fingerprint_css(&manifest_dir);
}

/// Hash `static/css/main.css` and write `static/css/derived/main.<hash>.css`.
///
/// Exposes the hash as `CSS_HASH` for `env!`.
fn fingerprint_css(manifest_dir: &Path) {
    let css_path = manifest_dir.join("static/css/main.css");
    println!("cargo:rerun-if-changed={}", css_path.display());

    let content = match fs::read(&css_path) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read main.css: {e}");
            println!("cargo:rustc-env=CSS_HASH=");
            return;
        }
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let hash = &digest[..HASH_LEN];
    println!("cargo:rustc-env=CSS_HASH={hash}");

    let derived_dir = manifest_dir.join("static/css/derived");
    fs::create_dir_all(&derived_dir).expect("failed to create static/css/derived");
    fs::write(derived_dir.join(format!("main.{hash}.css")), &content)
        .expect("failed to write fingerprinted stylesheet");
}
