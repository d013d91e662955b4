use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=EQCATALOG_DATA_HINT");

    let hint = env::var("EQCATALOG_DATA_HINT")
        .ok()
        .or_else(|| env::var("CARGO_MANIFEST_DIR").ok().map(|dir| format!("{dir}/data")));

    if let Some(raw_hint) = hint {
        let candidate = PathBuf::from(raw_hint);
        let canonical = candidate.canonicalize().unwrap_or(candidate);

        println!("cargo:rustc-env=EQCATALOG_DATA_HINT={}", canonical.display());
    }
}
