use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};
use tempfile::TempDir;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Serializes tests that read or mutate process environment variables.
pub fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner())
}

/// Set or clear a process env var. Callers must hold `env_lock`.
pub fn set_env(key: &str, value: Option<&str>) {
    unsafe {
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }
}

/// The archive shipped with the crate.
pub fn shipped_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Circular flux-surface outline at `rho`, 8 poloidal points.
pub fn surface_json(rho: f64, r0: f64, a: f64) -> Value {
    let n = 8;
    let mut r = Vec::with_capacity(n);
    let mut z = Vec::with_capacity(n);
    for k in 0..n {
        let theta = 2.0 * std::f64::consts::PI * k as f64 / n as f64;
        r.push(r0 + a * rho * theta.cos());
        z.push(-a * rho * theta.sin());
    }
    json!({"rho": rho, "r": r, "z": z})
}

/// Profile sampled on an evenly spaced rho grid over [0, 1].
pub fn profile_json(name: &str, values: &[f64]) -> Value {
    let denom = values.len().saturating_sub(1).max(1) as f64;
    let rho: Vec<f64> = (0..values.len()).map(|i| i as f64 / denom).collect();
    json!({"name": name, "rho": rho, "values": values})
}

pub fn equilibrium_json(
    name: &str,
    step: usize,
    pressure: Option<Value>,
    iota: Option<Value>,
    current: Option<Value>,
) -> Value {
    let mut eq = json!({
        "name": name,
        "step": step,
        "surfaces": [surface_json(0.5, 3.0, 1.0), surface_json(1.0, 3.0, 1.0)],
    });
    if let Some(profile) = pressure {
        eq["pressure"] = profile;
    }
    if let Some(profile) = iota {
        eq["iota"] = profile;
    }
    if let Some(profile) = current {
        eq["current"] = profile;
    }
    eq
}

/// Single-equilibrium document with a pressure profile and no iota/current.
pub fn single_document(name: &str) -> Value {
    json!({
        "format_version": "equilibrium_document_v1",
        "kind": "equilibrium",
        "equilibrium": equilibrium_json(
            name,
            0,
            Some(profile_json("pressure", &[1000.0, 500.0, 0.0])),
            None,
            None,
        ),
    })
}

/// Family document of `steps` snapshots with pressure and iota profiles.
pub fn family_document(name: &str, steps: usize) -> Value {
    let equilibria: Vec<Value> = (0..steps)
        .map(|step| {
            equilibrium_json(
                name,
                step,
                Some(profile_json(
                    "pressure",
                    &[500.0 * (step + 1) as f64, 100.0, 0.0],
                )),
                Some(profile_json("iota", &[0.4, 0.5, 0.6])),
                None,
            )
        })
        .collect();
    json!({
        "format_version": "equilibrium_document_v1",
        "kind": "equilibrium_family",
        "equilibria": equilibria,
    })
}

pub fn write_document(root: &Path, file_name: &str, document: &Value) -> Result<PathBuf> {
    let path = root.join(file_name);
    let data = serde_json::to_string_pretty(document)?;
    fs::write(&path, data).with_context(|| format!("writing fixture {}", path.display()))?;
    Ok(path)
}

/// Fresh archive directory holding one single-equilibrium document per name.
pub fn archive_with(names: &[&str]) -> Result<TempDir> {
    let dir = TempDir::new().context("failed to allocate archive dir")?;
    for name in names {
        write_document(
            dir.path(),
            &format!("{name}_output.h5"),
            &single_document(name),
        )?;
    }
    Ok(dir)
}
