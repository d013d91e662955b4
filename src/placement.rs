//! Compute-context placement for the load path.
//!
//! Deployment contract: deserializing an archive document is disk-read plus
//! decode work and must run on the general-purpose CPU context even when the
//! process default points at an accelerator. The loader wraps the codec call
//! in a [`CpuScope`]; callers never opt out. Nothing here is business logic —
//! the projection results are identical on any context.

use log::debug;
use std::cell::Cell;
use std::env;

/// Environment variable naming the ambient compute context (e.g. `cuda:0`).
/// Absent, empty, or `cpu` all mean the general-purpose context.
pub const COMPUTE_ENV_VAR: &str = "EQCATALOG_COMPUTE";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ComputeContext {
    Cpu,
    Accelerator(String),
}

thread_local! {
    static CPU_SCOPE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

impl ComputeContext {
    /// Ambient process default, read from `EQCATALOG_COMPUTE` on every call
    /// so tests and long-lived hosts see environment changes.
    pub fn process_default() -> ComputeContext {
        match env::var(COMPUTE_ENV_VAR) {
            Ok(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("cpu") {
                    ComputeContext::Cpu
                } else {
                    ComputeContext::Accelerator(trimmed.to_string())
                }
            }
            Err(_) => ComputeContext::Cpu,
        }
    }

    /// The context the current thread would execute on right now: CPU inside
    /// any [`CpuScope`], the process default otherwise.
    pub fn current() -> ComputeContext {
        if CPU_SCOPE_DEPTH.with(Cell::get) > 0 {
            ComputeContext::Cpu
        } else {
            ComputeContext::process_default()
        }
    }
}

/// RAII guard forcing CPU placement on the current thread until dropped.
///
/// Scopes nest; the override lifts when the outermost guard drops.
pub struct CpuScope {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl CpuScope {
    pub fn enter() -> CpuScope {
        CPU_SCOPE_DEPTH.with(|depth| depth.set(depth.get() + 1));
        if let ComputeContext::Accelerator(name) = ComputeContext::process_default() {
            debug!("forcing CPU placement for archive load (process default: {name})");
        }
        CpuScope {
            _not_send: std::marker::PhantomData,
        }
    }
}

impl Drop for CpuScope {
    fn drop(&mut self) {
        CPU_SCOPE_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}
