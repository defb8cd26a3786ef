use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::interpreter::Interpreter;
use crate::registry::InterpreterRegistry;

/// Snapshot of one interpreter as shown by `list` and `status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterpreterStatus {
    pub name: String,
    pub nice_name: String,
    pub extension: String,
    pub installed: bool,
    pub binary: PathBuf,
}

impl InterpreterStatus {
    pub fn new(registry: &InterpreterRegistry, interpreter: &dyn Interpreter, installed: bool) -> Self {
        Self {
            name: interpreter.name().to_string(),
            nice_name: interpreter.nice_name().to_string(),
            extension: interpreter.extension().to_string(),
            installed,
            binary: interpreter.binary(registry.layout()),
        }
    }

    /// Probes the filesystem for `interpreter` and records the result
    pub fn probe(registry: &InterpreterRegistry, interpreter: &dyn Interpreter) -> Self {
        let installed = registry.is_installed(interpreter.name());
        Self::new(registry, interpreter, installed)
    }
}

/// Probes every interpreter at once on the blocking pool. Results come back
/// in catalog order; a probe whose task dies counts as not installed.
pub async fn probe_all(registry: Arc<InterpreterRegistry>) -> Vec<InterpreterStatus> {
    let handles: Vec<_> = registry
        .list_all()
        .iter()
        .cloned()
        .map(|interpreter| {
            let registry = Arc::clone(&registry);
            tokio::task::spawn_blocking(move || InterpreterStatus::probe(&registry, interpreter.as_ref()))
        })
        .collect();

    let mut statuses = Vec::with_capacity(handles.len());
    for (handle, interpreter) in handles.into_iter().zip(registry.list_all()) {
        match handle.await {
            Ok(status) => statuses.push(status),
            Err(e) => {
                warn!("Install probe for {} failed: {}", interpreter.name(), e);
                statuses.push(InterpreterStatus::new(&registry, interpreter.as_ref(), false));
            }
        }
    }

    let installed = statuses.iter().filter(|status| status.installed).count();
    info!("Probed {} interpreters, {} installed", statuses.len(), installed);
    statuses
}
