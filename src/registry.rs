use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace};

use crate::interpreter::{script_extension, Interpreter, SHELL_INTERPRETER_NAME};
use crate::layout::InstallLayout;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Interpreter name must not be empty")]
    EmptyName,

    #[error("Interpreter {0:?} is already registered")]
    DuplicateName(String),
}

/// Collects interpreters in registration order. Once built, the catalog
/// can no longer change.
pub struct RegistryBuilder {
    layout: InstallLayout,
    catalog: Vec<Arc<dyn Interpreter>>,
    by_name: HashMap<&'static str, usize>,
}

impl RegistryBuilder {
    pub fn new(layout: InstallLayout) -> Self {
        Self {
            layout,
            catalog: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    pub fn register(&mut self, interpreter: Arc<dyn Interpreter>) -> Result<(), RegistryError> {
        let name = interpreter.name();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.by_name.contains_key(name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }

        debug!("Registering interpreter {} ({})", name, interpreter.extension());
        self.by_name.insert(name, self.catalog.len());
        self.catalog.push(interpreter);
        Ok(())
    }

    pub fn build(self) -> InterpreterRegistry {
        InterpreterRegistry {
            layout: self.layout,
            catalog: self.catalog,
            by_name: self.by_name,
        }
    }
}

/// Immutable catalog of interpreters plus the layout used to decide which
/// of them are installed. Share it behind an `Arc`; every query takes `&self`.
pub struct InterpreterRegistry {
    layout: InstallLayout,
    catalog: Vec<Arc<dyn Interpreter>>,
    by_name: HashMap<&'static str, usize>,
}

impl InterpreterRegistry {
    pub fn layout(&self) -> &InstallLayout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Reports whether `name` is installed. The shell always is; anything
    /// else needs a file or directory under one of the layout roots.
    /// Not cached: each call probes the filesystem again.
    pub fn is_installed(&self, name: &str) -> bool {
        if name == SHELL_INTERPRETER_NAME {
            return true;
        }
        let installed = self.layout.has_install(name);
        trace!("Interpreter {} installed: {}", name, installed);
        installed
    }

    /// Every known interpreter, in registration order
    pub fn list_all(&self) -> &[Arc<dyn Interpreter>] {
        &self.catalog
    }

    pub fn list_installed(&self) -> Vec<Arc<dyn Interpreter>> {
        self.partition_by_install(true)
    }

    pub fn list_not_installed(&self) -> Vec<Arc<dyn Interpreter>> {
        self.partition_by_install(false)
    }

    fn partition_by_install(&self, installed: bool) -> Vec<Arc<dyn Interpreter>> {
        self.catalog
            .iter()
            .filter(|interpreter| self.is_installed(interpreter.name()) == installed)
            .cloned()
            .collect()
    }

    /// Exact, case-sensitive lookup by name
    pub fn find_by_name(&self, name: &str) -> Option<&Arc<dyn Interpreter>> {
        self.by_name.get(name).map(|&index| &self.catalog[index])
    }

    /// Picks the first interpreter, in catalog order, whose extension equals
    /// the script's last `.`-suffix. Names without a `.` resolve to nothing.
    pub fn find_by_extension(&self, script_name: &str) -> Option<&Arc<dyn Interpreter>> {
        let extension = script_extension(script_name)?;
        self.catalog
            .iter()
            .find(|interpreter| interpreter.extension() == extension)
    }
}
