use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::layout::InstallLayout;

/// Name of the interpreter provided by the host OS rather than installed
/// under the layout roots. It is always reported installed.
pub const SHELL_INTERPRETER_NAME: &str = "sh";

/// Separator that starts a script's extension
pub const EXTENSION_SEPARATOR: char = '.';

/// What a caller needs to start a script. Building one never touches the
/// filesystem or spawns anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

impl LaunchCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: &str, value: impl Into<String>) -> Self {
        self.env.insert(key.to_string(), value.into());
        self
    }

    /// Renders the command as a single shell-ish line for display
    pub fn display_line(&self) -> String {
        let mut line = String::new();
        for (key, value) in &self.env {
            line.push_str(&format!("{}={} ", key, value));
        }
        line.push_str(&self.program.to_string_lossy());
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// The Interpreter trait is implemented once per supported scripting language.
/// The registry only reads `name` and `extension`; everything else belongs to
/// the adapter.
pub trait Interpreter: Send + Sync {
    /// Unique identifier, also the directory name under the install roots
    fn name(&self) -> &'static str;

    /// Human readable name for pickers and menus
    fn nice_name(&self) -> &'static str;

    /// Script suffix including the leading separator, e.g. ".py"
    fn extension(&self) -> &'static str;

    /// Location of the interpreter executable
    fn binary(&self, layout: &InstallLayout) -> PathBuf;

    /// Builds the command that runs `script` with this interpreter
    fn command_for(&self, layout: &InstallLayout, script: &Path) -> LaunchCommand {
        LaunchCommand::new(self.binary(layout)).arg(script.to_string_lossy())
    }

    /// Starter content for a freshly created script
    fn content_template(&self) -> &'static str {
        ""
    }
}

impl std::fmt::Debug for dyn Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("name", &self.name())
            .field("extension", &self.extension())
            .finish()
    }
}

/// Extracts the extension of a script name: everything from the last `.`
/// onward, separator included. Only the final suffix counts, so
/// "archive.tar.gz" yields ".gz". Returns `None` when there is no `.`.
pub fn script_extension(script_name: &str) -> Option<&str> {
    script_name
        .rfind(EXTENSION_SEPARATOR)
        .map(|index| &script_name[index..])
}
