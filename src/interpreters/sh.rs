use std::path::PathBuf;

use crate::interpreter::{Interpreter, SHELL_INTERPRETER_NAME};
use crate::layout::InstallLayout;

/// The host's shell. It is never unpacked under the install roots.
pub struct ShInterpreter {
    shell_binary: PathBuf,
}

impl ShInterpreter {
    pub fn new(shell_binary: impl Into<PathBuf>) -> Self {
        Self {
            shell_binary: shell_binary.into(),
        }
    }
}

impl Interpreter for ShInterpreter {
    fn name(&self) -> &'static str {
        SHELL_INTERPRETER_NAME
    }

    fn nice_name(&self) -> &'static str {
        "Shell"
    }

    fn extension(&self) -> &'static str {
        ".sh"
    }

    fn binary(&self, _layout: &InstallLayout) -> PathBuf {
        self.shell_binary.clone()
    }

    fn content_template(&self) -> &'static str {
        "#!/bin/sh\necho \"Hello from the shell\"\n"
    }
}
