use std::path::{Path, PathBuf};

use crate::interpreter::{Interpreter, LaunchCommand};
use crate::layout::InstallLayout;

const BSH_JAR: &str = "bsh-2.0b4.jar";

/// BeanShell runs on a JVM; the jar lives in the interpreter's install dir.
pub struct BshInterpreter {
    java_binary: PathBuf,
}

impl BshInterpreter {
    pub fn new(java_binary: impl Into<PathBuf>) -> Self {
        Self {
            java_binary: java_binary.into(),
        }
    }
}

impl Interpreter for BshInterpreter {
    fn name(&self) -> &'static str {
        "bsh"
    }

    fn nice_name(&self) -> &'static str {
        "BeanShell 2.0b4"
    }

    fn extension(&self) -> &'static str {
        ".bsh"
    }

    fn binary(&self, _layout: &InstallLayout) -> PathBuf {
        self.java_binary.clone()
    }

    fn command_for(&self, layout: &InstallLayout, script: &Path) -> LaunchCommand {
        let jar = layout.interpreter_dir(self.name()).join(BSH_JAR);
        LaunchCommand::new(self.binary(layout))
            .arg("-cp")
            .arg(jar.to_string_lossy())
            .arg("bsh.Interpreter")
            .arg(script.to_string_lossy())
    }

    fn content_template(&self) -> &'static str {
        "// BeanShell script\nprint(\"Hello from BeanShell\");\n"
    }
}
