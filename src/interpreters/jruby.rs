use std::path::{Path, PathBuf};

use crate::interpreter::{Interpreter, LaunchCommand};
use crate::layout::InstallLayout;

const JRUBY_JAR: &str = "jruby-complete.jar";

pub struct JRubyInterpreter {
    java_binary: PathBuf,
}

impl JRubyInterpreter {
    pub fn new(java_binary: impl Into<PathBuf>) -> Self {
        Self {
            java_binary: java_binary.into(),
        }
    }
}

impl Interpreter for JRubyInterpreter {
    fn name(&self) -> &'static str {
        "jruby"
    }

    fn nice_name(&self) -> &'static str {
        "JRuby"
    }

    fn extension(&self) -> &'static str {
        ".rb"
    }

    fn binary(&self, _layout: &InstallLayout) -> PathBuf {
        self.java_binary.clone()
    }

    fn command_for(&self, layout: &InstallLayout, script: &Path) -> LaunchCommand {
        let jar = layout.interpreter_dir(self.name()).join(JRUBY_JAR);
        LaunchCommand::new(self.binary(layout))
            .arg("-jar")
            .arg(jar.to_string_lossy())
            .arg(script.to_string_lossy())
    }

    fn content_template(&self) -> &'static str {
        "# Ruby script\nputs \"Hello from JRuby\"\n"
    }
}
