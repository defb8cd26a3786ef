use std::path::{Path, PathBuf};

use crate::interpreter::{Interpreter, LaunchCommand};
use crate::layout::InstallLayout;

pub struct PythonInterpreter;

impl PythonInterpreter {
    pub fn new() -> Self {
        Self {}
    }
}

impl Interpreter for PythonInterpreter {
    fn name(&self) -> &'static str {
        "python"
    }

    fn nice_name(&self) -> &'static str {
        "Python 2.6"
    }

    fn extension(&self) -> &'static str {
        ".py"
    }

    fn binary(&self, layout: &InstallLayout) -> PathBuf {
        layout.interpreter_dir(self.name()).join("bin").join("python")
    }

    fn command_for(&self, layout: &InstallLayout, script: &Path) -> LaunchCommand {
        let home = layout.interpreter_dir(self.name());
        let extras = layout.extras_dir(self.name());
        LaunchCommand::new(self.binary(layout))
            .env("PYTHONHOME", home.to_string_lossy())
            .env("PYTHONPATH", extras.to_string_lossy())
            .arg("-u")
            .arg(script.to_string_lossy())
    }

    fn content_template(&self) -> &'static str {
        "# Python script\nprint(\"Hello from Python\")\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_command_sets_home_and_path() {
        let layout = InstallLayout::new("/opt/interp", "/opt/extras");
        let command = PythonInterpreter::new().command_for(&layout, Path::new("hello.py"));

        assert_eq!(command.program, PathBuf::from("/opt/interp/python/bin/python"));
        assert_eq!(command.args, vec!["-u".to_string(), "hello.py".to_string()]);
        assert_eq!(command.env.get("PYTHONHOME").map(String::as_str), Some("/opt/interp/python"));
        assert_eq!(command.env.get("PYTHONPATH").map(String::as_str), Some("/opt/extras/python"));
    }
}
