use std::path::{Path, PathBuf};

use crate::interpreter::{Interpreter, LaunchCommand};
use crate::layout::InstallLayout;

pub struct LuaInterpreter;

impl LuaInterpreter {
    pub fn new() -> Self {
        Self {}
    }
}

impl Interpreter for LuaInterpreter {
    fn name(&self) -> &'static str {
        "lua"
    }

    fn nice_name(&self) -> &'static str {
        "Lua 5.1"
    }

    fn extension(&self) -> &'static str {
        ".lua"
    }

    fn binary(&self, layout: &InstallLayout) -> PathBuf {
        layout.interpreter_dir(self.name()).join("bin").join("lua")
    }

    fn command_for(&self, layout: &InstallLayout, script: &Path) -> LaunchCommand {
        // Modules shipped in the extras root are found through LUA_PATH
        let module_pattern = layout.extras_dir(self.name()).join("?.lua");
        LaunchCommand::new(self.binary(layout))
            .env("LUA_PATH", format!("{};;", module_pattern.to_string_lossy()))
            .arg(script.to_string_lossy())
    }

    fn content_template(&self) -> &'static str {
        "-- Lua script\nprint(\"Hello from Lua\")\n"
    }
}
