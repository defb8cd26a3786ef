mod lua;
mod bsh;
mod python;
mod sh;
mod jruby;

pub use lua::LuaInterpreter;
pub use bsh::BshInterpreter;
pub use python::PythonInterpreter;
pub use sh::ShInterpreter;
pub use jruby::JRubyInterpreter;

use std::sync::Arc;

use crate::config::RegistryConfig;
use crate::registry::{InterpreterRegistry, RegistryBuilder, RegistryError};

/// Initialize the interpreter registry with the built-in interpreters
pub fn init_registry(config: &RegistryConfig) -> Result<InterpreterRegistry, RegistryError> {
    let mut builder = RegistryBuilder::new(config.layout());

    // Catalog order is the order shown to users
    builder.register(Arc::new(LuaInterpreter::new()))?;
    builder.register(Arc::new(BshInterpreter::new(&config.java_binary)))?;
    builder.register(Arc::new(PythonInterpreter::new()))?;
    builder.register(Arc::new(ShInterpreter::new(&config.shell_binary)))?;
    builder.register(Arc::new(JRubyInterpreter::new(&config.java_binary)))?;

    Ok(builder.build())
}
