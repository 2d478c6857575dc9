mod compiler;
mod error;
mod format;

pub use compiler::{Compiler, CompilerBuilder, compile_str};
pub use error::CompileError;
pub use flyidl_ast as ast;
pub use flyidl_parser as parser;
pub use format::format_specification;
