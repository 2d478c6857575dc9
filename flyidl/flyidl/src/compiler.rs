//! Text-to-AST front end.

use flyidl_ast::Specification;
use flyidl_parser::{AstBuilder, parse_specification};
use tracing::debug;

use crate::error::CompileError;

const DEFAULT_SOURCE_NAME: &str = "<input>";

/// Compiles schema text into a [`Specification`].
///
/// One compiler handles one compile unit at a time; it can be reused for any
/// number of units. Use one compiler per thread for parallel compilation.
pub struct Compiler {
    source_name: String,
    builder: AstBuilder,
}

/// Builder for configuring [`Compiler`].
pub struct CompilerBuilder {
    source_name: String,
}

impl Compiler {
    /// Create a builder for [`Compiler`].
    pub fn builder() -> CompilerBuilder {
        CompilerBuilder {
            source_name: DEFAULT_SOURCE_NAME.to_string(),
        }
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Name used for this compiler's input in errors and logs.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn compile(&mut self, text: &str) -> Result<Specification, CompileError> {
        debug!(source = %self.source_name, bytes = text.len(), "compiling schema");

        let tree = parse_specification(text).map_err(|source| CompileError::Syntax {
            source_name: self.source_name.clone(),
            source,
        })?;
        let spec = self
            .builder
            .build(&tree)
            .map_err(|source| CompileError::Ast {
                source_name: self.source_name.clone(),
                source,
            })?;

        debug!(
            source = %self.source_name,
            scopes = spec.scopes().len(),
            "compiled schema"
        );
        Ok(spec)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl CompilerBuilder {
    /// Set the name reported for the input (default: `<input>`).
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    /// Build the compiler.
    pub fn build(self) -> Compiler {
        Compiler {
            source_name: self.source_name,
            builder: AstBuilder::new(),
        }
    }
}

/// Compile one schema text with a throwaway [`Compiler`].
pub fn compile_str(source_name: &str, text: &str) -> Result<Specification, CompileError> {
    Compiler::builder()
        .with_source_name(source_name)
        .build()
        .compile(text)
}
