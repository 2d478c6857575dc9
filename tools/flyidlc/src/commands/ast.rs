use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use flyidl::{Compiler, format_specification};

#[derive(Args)]
pub struct AstArgs {
    /// Path to the schema file
    input: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl AstArgs {
    pub fn run(self) -> Result<()> {
        let text = fs::read_to_string(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))?;
        let spec = Compiler::builder()
            .with_source_name(self.input.display().to_string())
            .build()
            .compile(&text)?;
        let rendered = format_specification(&spec)?;

        match self.output {
            Some(path) => fs::write(path, rendered)?,
            None => print!("{rendered}"),
        }
        Ok(())
    }
}
