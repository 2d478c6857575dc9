use std::{fs, path::PathBuf};

use anyhow::{Result, bail};
use clap::Args;
use flyidl::Compiler;
use tracing::info;

#[derive(Args)]
pub struct CheckArgs {
    /// Schema files to compile
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

impl CheckArgs {
    pub fn run(self) -> Result<()> {
        let mut failed = 0usize;
        for input in &self.inputs {
            let source_name = input.display().to_string();
            let text = match fs::read_to_string(input) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("{source_name}: {e}");
                    failed += 1;
                    continue;
                }
            };

            let mut compiler = Compiler::builder().with_source_name(&source_name).build();
            match compiler.compile(&text) {
                Ok(spec) => info!(source = %source_name, scopes = spec.scopes().len(), "ok"),
                Err(e) => {
                    eprintln!("{e}");
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            bail!("{failed} of {} schema(s) failed", self.inputs.len());
        }
        Ok(())
    }
}
