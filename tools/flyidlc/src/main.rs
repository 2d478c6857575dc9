mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{ast::AstArgs, check::CheckArgs};

#[derive(Parser)]
#[command(name = "flyidlc", about = "Check flyweight IDL schemas and print their AST")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the AST of a schema file
    Ast(AstArgs),
    /// Compile schema files and report errors
    Check(CheckArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    match cli.command {
        Commands::Ast(args) => args.run(),
        Commands::Check(args) => args.run(),
    }
}

fn setup_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("flyidl=debug,flyidl_parser=debug,warn"),
        _ => EnvFilter::new("flyidl=trace,flyidl_parser=trace,debug"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
