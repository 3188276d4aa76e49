// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with clap.
// All benchmark logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `run`         - sweep depths, print markdown tables
//   2. `init-config` - write the default config as JSON
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, InitConfigArgs, RunArgs};

use crate::application::bench_use_case::BenchConfig;
use crate::infra::config_store::ConfigStore;

#[derive(Parser, Debug)]
#[command(
    name = "neural-operator-bench",
    version,
    about = "Time DeepONet and FNO forward passes and short training runs against network depth."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct handler.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Run(args)        => run_bench(args),
            Commands::InitConfig(args) => init_config(args),
        }
    }
}

fn run_bench(args: RunArgs) -> Result<()> {
    use crate::application::bench_use_case::BenchUseCase;

    let base = match &args.config {
        Some(path) => {
            tracing::info!("Loading benchmark config from '{}'", path);
            ConfigStore::new(path).load()?
        }
        None => BenchConfig::default(),
    };

    let use_case = BenchUseCase::new(args.apply_to(base));
    let tables   = use_case.execute()?;

    for table in &tables {
        println!("{}", table.to_markdown());
    }
    Ok(())
}

fn init_config(args: InitConfigArgs) -> Result<()> {
    let store = ConfigStore::new(&args.path);
    store.save(&BenchConfig::default(), args.force)?;
    println!("Wrote default benchmark config to '{}'", store.path().display());
    Ok(())
}
