// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `run` and `init-config`
// and all their configurable flags.
//
// Flags on `run` are optional overrides: anything left unset
// falls back to the config file (with --config) or to the
// built-in defaults.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::bench_use_case::BenchConfig;
use crate::domain::operator::{BackendKind, OperatorFamily};

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sweep network depth and print forward/training latency tables
    Run(RunArgs),

    /// Write the default benchmark configuration as JSON
    InitConfig(InitConfigArgs),
}

/// Which operator families to benchmark
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FamilyArg {
    Deeponet,
    Fno,
    All,
}

impl FamilyArg {
    pub fn families(self) -> Vec<OperatorFamily> {
        match self {
            FamilyArg::Deeponet => vec![OperatorFamily::DeepOnet],
            FamilyArg::Fno      => vec![OperatorFamily::Fno],
            FamilyArg::All      => OperatorFamily::ALL.to_vec(),
        }
    }
}

/// Burn backend to execute on
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendArg {
    Ndarray,
    Wgpu,
}

impl From<BackendArg> for BackendKind {
    fn from(b: BackendArg) -> Self {
        match b {
            BackendArg::Ndarray => BackendKind::NdArray,
            BackendArg::Wgpu    => BackendKind::Wgpu,
        }
    }
}

/// All arguments for the `run` command.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// JSON config file (see `init-config`); flags below override it
    #[arg(long)]
    pub config: Option<String>,

    /// Operator family to benchmark
    #[arg(long, value_enum)]
    pub family: Option<FamilyArg>,

    /// Burn backend the models run on
    #[arg(long, value_enum)]
    pub backend: Option<BackendArg>,

    /// Comma-separated depths to sweep, e.g. 1,2,3,4,5
    #[arg(long, value_delimiter = ',')]
    pub layers: Option<Vec<usize>>,

    /// Timed repetitions per DeepONet statement
    #[arg(long)]
    pub deeponet_iters: Option<usize>,

    /// Timed repetitions per FNO statement
    #[arg(long)]
    pub fno_iters: Option<usize>,

    /// Epochs per timed training call (both families)
    #[arg(long)]
    pub epochs: Option<usize>,
}

impl RunArgs {
    /// Apply every flag the user actually passed on top of `base`.
    /// This is the boundary between Layer 1 and Layer 2;
    /// the application layer never sees clap types.
    pub fn apply_to(&self, mut base: BenchConfig) -> BenchConfig {
        if let Some(family) = self.family {
            base.families = family.families();
        }
        if let Some(backend) = self.backend {
            base.backend = backend.into();
        }
        if let Some(layers) = &self.layers {
            base.layer_counts = layers.clone();
        }
        if let Some(n) = self.deeponet_iters {
            base.deeponet.iterations = n;
        }
        if let Some(n) = self.fno_iters {
            base.fno.iterations = n;
        }
        if let Some(epochs) = self.epochs {
            base.deeponet.epochs = epochs;
            base.fno.epochs      = epochs;
        }
        base
    }
}

/// All arguments for the `init-config` command
#[derive(Args, Debug)]
pub struct InitConfigArgs {
    /// Where to write the config
    #[arg(long, default_value = "bench_config.json")]
    pub path: String,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
