// ============================================================
// Layer 2 — BenchUseCase
// ============================================================
// Orchestrates a full benchmark run:
//
//   Step 1: Validate the configuration
//   Step 2: Pick the Burn backend and its default device
//   Step 3: For each requested operator family
//             for each layer count in the sweep
//               build a fresh model, time forward + training
//   Step 4: Hand back one BenchTable per family
//
// Printing is left to Layer 1; nothing here touches stdout.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §2 (Backends)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::domain::bench_result::BenchTable;
use crate::domain::operator::{BackendKind, OperatorFamily};
use crate::domain::traits::DepthBenchmark;
use crate::ml::backend;

// ─── DeepONet Settings ───────────────────────────────────────────────────────
// Problem size and optimiser settings for the DeepONet sweep.
// Depth is NOT here - it comes from BenchConfig::layer_counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeepOnetSettings {
    /// Timed repetitions of each statement
    pub iterations: usize,
    /// Training rows (each row pairs one u with one y)
    pub batch_size: usize,
    /// Number of sensor points `m` sampling the input function
    pub sensors:    usize,
    /// Dimension of the trunk input `y`
    pub dim_y:      usize,
    /// Width of every hidden layer in branch and trunk
    pub width:      usize,
    /// Size of the shared branch/trunk output (the latent basis)
    pub latent:     usize,
    /// Rows in the held-out test split
    pub test_size:  usize,
    /// Adam learning rate
    pub lr:         f64,
    /// Epochs per timed training call
    pub epochs:     usize,
}

impl Default for DeepOnetSettings {
    fn default() -> Self {
        Self {
            iterations: 100,
            batch_size: 64,
            sensors:    32,
            dim_y:      1,
            width:      64,
            latent:     128,
            test_size:  8,
            lr:         1e-3,
            epochs:     10,
        }
    }
}

// ─── FNO Settings ────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FnoSettings {
    pub iterations:          usize,
    pub batch_size:          usize,
    /// Grid points along the single spatial axis
    pub n_points:            usize,
    /// Fourier modes kept by every spectral convolution
    pub n_modes:             usize,
    pub hidden_channels:     usize,
    pub in_channels:         usize,
    pub out_channels:        usize,
    pub lifting_channels:    usize,
    pub projection_channels: usize,
    pub lr:                  f64,
    pub epochs:              usize,
}

impl Default for FnoSettings {
    fn default() -> Self {
        Self {
            iterations:          1000,
            batch_size:          64,
            n_points:            128,
            n_modes:             16,
            hidden_channels:     64,
            in_channels:         1,
            out_channels:        3,
            lifting_channels:    128,
            projection_channels: 128,
            lr:                  1e-4,
            epochs:              10,
        }
    }
}

// ─── Benchmark Configuration ─────────────────────────────────────────────────
// Everything needed to reproduce a run. Serialisable so it can be
// written with `init-config` and loaded with `run --config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub families:     Vec<OperatorFamily>,
    pub backend:      BackendKind,
    /// Depths to sweep, measured in this order
    pub layer_counts: Vec<usize>,
    pub deeponet:     DeepOnetSettings,
    pub fno:          FnoSettings,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            families:     OperatorFamily::ALL.to_vec(),
            backend:      BackendKind::default(),
            layer_counts: (1..=5).collect(),
            deeponet:     DeepOnetSettings::default(),
            fno:          FnoSettings::default(),
        }
    }
}

impl BenchConfig {
    /// Reject configurations that would produce an empty or
    /// meaningless table before any model is built.
    pub fn validate(&self) -> Result<()> {
        if self.families.is_empty() {
            bail!("no operator families selected");
        }
        if self.layer_counts.is_empty() {
            bail!("layer_counts must list at least one depth");
        }
        if self.layer_counts.contains(&0) {
            bail!("layer counts must be at least 1 (got {:?})", self.layer_counts);
        }

        let d = &self.deeponet;
        check_positive("deeponet.iterations", d.iterations)?;
        check_positive("deeponet.batch_size", d.batch_size)?;
        check_positive("deeponet.sensors",    d.sensors)?;
        check_positive("deeponet.dim_y",      d.dim_y)?;
        check_positive("deeponet.width",      d.width)?;
        check_positive("deeponet.latent",     d.latent)?;
        check_positive("deeponet.test_size",  d.test_size)?;
        check_positive("deeponet.epochs",     d.epochs)?;
        check_learning_rate("deeponet.lr",    d.lr)?;

        let f = &self.fno;
        check_positive("fno.iterations",          f.iterations)?;
        check_positive("fno.batch_size",          f.batch_size)?;
        check_positive("fno.n_points",            f.n_points)?;
        check_positive("fno.hidden_channels",     f.hidden_channels)?;
        check_positive("fno.in_channels",         f.in_channels)?;
        check_positive("fno.out_channels",        f.out_channels)?;
        check_positive("fno.lifting_channels",    f.lifting_channels)?;
        check_positive("fno.projection_channels", f.projection_channels)?;
        check_positive("fno.epochs",              f.epochs)?;
        check_learning_rate("fno.lr",             f.lr)?;

        // A real signal of n points has n/2 + 1 distinct frequencies
        let max_modes = f.n_points / 2 + 1;
        if f.n_modes == 0 || f.n_modes > max_modes {
            bail!(
                "fno.n_modes must be in 1..={} for n_points={} (got {})",
                max_modes, f.n_points, f.n_modes
            );
        }

        Ok(())
    }
}

fn check_positive(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        bail!("{name} must be at least 1");
    }
    Ok(())
}

fn check_learning_rate(name: &str, lr: f64) -> Result<()> {
    if !(lr.is_finite() && lr > 0.0) {
        bail!("{name} must be a positive number (got {lr})");
    }
    Ok(())
}

// ─── BenchUseCase ─────────────────────────────────────────────────────────────
pub struct BenchUseCase {
    config: BenchConfig,
}

impl BenchUseCase {
    pub fn new(config: BenchConfig) -> Self {
        Self { config }
    }

    /// Run every requested family on the configured backend.
    /// Tables come back in canonical order (DeepONet, then FNO)
    /// regardless of how the families were listed.
    pub fn execute(&self) -> Result<Vec<BenchTable>> {
        let cfg = &self.config;
        cfg.validate()?;

        tracing::info!(
            "Benchmarking {:?} on backend '{}' at depths {:?}",
            cfg.families, cfg.backend, cfg.layer_counts
        );

        let mut tables = Vec::new();
        for family in OperatorFamily::ALL {
            if !cfg.families.contains(&family) {
                continue;
            }
            let table = backend::with_benchmark(cfg, family, |bench| {
                sweep(bench, &cfg.layer_counts)
            })?;
            tables.push(table);
        }

        Ok(tables)
    }
}

/// Measure `bench` at every depth and collect the rows in order.
pub fn sweep(bench: &dyn DepthBenchmark, layer_counts: &[usize]) -> Result<BenchTable> {
    let mut table = BenchTable::new(bench.family(), bench.epochs());

    for &layers in layer_counts {
        tracing::info!("{}: measuring {} layer(s)", bench.family(), layers);
        let timing = bench.measure(layers)?;
        tracing::info!(
            "{}: {} layer(s) → forward {:.4} ms, train {:.4} ms",
            bench.family(), layers, timing.forward_ms, timing.train_ms
        );
        table.push(timing);
    }

    Ok(table)
}
