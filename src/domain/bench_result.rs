// ============================================================
// Layer 3 — Benchmark Results
// ============================================================
// One LayerTiming per measured depth, collected into a
// BenchTable per operator family, rendered as markdown:
//
//   ## DeepONet
//   | #layers | Forward | Train: 10 epochs |
//   | --- | --- | --- |
//   | 1 | 0.4123 ms | 5.9001 ms |
//   | 2 | 0.5210 ms | 7.1034 ms |
//   ...
//
// All times are milliseconds PER INVOCATION, i.e. the total
// elapsed time divided by the number of timed repetitions.
//
// Reference: Rust Book §8 (Strings), std::fmt::Write

use std::fmt::Write as _;

use crate::domain::operator::OperatorFamily;

/// Timings measured for one network depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerTiming {
    /// Number of hidden layers (DeepONet) or Fourier blocks (FNO)
    pub layers: usize,

    /// Mean wall-clock time of one forward prediction, in ms
    pub forward_ms: f64,

    /// Mean wall-clock time of one short training call, in ms
    pub train_ms: f64,
}

impl LayerTiming {
    pub fn new(layers: usize, forward_ms: f64, train_ms: f64) -> Self {
        Self { layers, forward_ms, train_ms }
    }

    /// Both timings are usable numbers (finite and not negative)
    pub fn is_valid(&self) -> bool {
        [self.forward_ms, self.train_ms]
            .iter()
            .all(|t| t.is_finite() && *t >= 0.0)
    }
}

/// Results of a depth sweep for a single operator family.
#[derive(Debug, Clone)]
pub struct BenchTable {
    pub family: OperatorFamily,
    /// Epochs per training call, shown in the column header
    pub epochs: usize,
    rows:       Vec<LayerTiming>,
}

impl BenchTable {
    pub fn new(family: OperatorFamily, epochs: usize) -> Self {
        Self { family, epochs, rows: Vec::new() }
    }

    /// Append the timing for the next depth in the sweep
    pub fn push(&mut self, row: LayerTiming) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[LayerTiming] {
        &self.rows
    }

    /// Render the table as GitHub-flavoured markdown.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();

        // writeln! into a String cannot fail, so the results are discarded
        let _ = writeln!(out, "## {}", self.family.title());
        let _ = writeln!(out, "| #layers | Forward | Train: {} epochs |", self.epochs);
        let _ = writeln!(out, "| --- | --- | --- |");
        for row in self.rows() {
            let _ = writeln!(
                out,
                "| {} | {:.4} ms | {:.4} ms |",
                row.layers, row.forward_ms, row.train_ms,
            );
        }

        out
    }
}
