// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer sweeps depths without knowing which
// model or backend it is talking to. Anything that can build a
// model of a given depth and time it implements DepthBenchmark:
//
//   - DeepOnetBench<B> → branch/trunk network on backend B
//   - FnoBench<B>      → Fourier Neural Operator on backend B
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::bench_result::LayerTiming;
use crate::domain::operator::OperatorFamily;

// ─── DepthBenchmark ───────────────────────────────────────────────────────────
/// A model family whose latency can be measured at a given depth.
pub trait DepthBenchmark {
    /// Which architecture this benchmark measures
    fn family(&self) -> OperatorFamily;

    /// Training epochs per timed training call
    fn epochs(&self) -> usize;

    /// Build a fresh model with `layers` layers and time its
    /// forward pass and a short training call.
    fn measure(&self, layers: usize) -> Result<LayerTiming>;
}
