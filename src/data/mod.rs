// ============================================================
// Layer 4 — Synthetic Benchmark Data
// ============================================================
// The benchmark measures latency, not accuracy, so every
// sample is uniform noise in [0, 1). What matters is that the
// tensors have the shapes each operator family expects:
//
//   TripleData<B> - DeepONet: (u, y) → target, plus a test split
//
//   GridPair<B>   - FNO: x [batch, in, N] → y [batch, out, N]
//
// Both are generic over the Burn backend so the same generator
// feeds the autodiff backend (training) and the inner backend
// (forward timing).
//
// Reference: Burn Book §4 (Datasets)

/// (u, y, target) triples for DeepONet
pub mod triple;

/// Input/target function pairs on a 1-D grid for FNO
pub mod grid;
