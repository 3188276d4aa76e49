// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs and traits describing what a benchmark IS:
// which operator family is measured, on which backend, and
// what a row of results looks like.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Keeping it free of tensors means the table formatting and
// the sweep bookkeeping are testable without touching a device.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Operator families and tensor backends
pub mod operator;

// Per-depth timings and the markdown result table
pub mod bench_result;

// Core abstractions (traits) that the ml layer implements
pub mod traits;
