//! jsxt_core: Core utilities for the jsxt transpiler.
//!
//! Provides source locations, line-feed bookkeeping, code-unit conversion,
//! and the hash collections used throughout the pipeline.

pub mod collections;
pub mod text;

// Re-export commonly used types
pub use text::Location;
