//! Collection aliases used throughout the transpiler.

/// A set that uses FxHash for fast hashing, suitable for transpiler internals
/// where DoS resistance is not needed.
pub type FxHashSet<T> = rustc_hash::FxHashSet<T>;
