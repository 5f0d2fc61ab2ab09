// The library cannot use unwraps.
#![deny(clippy::unwrap_used)]
// Gotta use all the results.
#![deny(unused_results)]

// The decoder core. Everything on-disk goes through here.
pub mod volume;

// Bit-level packing primitives. Public because the integration tests
// build whole synthetic pack images out of them.
pub mod words;

// Error enums, one module per layer.
pub mod error_types;

// The FUSE hosting layer, used by the mount binary.
pub mod filesystem;

// Shared string/time/dump helpers. Public because the dump binary leans on
// them.
pub mod helpers;
