// Error types, one module per layer.
// We do not allow string errors. This is RUST damn it, not python!

pub mod directory;
pub mod image;
pub mod mount;
