pub mod resolve;

pub use resolve::{to_external_separators, to_native_separators, AncestorName, ROOT_NAME};

#[cfg(test)]
mod tests;
