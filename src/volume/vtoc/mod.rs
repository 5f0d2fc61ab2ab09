pub mod vtoce_struct;
pub mod catalog;

pub use vtoce_struct::{RawVtoce, VtoceAttributes, FILE_MAP_ENTRIES, FILE_MAP_HOLE, ROOT_UID};
