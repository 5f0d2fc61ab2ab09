pub mod label_struct;
pub mod label_methods;

pub use label_struct::{Partition, VolumeLabel, VOLUME_MAGIC};
