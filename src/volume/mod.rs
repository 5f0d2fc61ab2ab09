// The decoder core: geometry, raw record I/O, the volume label, the VTOC
// catalog, path resolution, directory contents, and file data access.
//
// Everything is built once, in one pass, by `mount()`. After that the model
// is a read-only snapshot; the only thing that ever changes again is the
// record cache inside the (mutex-guarded) image handle.

pub mod geometry;
pub mod image;
pub mod label;
pub mod vtoc;
pub mod paths;
pub mod directory;
pub mod file;

pub mod volume_struct;
pub mod volume_methods;

pub use geometry::geometry_struct::{DeviceClass, Geometry};
pub use volume_methods::mount;
pub use volume_struct::{EntryIndex, EntryStat, MountReport, VolumeEntry, VolumeModel};
