// The in-memory model of a mounted pack.

use std::sync::Mutex;

use crate::error_types::directory::DirectoryFormatError;
use crate::volume::directory::DirectoryEntry;
use crate::volume::image::image_struct::ImageFile;
use crate::volume::label::VolumeLabel;
use crate::volume::vtoc::VtoceAttributes;
use crate::words::Word36;

/// Index into the volume entry table. Entries are built once at mount and
/// read by many owners (parents, the path table, the uid table), so
/// everything refers to them by index rather than by reference.
pub type EntryIndex = usize;

/// Where an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOrigin {
    /// A catalog slot: subvolume plus slot index, kept so the slot can be
    /// re-read and so diagnostics can name it.
    Catalog { subvolume: usize, slot: usize },
    /// A link record found in a directory. Links have no catalog slot of
    /// their own; they exist only as directory entries, but they still get
    /// a spot in the table so they are addressable like everything else.
    LinkRecord { parent: EntryIndex },
}

/// One file, directory, or link on the volume. Immutable once the mount
/// pass finishes.
#[derive(Debug, Clone)]
pub struct VolumeEntry {
    pub uid: u64,
    /// Attribute word from the catalog; empty for links.
    pub attributes: VtoceAttributes,
    pub time_used: Word36,
    pub time_modified: Word36,
    pub time_created: Word36,
    pub origin: EntryOrigin,
    /// Copy of the 256-entry file map; empty for links.
    pub file_map: Vec<u32>,
    /// Ancestor uid chain as recorded in the catalog entry, outermost
    /// first.
    pub ancestors: Vec<u64>,
    /// Trimmed primary name.
    pub name: String,
    /// Path of the containing directory, trailing separator included.
    pub dir_name: String,
    /// Fully qualified path, native separators.
    pub full_path: String,
    /// Declared data length in bits, back-filled from the parent
    /// directory's record for this entry. Zero when nothing declared one
    /// (the root, or an entry no mounted directory lists).
    pub bit_count: u64,
    /// Link target, native separators, links only.
    pub link_target: Option<String>,
    /// Live children, directories only, chain order.
    pub children: Vec<DirectoryEntry>,
}

impl VolumeEntry {
    pub fn is_directory(&self) -> bool {
        self.attributes.contains(VtoceAttributes::DIRECTORY)
    }

    pub fn is_link(&self) -> bool {
        self.link_target.is_some()
    }

    /// Declared length rounded up to whole bytes.
    pub fn byte_length(&self) -> u64 {
        self.bit_count.div_ceil(8)
    }
}

/// What `stat` hands the hosting layer. Times are Unix seconds.
#[derive(Debug, Clone, Copy)]
pub struct EntryStat {
    pub is_dir: bool,
    pub size_bytes: u64,
    pub created: i64,
    pub modified: i64,
    pub accessed: i64,
}

/// Two catalog entries both claiming one physical record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateAllocation {
    pub subvolume: usize,
    pub record: u32,
    /// (catalog slot, file map index) of each claimant, in scan order.
    pub first: (usize, usize),
    pub second: (usize, usize),
}

/// A directory whose header counts disagree with its chain.
#[derive(Debug, Clone, Copy)]
pub struct CountMismatch {
    pub entry: EntryIndex,
    pub declared: usize,
    pub walked: usize,
}

/// Everything non-fatal the mount pass noticed. Owned by the model; there
/// is deliberately no global state anywhere in the crate.
#[derive(Debug, Default)]
pub struct MountReport {
    /// Catalog slots scanned, per subvolume.
    pub slots_scanned: Vec<usize>,
    /// Subvolumes whose label says they were not cleanly dismounted.
    pub dirty_subvolumes: Vec<usize>,
    pub duplicate_allocations: Vec<DuplicateAllocation>,
    pub count_mismatches: Vec<CountMismatch>,
    /// Directories whose own data we could not make sense of; they list no
    /// children but the rest of the tree stands.
    pub unparsed_directories: Vec<(EntryIndex, DirectoryFormatError)>,
}

/// A mounted volume: the entry table, the labels, the consistency report,
/// and the image handle for data reads.
///
/// The handle (and the record cache inside it) is the only mutable state
/// left after mounting, so it sits behind a mutex; a hosting layer that
/// dispatches from several threads serializes on it instead of interleaving
/// reads.
pub struct VolumeModel {
    pub(crate) image: Mutex<ImageFile>,
    pub(crate) labels: Vec<VolumeLabel>,
    pub(crate) entries: Vec<VolumeEntry>,
    pub(crate) report: MountReport,
}
