// Mounting, and the lookup/read surface the hosting layers consume.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use log::{debug, info, warn};

use crate::error_types::directory::DirectoryParseError;
use crate::error_types::image::ImageError;
use crate::error_types::mount::MountError;
use crate::helpers::time::multics_to_unix_seconds;
use crate::volume::directory::directory_struct::EntryKind;
use crate::volume::directory::parse::parse_directory;
use crate::volume::directory::DirectoryEntry;
use crate::volume::file::FileWindow;
use crate::volume::geometry::{DeviceClass, Geometry};
use crate::volume::image::image_struct::ImageFile;
use crate::volume::label::VolumeLabel;
use crate::volume::paths::resolve;
use crate::volume::paths::to_native_separators;
use crate::volume::vtoc::catalog::{read_vtoce, slot_count, AllocationTracker};
use crate::volume::vtoc::VtoceAttributes;

use super::volume_struct::*;

/// Mount a pack image: build the whole in-memory model in one pass.
///
/// The device class and subvolume count come from the caller; not every
/// image self-describes them, so they are configuration, the same way the
/// operator's disk table was.
///
/// Structural trouble while building the catalog (unreadable image, bad
/// label magic) aborts the mount. Trouble confined to one directory's own
/// data is logged, noted in the report, and costs only that directory's
/// children.
pub fn mount(
    image_path: &Path,
    class: DeviceClass,
    subvolumes: usize,
) -> Result<VolumeModel, MountError> {
    info!(
        "mounting {} ({class:?}, {subvolumes} subvolume(s))",
        image_path.display()
    );
    let geometry = Geometry::new(class, subvolumes)?;
    let mut image = ImageFile::open(image_path, geometry)?;
    let mut report = MountReport::default();

    // Labels first: if record 0 does not carry the magic, nothing else is
    // worth reading.
    let mut labels = Vec::with_capacity(subvolumes);
    for sv in 0..subvolumes {
        let label = VolumeLabel::read(&mut image, sv)?;
        if !label.cleanly_dismounted() {
            report.dirty_subvolumes.push(sv);
        }
        labels.push(label);
    }

    // How much catalog each subvolume carries.
    for sv in 0..subvolumes {
        report.slots_scanned.push(slot_count(&mut image, class, sv)?);
    }

    // Scan every slot, keeping the live ones. Global indices run
    // contiguously across subvolumes in subvolume order.
    let mut entries: Vec<VolumeEntry> = Vec::new();
    let mut tracker = AllocationTracker::default();
    for sv in 0..subvolumes {
        for slot in 0..report.slots_scanned[sv] {
            let raw = read_vtoce(&mut image, class, slot, sv)?;
            let uid = raw.uid();
            if uid == 0 {
                continue;
            }
            let file_map = raw.file_map();
            tracker.claim_file_map(sv, slot, &file_map);
            entries.push(VolumeEntry {
                uid,
                attributes: raw.attributes(),
                time_used: raw.time_used(),
                time_modified: raw.time_modified(),
                time_created: raw.time_created(),
                origin: EntryOrigin::Catalog {
                    subvolume: sv,
                    slot,
                },
                file_map,
                ancestors: raw.ancestors(),
                name: resolve::entry_name(uid, raw.name_words()),
                dir_name: String::new(),
                full_path: String::new(),
                bit_count: 0,
                link_target: None,
                children: Vec::new(),
            });
        }
    }
    report.duplicate_allocations = tracker.duplicates;
    info!(
        "catalog scan found {} live entries in {:?} slots",
        entries.len(),
        report.slots_scanned
    );

    // Uids are supposed to be unique per volume. A duplicate will not stop
    // the mount, but every uid-keyed lookup will quietly pick the first
    // match, so say something.
    let mut seen_uids = HashSet::new();
    for entry in &entries {
        if !seen_uids.insert(entry.uid) {
            warn!("uid {:#012o} appears in more than one catalog slot", entry.uid);
        }
    }

    resolve::build_paths(&mut entries);

    // Walk every directory's own data for its children.
    let directory_indices: Vec<EntryIndex> = (0..entries.len())
        .filter(|&i| entries[i].is_directory())
        .collect();
    for i in directory_indices {
        let EntryOrigin::Catalog { subvolume, .. } = entries[i].origin else {
            continue;
        };
        let file_map = entries[i].file_map.clone();
        let parent_path = entries[i].full_path.clone();

        let mut window = FileWindow::new(&mut image, &file_map, subvolume);
        let contents = match parse_directory(&mut window) {
            Ok(contents) => contents,
            Err(DirectoryParseError::Image(e)) => return Err(e.into()),
            Err(DirectoryParseError::Format(e)) => {
                warn!("directory '{parent_path}' has unrecognized contents: {e}");
                report.unparsed_directories.push((i, e));
                continue;
            }
        };

        let declared = contents.declared.total();
        let mut children = contents.children;
        if children.len() != declared {
            warn!(
                "directory '{parent_path}' declares {declared} entries but its chain holds {}",
                children.len()
            );
            report.count_mismatches.push(CountMismatch {
                entry: i,
                declared,
                walked: children.len(),
            });
        }

        // Tie each non-link child to its own catalog entry, and while we
        // are here, hand that entry the length its branch record declares
        // (the catalog slot itself never stores one).
        for child in &mut children {
            if child.kind == EntryKind::Link {
                continue;
            }
            let path = resolve::child_path(&parent_path, &child.name);
            match entries.iter().position(|e| e.full_path == path) {
                Some(j) => {
                    child.child_index = Some(j);
                    entries[j].bit_count = child.bit_count;
                }
                None => {
                    // The branch lives here but the segment's catalog entry
                    // is on some other pack of the logical volume.
                    debug!("'{path}' has no catalog entry on this volume");
                }
            }
        }
        entries[i].children = children;
    }

    // Links have no catalog slot, but they are part of the tree, so they
    // get entries of their own at the end of the table.
    let mut link_slots: Vec<(EntryIndex, usize)> = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        for (pos, child) in entry.children.iter().enumerate() {
            if child.kind == EntryKind::Link {
                link_slots.push((i, pos));
            }
        }
    }
    for (parent, pos) in link_slots {
        let (name, uid, target) = {
            let child = &entries[parent].children[pos];
            (
                child.name.clone(),
                child.uid,
                child.link_target.clone().unwrap_or_default(),
            )
        };
        let parent_path = entries[parent].full_path.clone();
        let index = entries.len();
        entries.push(VolumeEntry {
            uid,
            attributes: VtoceAttributes::empty(),
            time_used: 0,
            time_modified: 0,
            time_created: 0,
            origin: EntryOrigin::LinkRecord { parent },
            file_map: Vec::new(),
            ancestors: Vec::new(),
            name: name.clone(),
            dir_name: resolve::child_path(&parent_path, ""),
            full_path: resolve::child_path(&parent_path, &name),
            bit_count: 0,
            link_target: Some(target),
            children: Vec::new(),
        });
        entries[parent].children[pos].child_index = Some(index);
    }

    info!("mount complete: {} entries in the tree", entries.len());
    Ok(VolumeModel {
        image: Mutex::new(image),
        labels,
        entries,
        report,
    })
}

impl VolumeModel {
    /// Find an entry by external (`/`-separated) path. Exact matches only.
    pub fn lookup_path(&self, path: &str) -> Option<EntryIndex> {
        let native = to_native_separators(path);
        self.entries.iter().position(|e| e.full_path == native)
    }

    /// Find an entry by uid. First match wins, which only matters on a
    /// volume that already violated uid uniqueness.
    pub fn lookup_uid(&self, uid: u64) -> Option<EntryIndex> {
        self.entries.iter().position(|e| e.uid == uid)
    }

    pub fn entry(&self, index: EntryIndex) -> &VolumeEntry {
        &self.entries[index]
    }

    pub fn entries(&self) -> &[VolumeEntry] {
        &self.entries
    }

    pub fn labels(&self) -> &[VolumeLabel] {
        &self.labels
    }

    pub fn report(&self) -> &MountReport {
        &self.report
    }

    /// A directory's live children, chain order. Empty for everything that
    /// is not a directory (and for directories whose contents we could not
    /// parse).
    pub fn list_children(&self, dir: EntryIndex) -> &[DirectoryEntry] {
        &self.entries[dir].children
    }

    pub fn stat(&self, index: EntryIndex) -> EntryStat {
        let entry = &self.entries[index];
        let size_bytes = match &entry.link_target {
            Some(target) => target.len() as u64,
            None => entry.byte_length(),
        };
        EntryStat {
            is_dir: entry.is_directory(),
            size_bytes,
            created: multics_to_unix_seconds(entry.time_created),
            modified: multics_to_unix_seconds(entry.time_modified),
            accessed: multics_to_unix_seconds(entry.time_used),
        }
    }

    /// A link's target, native separators. `None` for anything that is not
    /// a link.
    pub fn read_link(&self, index: EntryIndex) -> Option<&str> {
        self.entries[index].link_target.as_deref()
    }

    /// Read file bytes `[offset, offset + buf.len())` into `buf`. Returns
    /// the bytes produced; short counts mean the request ran past the
    /// declared end of the file.
    pub fn read_file(
        &self,
        index: EntryIndex,
        offset: u64,
        buf: &mut [u8],
    ) -> Result<usize, ImageError> {
        let entry = &self.entries[index];
        let EntryOrigin::Catalog { subvolume, .. } = entry.origin else {
            return Ok(0);
        };
        let mut image = self.image.lock().expect("image lock poisoned");
        let mut window = FileWindow::new(&mut image, &entry.file_map, subvolume);
        window.read_bytes(entry.bit_count, offset, buf)
    }
}
