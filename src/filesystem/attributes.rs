// Turning volume entries into FUSE attributes.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use fuse_mt::{FileAttr, FileType};

use crate::volume::geometry::geometry_struct::RECORD_BYTES;
use crate::volume::{EntryIndex, VolumeModel};

/// Unix seconds to SystemTime. Timestamps on these packs can legitimately
/// predate 1970 (unset clocks decode to 1901), so the negative side has to
/// work too.
pub(crate) fn system_time(secs: i64) -> SystemTime {
    if secs >= 0 {
        UNIX_EPOCH + Duration::from_secs(secs as u64)
    } else {
        UNIX_EPOCH - Duration::from_secs(secs.unsigned_abs())
    }
}

/// Build the FUSE attribute block for one entry.
///
/// Ownership and permissions are a fiction: the security attributes on the
/// pack belong to a machine that is not running anymore, so everything is
/// world-readable and nothing is writable.
pub(crate) fn entry_attributes(volume: &VolumeModel, index: EntryIndex) -> FileAttr {
    let stat = volume.stat(index);
    let entry = volume.entry(index);

    let (kind, perm, nlink) = if stat.is_dir {
        (FileType::Directory, 0o555, 2)
    } else if entry.is_link() {
        (FileType::Symlink, 0o777, 1)
    } else {
        (FileType::RegularFile, 0o444, 1)
    };

    FileAttr {
        size: stat.size_bytes,
        blocks: stat.size_bytes.div_ceil(RECORD_BYTES as u64),
        atime: system_time(stat.accessed),
        mtime: system_time(stat.modified),
        ctime: system_time(stat.modified),
        crtime: system_time(stat.created),
        kind,
        perm,
        nlink,
        uid: 0,
        gid: 0,
        rdev: 0,
        flags: 0,
    }
}
