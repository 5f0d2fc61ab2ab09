// The actual FUSE filesystem layer.
//
// Everything here resolves paths against the finished snapshot and hands
// back what the model already knows. The write half of the trait is left
// to the default ENOSYS implementations on purpose.

use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;

use fuse_mt::{
    DirectoryEntry, FileType, FilesystemMT, RequestInfo, ResultData, ResultEmpty, ResultEntry,
    ResultOpen, ResultReaddir, ResultSlice, ResultStatfs, Statfs,
};
use log::{debug, error, info, warn};

use crate::filesystem::attributes::entry_attributes;
use crate::filesystem::error_codes::*;
use crate::filesystem::filesystem_struct::MxFs;
use crate::volume::directory::EntryKind;
use crate::volume::geometry::geometry_struct::RECORD_BYTES;
use crate::volume::paths::to_external_separators;
use crate::volume::EntryIndex;

// The model never changes after mount, so the kernel can cache attributes
// as long as it pleases.
const ATTR_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 365);

impl MxFs {
    /// Path (as FUSE hands it to us) to entry index.
    fn find(&self, path: &Path) -> Option<EntryIndex> {
        self.volume.lookup_path(&path.to_string_lossy())
    }
}

impl FilesystemMT for MxFs {
    fn init(&self, _req: RequestInfo) -> ResultEmpty {
        info!("filesystem up, {} entries", self.volume.entries().len());
        Ok(())
    }

    fn destroy(&self) {
        // Nothing to flush; we never wrote anything.
        info!("filesystem down. Goodbye! .o/");
    }

    // Get file attributes of an item.
    fn getattr(&self, _req: RequestInfo, path: &Path, _fh: Option<u64>) -> ResultEntry {
        debug!("getattr `{}`", path.display());
        match self.find(path) {
            Some(index) => Ok((ATTR_TTL, entry_attributes(&self.volume, index))),
            None => Err(NO_SUCH_ITEM),
        }
    }

    fn readlink(&self, _req: RequestInfo, path: &Path) -> ResultData {
        debug!("readlink `{}`", path.display());
        let index = self.find(path).ok_or(NO_SUCH_ITEM)?;
        match self.volume.read_link(index) {
            Some(target) => {
                // Targets are stored the way the pack wrote them; the host
                // wants its own separators.
                Ok(to_external_separators(target).into_bytes())
            }
            None => {
                warn!("readlink on `{}`, which is not a link", path.display());
                Err(INVALID_ARGUMENT)
            }
        }
    }

    fn open(&self, _req: RequestInfo, path: &Path, flags: u32) -> ResultOpen {
        debug!("open `{}` flags {flags:#o}", path.display());
        if flags & (libc::O_WRONLY | libc::O_RDWR) as u32 != 0 {
            // Nice try.
            return Err(READ_ONLY);
        }
        let index = self.find(path).ok_or(NO_SUCH_ITEM)?;
        if self.volume.entry(index).is_directory() {
            return Err(IS_A_DIRECTORY);
        }
        // Handles carry the entry index; lookups are cheap anyway, but this
        // saves re-walking the path table on every read.
        Ok((index as u64, flags))
    }

    fn read(
        &self,
        _req: RequestInfo,
        path: &Path,
        fh: u64,
        offset: u64,
        size: u32,
        callback: impl FnOnce(ResultSlice<'_>) -> fuse_mt::CallbackResult,
    ) -> fuse_mt::CallbackResult {
        debug!("read `{}` offset {offset} size {size}", path.display());
        let index = fh as EntryIndex;
        if index >= self.volume.entries().len() {
            // A handle we never issued?
            error!("read with a bogus handle {fh} for `{}`", path.display());
            return callback(Err(GENERIC_FAILURE));
        }

        let mut buf = vec![0u8; size as usize];
        // Cant use the `?` operator in here due to the callback, annoying!
        match self.volume.read_file(index, offset, &mut buf) {
            Ok(produced) => callback(Ok(&buf[..produced])),
            Err(err) => {
                // The image went unreadable underneath us. Nothing to
                // retry; report and fail the request.
                error!("image read failed under `{}`: {err}", path.display());
                callback(Err(GENERIC_FAILURE))
            }
        }
    }

    fn release(
        &self,
        _req: RequestInfo,
        _path: &Path,
        _fh: u64,
        _flags: u32,
        _lock_owner: u64,
        _flush: bool,
    ) -> ResultEmpty {
        Ok(())
    }

    fn opendir(&self, _req: RequestInfo, path: &Path, _flags: u32) -> ResultOpen {
        debug!("opendir `{}`", path.display());
        let index = self.find(path).ok_or(NO_SUCH_ITEM)?;
        if !self.volume.entry(index).is_directory() {
            return Err(NOT_A_DIRECTORY);
        }
        Ok((index as u64, 0))
    }

    // List the contents of a directory.
    fn readdir(&self, _req: RequestInfo, path: &Path, fh: u64) -> ResultReaddir {
        debug!("readdir `{}`", path.display());
        let index = fh as EntryIndex;
        if index >= self.volume.entries().len() {
            error!("readdir with a bogus handle {fh} for `{}`", path.display());
            return Err(GENERIC_FAILURE);
        }

        let mut listed: Vec<DirectoryEntry> = self
            .volume
            .list_children(index)
            .iter()
            .map(|child| {
                let kind = match child.kind {
                    EntryKind::Directory => FileType::Directory,
                    EntryKind::Link => FileType::Symlink,
                    _ => FileType::RegularFile,
                };
                DirectoryEntry {
                    name: OsString::from(child.name.clone()),
                    kind,
                }
            })
            .collect();

        // The unix pseudo-entries.
        listed.push(DirectoryEntry {
            name: OsString::from("."),
            kind: FileType::Directory,
        });
        listed.push(DirectoryEntry {
            name: OsString::from(".."),
            kind: FileType::Directory,
        });

        debug!("directory contained {} items", listed.len());
        Ok(listed)
    }

    fn releasedir(&self, _req: RequestInfo, _path: &Path, _fh: u64, _flags: u32) -> ResultEmpty {
        Ok(())
    }

    fn statfs(&self, _req: RequestInfo, _path: &Path) -> ResultStatfs {
        // Nothing is ever free on a dead pack.
        Ok(Statfs {
            blocks: self.volume.entries().len() as u64,
            bfree: 0,
            bavail: 0,
            files: self.volume.entries().len() as u64,
            ffree: 0,
            bsize: RECORD_BYTES as u32,
            namelen: 32,
            frsize: RECORD_BYTES as u32,
        })
    }
}
