// C error values handed back to FUSE.
// Errors gleamed from https://man7.org/linux/man-pages/man3/errno.3.html

use libc::c_int;

/// Access denied / file does not exist.
pub(super) const NO_SUCH_ITEM: c_int = libc::ENOENT;
/// Tried to do directory stuff to a file.
pub(super) const NOT_A_DIRECTORY: c_int = libc::ENOTDIR;
/// Tried to do things to a directory that it does not support.
pub(super) const IS_A_DIRECTORY: c_int = libc::EISDIR;
/// This whole filesystem is read-only, no exceptions.
pub(super) const READ_ONLY: c_int = libc::EROFS;
/// Ad hominem.
pub(super) const INVALID_ARGUMENT: c_int = libc::EINVAL;
/// Generic IO error. The dreaded OS(5) Input/Output error.
pub(super) const GENERIC_FAILURE: c_int = libc::EIO;
