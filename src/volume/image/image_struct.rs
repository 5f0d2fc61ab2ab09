// The opened pack image.

use std::fs::File;

use crate::volume::geometry::geometry_struct::RECORD_BYTES;
use crate::volume::geometry::Geometry;

/// One raw 1024-word record, still in packed-72 form.
pub type RawRecord = [u8; RECORD_BYTES];

/// The last record we read, so that the field-by-field decoding the upper
/// layers do does not hammer the same record over and over. One slot is
/// genuinely all it takes: access patterns here are "pull a record, pick
/// twenty fields out of it, move on".
pub(super) struct CachedRecord {
    pub(super) record: usize,
    pub(super) subvolume: usize,
    pub(super) data: Box<RawRecord>,
}

/// Handle on the image file plus the record cache. All reads go through
/// this; anybody holding it exclusively therefore owns the cache too.
pub struct ImageFile {
    pub(super) file: File,
    pub(super) geometry: Geometry,
    pub(super) cache: Option<CachedRecord>,
}
