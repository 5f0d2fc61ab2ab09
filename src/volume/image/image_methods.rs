// Reading records.

use std::fs::OpenOptions;
use std::os::unix::fs::FileExt;
use std::path::Path;

use log::trace;

use crate::error_types::image::ImageError;
use crate::volume::geometry::geometry_struct::RECORD_BYTES;
use crate::volume::geometry::Geometry;

use super::image_struct::{CachedRecord, ImageFile, RawRecord};

impl ImageFile {
    /// Open a pack image read-only. We never write, so there is no reason
    /// to even ask for write access.
    pub fn open(path: &Path, geometry: Geometry) -> Result<Self, ImageError> {
        let file = OpenOptions::new()
            .read(true)
            .open(path)
            .map_err(ImageError::Open)?;
        Ok(Self {
            file,
            geometry,
            cache: None,
        })
    }

    /// Read one record of one subvolume.
    ///
    /// A short read means the image is truncated or the geometry is wrong;
    /// either way nothing above us can limp along, so it comes back as a
    /// hard error.
    pub fn read_record(
        &mut self,
        record: usize,
        subvolume: usize,
    ) -> Result<RawRecord, ImageError> {
        if let Some(cached) = &self.cache {
            if cached.record == record && cached.subvolume == subvolume {
                trace!("record cache hit: {record}/{subvolume}");
                return Ok(*cached.data);
            }
        }

        let offset = self.geometry.record_byte_offset(record, subvolume);
        let mut data: Box<RawRecord> = Box::new([0u8; RECORD_BYTES]);
        self.file
            .read_exact_at(&mut data[..], offset)
            .map_err(|source| ImageError::RecordRead {
                record,
                subvolume,
                offset,
                source,
            })?;

        let out = *data;
        self.cache = Some(CachedRecord {
            record,
            subvolume,
            data,
        });
        Ok(out)
    }
}
