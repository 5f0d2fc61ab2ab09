use crate::error_types::mount::MountError;

use super::geometry_struct::{DeviceClass, Geometry, SECTOR_BYTES};

impl Geometry {
    pub fn new(class: DeviceClass, subvolumes: usize) -> Result<Self, MountError> {
        if !(1..=3).contains(&subvolumes) {
            return Err(MountError::BadSubvolumeCount(subvolumes));
        }
        Ok(Self { class, subvolumes })
    }

    /// Map a logical record number within a subvolume to its physical sector
    /// on the pack.
    ///
    /// Two wrinkles:
    /// - The sectors-per-cylinder count does not divide evenly by
    ///   sectors-per-record, so every cylinder ends with a couple of sectors
    ///   no record can use. Records never straddle that gap; the raw sector
    ///   offset gets bumped past it once per full cylinder of records.
    /// - Subvolumes are interleaved cylinder-by-cylinder across the physical
    ///   pack: subvolume `sv`'s cylinder `c` sits at physical cylinder
    ///   `c * subvolumes + sv`.
    pub fn record_to_sector(&self, record: usize, subvolume: usize) -> usize {
        let spc = self.class.sectors_per_cylinder();
        let spr = self.class.sectors_per_record();

        let usable = (spc / spr) * spr;
        let unusable = spc - usable;

        let mut sect = record * spr;
        sect += (sect / usable) * unusable;

        // Re-stripe across the interleaved subvolumes.
        let sect_offset = sect % spc;
        (sect - sect_offset) * self.subvolumes + subvolume * spc + sect_offset
    }

    /// Byte offset of a record in the image file.
    pub fn record_byte_offset(&self, record: usize, subvolume: usize) -> u64 {
        self.record_to_sector(record, subvolume) as u64 * SECTOR_BYTES as u64
    }
}
