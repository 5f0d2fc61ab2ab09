// Reading the catalog itself.

use std::collections::HashMap;

use log::{debug, warn};

use crate::error_types::image::ImageError;
use crate::volume::geometry::geometry_struct::{DeviceClass, VTOC_HEADER_RECORD, VTOC_ORIGIN_RECORD};
use crate::volume::image::image_struct::ImageFile;
use crate::volume::volume_struct::DuplicateAllocation;
use crate::words::codec::extract_word36;

use super::vtoce_struct::{RawVtoce, FILE_MAP_HOLE};

// Catalog header words.
const HEADER_ENTRY_COUNT: usize = 1;
const HEADER_LAST_RECORD: usize = 2;

/// How many catalog slots one subvolume carries: the header names the last
/// catalog record, the catalog starts at a fixed origin, and the device
/// class says how many entries share a record.
///
/// Public alongside `read_vtoce` for the dump tool, which walks raw slots
/// without building a model.
pub fn slot_count(
    image: &mut ImageFile,
    class: DeviceClass,
    subvolume: usize,
) -> Result<usize, ImageError> {
    let header = image.read_record(VTOC_HEADER_RECORD, subvolume)?;
    let declared_entries = extract_word36(&header, HEADER_ENTRY_COUNT);
    let last_record = extract_word36(&header, HEADER_LAST_RECORD) as usize;

    if last_record + 1 < VTOC_ORIGIN_RECORD {
        warn!("subvolume {subvolume}: catalog header says the catalog ends before it starts");
        return Ok(0);
    }
    let records = last_record + 1 - VTOC_ORIGIN_RECORD;
    let slots = records * class.vtoc_entries_per_record();
    debug!(
        "subvolume {subvolume}: {records} catalog records, {slots} slots \
         ({declared_entries} entries declared in use)"
    );
    Ok(slots)
}

/// Pull one catalog slot. Slots share physical records with their
/// neighbors; the record cache keeps the re-reads cheap.
pub fn read_vtoce(
    image: &mut ImageFile,
    class: DeviceClass,
    slot: usize,
    subvolume: usize,
) -> Result<RawVtoce, ImageError> {
    let per_record = class.vtoc_entries_per_record();
    let entry_words = class.vtoc_entry_words();

    let record = VTOC_ORIGIN_RECORD + slot / per_record;
    let offset = (slot % per_record) * entry_words;

    let data = image.read_record(record, subvolume)?;
    let words = (0..entry_words)
        .map(|i| extract_word36(&data, offset + i))
        .collect();
    Ok(RawVtoce {
        words,
        record,
        offset,
    })
}

/// Watches which physical records the file maps claim, per subvolume, and
/// remembers every record two entries both think they own. That is either
/// corruption or a double allocation; with no ownership policy on record in
/// the format, all we can honestly do is report it.
#[derive(Default)]
pub(crate) struct AllocationTracker {
    claimed: HashMap<(usize, u32), (usize, usize)>,
    pub(crate) duplicates: Vec<DuplicateAllocation>,
}

impl AllocationTracker {
    pub(crate) fn claim_file_map(&mut self, subvolume: usize, slot: usize, file_map: &[u32]) {
        for (map_index, &entry) in file_map.iter().enumerate() {
            if entry & FILE_MAP_HOLE != 0 {
                continue;
            }
            match self.claimed.insert((subvolume, entry), (slot, map_index)) {
                None => {}
                Some(first) => {
                    warn!(
                        "subvolume {subvolume}: record {entry} claimed by catalog slot \
                         {} (map entry {}) and again by slot {slot} (map entry {map_index})",
                        first.0, first.1
                    );
                    // Put the first claimant back; first wins, the rest are
                    // reported.
                    let _ = self.claimed.insert((subvolume, entry), first);
                    self.duplicates.push(DuplicateAllocation {
                        subvolume,
                        record: entry,
                        first,
                        second: (slot, map_index),
                    });
                }
            }
        }
    }
}
