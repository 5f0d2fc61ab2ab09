use log::{debug, warn};

use crate::error_types::mount::MountError;
use crate::helpers::chars::trimmed_packed_string;
use crate::volume::image::image_struct::ImageFile;
use crate::words::codec::extract_word36;
use crate::words::MASK36;

use super::label_struct::*;

impl VolumeLabel {
    /// Read and validate record 0 of one subvolume.
    ///
    /// A bad magic string fails the mount outright. A dirty-dismount
    /// timestamp mismatch only earns a warning; plenty of surviving images
    /// were pulled from running systems and are otherwise fine.
    pub fn read(image: &mut ImageFile, subvolume: usize) -> Result<Self, MountError> {
        let record = image.read_record(0, subvolume)?;

        for (i, &wanted) in VOLUME_MAGIC.iter().enumerate() {
            let found = extract_word36(&record, LABEL_PERM + i);
            if found != wanted {
                return Err(MountError::NotAMultiVolume {
                    subvolume,
                    word_index: i,
                    found,
                    wanted,
                });
            }
        }

        let pv_words: Vec<u64> = (0..8)
            .map(|i| extract_word36(&record, LABEL_PV_NAME + i))
            .collect();
        let lv_words: Vec<u64> = (0..8)
            .map(|i| extract_word36(&record, LABEL_LV_NAME + i))
            .collect();

        let time_map_updated = extract_word36(&record, LABEL_TIME_MAP_UPDATED);
        let time_unmounted = extract_word36(&record, LABEL_TIME_UNMOUNTED);
        if time_map_updated != time_unmounted {
            warn!(
                "subvolume {subvolume} was not dismounted properly \
                 (map updated {time_map_updated:#012o}, unmounted {time_unmounted:#012o})"
            );
        }

        let root_here = extract_word36(&record, LABEL_ROOT_HERE) & 0o400000000000 != 0;
        let root_slot = (extract_word36(&record, LABEL_ROOT_SLOT) & MASK36) as usize;

        let mut partitions = Vec::new();
        let nparts = (extract_word36(&record, LABEL_PART_COUNT) as usize).min(LABEL_PART_MAX);
        for p in 0..nparts {
            let pos = LABEL_PART_TABLE + p * 4;
            partitions.push(Partition {
                name: trimmed_packed_string(&[extract_word36(&record, pos)]),
                first_record: extract_word36(&record, pos + 1),
                records: extract_word36(&record, pos + 2),
            });
        }

        let label = Self {
            subvolume,
            pv_name: trimmed_packed_string(&pv_words),
            lv_name: trimmed_packed_string(&lv_words),
            time_map_updated,
            time_unmounted,
            root_here,
            root_slot,
            partitions,
        };
        debug!(
            "subvolume {subvolume}: pv '{}' lv '{}' root_here {} root_slot {}",
            label.pv_name, label.lv_name, label.root_here, label.root_slot
        );
        Ok(label)
    }
}
