// The volume label.
//
// Record 0 of every subvolume. Laid out in 64-word sector-sized regions:
// five sectors of GCOS compatibility filler we never look at, then the
// permanent region (sector 5), dynamic mount state (sector 6), root
// information (sector 7), and the partition map (sector 8).

use crate::words::Word36;

// Word offsets of the regions within record 0. Each region is one 64-word
// sector.
pub const LABEL_REGION_WORDS: usize = 64;
pub const LABEL_PERM: usize = 5 * 64;
pub const LABEL_DYN: usize = 6 * 64;
pub const LABEL_ROOT: usize = 7 * 64;
pub const LABEL_PART: usize = 8 * 64;

/// Physical volume name, 8 packed words.
pub const LABEL_PV_NAME: usize = LABEL_PERM + 17;
/// Logical volume name, ditto.
pub const LABEL_LV_NAME: usize = LABEL_PERM + 25;

/// Time the volume map was last known good / time the pack was cleanly
/// unmounted. Equal on a clean dismount; anything else means the pack went
/// down hard and the shipped state may be stale.
pub const LABEL_TIME_MAP_UPDATED: usize = LABEL_DYN + 2;
pub const LABEL_TIME_UNMOUNTED: usize = LABEL_DYN + 10;

/// Root flag word (high bit = the hierarchy root lives on this pack) and
/// the root's catalog index in the word after it.
pub const LABEL_ROOT_HERE: usize = LABEL_ROOT;
pub const LABEL_ROOT_SLOT: usize = LABEL_ROOT + 1;

/// Partition count, then up to 47 four-word entries (name, first record,
/// record count, pad).
pub const LABEL_PART_COUNT: usize = LABEL_PART + 3;
pub const LABEL_PART_TABLE: usize = LABEL_PART + 4;
pub const LABEL_PART_MAX: usize = 47;

/// "Multics Storage System Volume", packed four characters to a word.
/// If record 0 does not open with this, the file is not a pack image.
pub const VOLUME_MAGIC: [Word36; 8] = [
    0o115165154164, // Mult
    0o151143163040, // ics
    0o123164157162, // Stor
    0o141147145040, // age
    0o123171163164, // Syst
    0o145155040126, // em V
    0o157154165155, // olum
    0o145040040040, // e
];

/// One named partition from the label's partition map. We do not look
/// inside partitions; this is carried for the dump tool.
#[derive(Debug, Clone)]
pub struct Partition {
    pub name: String,
    pub first_record: u64,
    pub records: u64,
}

/// Everything we consume out of one subvolume's label record.
#[derive(Debug, Clone)]
pub struct VolumeLabel {
    pub subvolume: usize,
    pub pv_name: String,
    pub lv_name: String,
    pub time_map_updated: Word36,
    pub time_unmounted: Word36,
    pub root_here: bool,
    pub root_slot: usize,
    pub partitions: Vec<Partition>,
}

impl VolumeLabel {
    /// Did the pack go down cleanly last time?
    pub fn cleanly_dismounted(&self) -> bool {
        self.time_map_updated == self.time_unmounted
    }
}
