// One catalog entry (VTOC entry).
//
// Word offsets within the entry:
//
//     0  (free-chain leftover, ignored)
//     1  uid - zero if the slot is free
//     2  msl / csl / records, three 9-bit fields in the high 27 bits
//     3  date-time last used
//     4  date-time last modified
//     5  attribute bits (see VtoceAttributes)
//    16  file map, 128 words of two 18-bit entries each (256 entries)
//   160  ancestor uid chain, 16 words, zero-terminated
//   176  primary name, 8 packed words
//   184  time created

use bitflags::bitflags;

use crate::words::{Word36, MASK18, MASK9};

/// The volume root's reserved uid: all ones.
pub const ROOT_UID: u64 = 0o777777777777;

pub const VTOCE_UID: usize = 1;
pub const VTOCE_LENGTHS: usize = 2;
pub const VTOCE_TIME_USED: usize = 3;
pub const VTOCE_TIME_MODIFIED: usize = 4;
pub const VTOCE_ATTRIBUTES: usize = 5;
pub const VTOCE_FILE_MAP: usize = 16;
pub const VTOCE_ANCESTORS: usize = 160;
pub const VTOCE_NAME: usize = 176;
pub const VTOCE_TIME_CREATED: usize = 184;

/// The file map holds 256 18-bit entries.
pub const FILE_MAP_ENTRIES: usize = 256;
/// High bit set in a file map entry: no physical record allocated there.
pub const FILE_MAP_HOLE: u32 = 0o400000;
/// Ancestor chains cap out at 16 uids.
pub const ANCESTOR_CHAIN_MAX: usize = 16;

bitflags! {
    /// The attribute word (entry word 5). Only the directory bit steers
    /// anything; the rest are decoded for display.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct VtoceAttributes: u64 {
        const NO_QUOTA              = 0o400000000000;
        const DECIDUOUS             = 0o200000000000;
        const NO_INCREMENTAL_DUMP   = 0o100000000000;
        const KEEP_ZERO_PAGES       = 0o040000000000;
        const TRANSPARENT_PAGING    = 0o020000000000;
        const PER_PROCESS           = 0o010000000000;
        const DAMAGED               = 0o004000000000;
        const FILE_MAP_DAMAGED      = 0o002000000000;
        const FILE_MAP_CHECKSUMMED  = 0o001000000000;
        const SYNCHRONIZED          = 0o000400000000;
        const DIRECTORY             = 0o000000400000;
        const MASTER_DIRECTORY      = 0o000000200000;
        const _ = !0;
    }
}

/// One decoded catalog slot: the words, plus where they came from so the
/// dump tool can say so.
pub struct RawVtoce {
    pub(crate) words: Vec<Word36>,
    /// Catalog record the slot was read from, and the slot's word offset
    /// within it.
    pub record: usize,
    pub offset: usize,
}

impl RawVtoce {
    pub fn uid(&self) -> u64 {
        self.words[VTOCE_UID]
    }

    /// Maximum segment length, in 1024-word records.
    pub fn max_length(&self) -> u64 {
        (self.words[VTOCE_LENGTHS] >> 27) & MASK9
    }

    /// Current segment length, in 1024-word records.
    pub fn current_length(&self) -> u64 {
        (self.words[VTOCE_LENGTHS] >> 18) & MASK9
    }

    /// Records actually allocated.
    pub fn record_count(&self) -> u64 {
        (self.words[VTOCE_LENGTHS] >> 9) & MASK9
    }

    pub fn time_used(&self) -> Word36 {
        self.words[VTOCE_TIME_USED]
    }

    pub fn time_modified(&self) -> Word36 {
        self.words[VTOCE_TIME_MODIFIED]
    }

    pub fn time_created(&self) -> Word36 {
        self.words[VTOCE_TIME_CREATED]
    }

    pub fn attributes(&self) -> VtoceAttributes {
        VtoceAttributes::from_bits_retain(self.words[VTOCE_ATTRIBUTES])
    }

    /// The full 256-entry file map, two 18-bit entries per word, high half
    /// first.
    pub fn file_map(&self) -> Vec<u32> {
        let mut map = Vec::with_capacity(FILE_MAP_ENTRIES);
        for i in 0..FILE_MAP_ENTRIES / 2 {
            let w = self.words[VTOCE_FILE_MAP + i];
            map.push(((w >> 18) & MASK18) as u32);
            map.push((w & MASK18) as u32);
        }
        map
    }

    /// The ancestor uid chain, cut at the first zero.
    pub fn ancestors(&self) -> Vec<u64> {
        let mut chain = Vec::new();
        for i in 0..ANCESTOR_CHAIN_MAX {
            let uid = self.words[VTOCE_ANCESTORS + i];
            if uid == 0 {
                break;
            }
            chain.push(uid);
        }
        chain
    }

    pub fn name_words(&self) -> &[Word36] {
        &self.words[VTOCE_NAME..VTOCE_NAME + 8]
    }
}
