// Directory contents.
//
// A directory's own data is a segment like any other, holding a 64-word
// header and then a singly linked list of entry nodes addressed by word
// offsets relative to the segment start.
//
// Header words we consume:
//
//     1  type/size tag, must be 0o0003000100
//    13  version in the low half, must be 2
//    14  offset of the first entry node, high half
//    18  segment count (high half) / directory count (low half)
//    19  link count (high half)
//
// Entry node words, relative to the node:
//
//     0  forward link, high half; zero terminates the chain
//     1  type tag, high half; zero marks a deleted (tombstoned) node
//     2  uid
//    12  primary name, 8 packed words (the include file claims offset 8,
//        actual packs say 12)
//    24  link only: target pathname length in characters, low half
//    25  link only: target pathname, up to 42 packed words
//    32  bit count, low 24 bits

use crate::volume::volume_struct::EntryIndex;

pub const DIR_HEADER_TYPE_WORD: usize = 1;
pub const DIR_HEADER_VERSION_WORD: usize = 13;
pub const DIR_HEADER_FIRST_ENTRY_WORD: usize = 14;
pub const DIR_HEADER_SEG_DIR_COUNTS_WORD: usize = 18;
pub const DIR_HEADER_LINK_COUNT_WORD: usize = 19;

pub const DIR_HEADER_TYPE_SIZE: u64 = 0o0003000100;
pub const DIR_HEADER_VERSION: u64 = 2;

pub const NODE_FORWARD: usize = 0;
pub const NODE_TYPE: usize = 1;
pub const NODE_UID: usize = 2;
pub const NODE_NAME: usize = 12;
pub const NODE_NAME_WORDS: usize = 8;
pub const NODE_LINK_SIZE: usize = 24;
pub const NODE_LINK_TEXT: usize = 25;
pub const NODE_LINK_TEXT_WORDS: usize = 42;
pub const NODE_BIT_COUNT: usize = 32;

/// Link targets cap out at 168 characters; anything longer is garbage and
/// gets truncated.
pub const LINK_TARGET_MAX_CHARS: usize = 168;

/// What a directory entry points at, from its type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    Link,
    Segment,
    /// A tag we do not recognize. Kept listed rather than dropped; the
    /// dump tool prints the raw tag.
    Other(u32),
}

impl EntryKind {
    pub fn from_type_tag(tag: u32) -> Self {
        match tag {
            4 => Self::Directory,
            5 => Self::Link,
            7 => Self::Segment,
            other => Self::Other(other),
        }
    }
}

/// One live child of a directory.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub name: String,
    pub uid: u64,
    pub kind: EntryKind,
    /// Declared length of the child's data, in bits.
    pub bit_count: u64,
    /// Link target path (native `>` separators), links only.
    pub link_target: Option<String>,
    /// Index of the child's own entry in the volume table. `None` for
    /// children whose catalog entry lives on another pack of the logical
    /// volume.
    pub child_index: Option<EntryIndex>,
}

impl DirectoryEntry {
    /// Declared length rounded up to whole bytes.
    pub fn byte_length(&self) -> u64 {
        self.bit_count.div_ceil(8)
    }
}
