// Walking a directory's entry chain.

use log::{debug, warn};

use crate::error_types::directory::{DirectoryFormatError, DirectoryParseError};
use crate::helpers::chars::{packed_string, trimmed_packed_string};
use crate::volume::file::FileWindow;
use crate::words::{MASK18, MASK24};

use super::directory_struct::*;

/// The counts the directory header declares for itself. The chain walk is
/// the truth; a disagreement between the two is worth a report but not a
/// failure.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DeclaredCounts {
    pub segments: usize,
    pub directories: usize,
    pub links: usize,
}

impl DeclaredCounts {
    pub fn total(&self) -> usize {
        self.segments + self.directories + self.links
    }
}

pub(crate) struct DirectoryContents {
    pub children: Vec<DirectoryEntry>,
    pub declared: DeclaredCounts,
}

/// Hard ceiling on chain steps. A directory segment tops out at 256
/// records of 1024 words and nodes are 38 words at their smallest, so a
/// healthy chain can never get anywhere near this; hitting it means the
/// forward pointers loop or wandered off into garbage.
const MAX_CHAIN_STEPS: usize = 8192;

/// Parse one directory's own data into its live children.
///
/// Children come back in chain order, tombstones skipped. `child_index` is
/// left unresolved here; the mount pass owns the entry table and fills it
/// in.
pub(crate) fn parse_directory(
    window: &mut FileWindow<'_>,
) -> Result<DirectoryContents, DirectoryParseError> {
    let type_size = window.read_word(DIR_HEADER_TYPE_WORD)?;
    if type_size != DIR_HEADER_TYPE_SIZE {
        return Err(DirectoryFormatError::BadTypeSize(type_size).into());
    }
    let version = window.read_word(DIR_HEADER_VERSION_WORD)? & MASK18;
    if version != DIR_HEADER_VERSION {
        return Err(DirectoryFormatError::BadVersion(version).into());
    }

    let seg_dir = window.read_word(DIR_HEADER_SEG_DIR_COUNTS_WORD)?;
    let links = window.read_word(DIR_HEADER_LINK_COUNT_WORD)?;
    let declared = DeclaredCounts {
        segments: ((seg_dir >> 18) & MASK18) as usize,
        directories: (seg_dir & MASK18) as usize,
        links: ((links >> 18) & MASK18) as usize,
    };

    let first = ((window.read_word(DIR_HEADER_FIRST_ENTRY_WORD)? >> 18) & MASK18) as usize;
    debug!(
        "directory declares {} segments, {} directories, {} links; first entry at word {first}",
        declared.segments, declared.directories, declared.links
    );

    let mut children = Vec::with_capacity(declared.total());
    let mut node = first;
    let mut steps = 0usize;
    while node != 0 {
        steps += 1;
        if steps > MAX_CHAIN_STEPS {
            return Err(DirectoryFormatError::ChainOverrun {
                steps: MAX_CHAIN_STEPS,
            }
            .into());
        }

        let forward = ((window.read_word(node + NODE_FORWARD)? >> 18) & MASK18) as usize;
        let type_tag = ((window.read_word(node + NODE_TYPE)? >> 18) & MASK18) as u32;
        if type_tag == 0 {
            // Tombstone: a deleted entry still chained in. Skip it, but it
            // still counts as a step.
            node = forward;
            continue;
        }

        let uid = window.read_word(node + NODE_UID)?;
        let mut name_words = [0u64; NODE_NAME_WORDS];
        for (i, w) in name_words.iter_mut().enumerate() {
            *w = window.read_word(node + NODE_NAME + i)?;
        }
        let name = trimmed_packed_string(&name_words);
        let kind = EntryKind::from_type_tag(type_tag);
        if let EntryKind::Other(tag) = kind {
            warn!("directory entry '{name}' has unknown type tag {tag}");
        }
        let bit_count = window.read_word(node + NODE_BIT_COUNT)? & MASK24;

        let link_target = if kind == EntryKind::Link {
            let mut size = (window.read_word(node + NODE_LINK_SIZE)? & MASK18) as usize;
            if size > LINK_TARGET_MAX_CHARS {
                warn!("link '{name}' claims a {size} character target, truncating");
                size = LINK_TARGET_MAX_CHARS;
            }
            let mut text_words = [0u64; NODE_LINK_TEXT_WORDS];
            for (i, w) in text_words.iter_mut().enumerate() {
                *w = window.read_word(node + NODE_LINK_TEXT + i)?;
            }
            let mut target = packed_string(&text_words);
            target.truncate(size);
            Some(target)
        } else {
            None
        };

        children.push(DirectoryEntry {
            name,
            uid,
            kind,
            bit_count,
            link_target,
            child_index: None,
        });
        node = forward;
    }

    Ok(DirectoryContents { children, declared })
}
