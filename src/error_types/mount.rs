// Errors that abort a mount.
//
// Only structural problems found while building the catalog land here.
// Anything discovered inside one directory's own data is contained to that
// directory (see the directory error module) and the mount proceeds.

use thiserror::Error;

use crate::error_types::image::ImageError;

#[derive(Debug, Error)]
pub enum MountError {
    #[error(transparent)]
    Image(#[from] ImageError),
    /// The label record's 8-word identifier did not say
    /// "Multics Storage System Volume". Whatever this file is, we cannot
    /// browse it.
    #[error("subvolume {subvolume} is not a Multics volume (label word {word_index} is {found:#012o}, wanted {wanted:#012o})")]
    NotAMultiVolume {
        subvolume: usize,
        word_index: usize,
        found: u64,
        wanted: u64,
    },
    /// Subvolume counts run 1 to 3; the pack interleave math breaks down
    /// outside that.
    #[error("{0} subvolumes requested, supported range is 1-3")]
    BadSubvolumeCount(usize),
}
